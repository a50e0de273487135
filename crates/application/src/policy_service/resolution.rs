use std::collections::BTreeSet;

use accessgrid_domain::{PermissionGrant, PermissionId, PermissionMatrix, PolicySnapshot};
use tracing::{debug, error};

use super::*;

impl PolicyService {
    /// Returns the role × permission matrix of role defaults.
    pub async fn get_matrix(&self) -> AppResult<PermissionMatrix> {
        Ok(self.grant_repository.load_snapshot().await?.matrix())
    }

    /// Returns every permission annotated with the user's effective decision.
    pub async fn get_user_view(&self, user_id: UserId) -> AppResult<Vec<PermissionGrant>> {
        let user = self.require_user(user_id).await?;
        let snapshot = self.grant_repository.load_snapshot().await?;

        Ok(snapshot.user_view(&user))
    }

    /// Returns whether the user is effectively granted the permission.
    ///
    /// Fails closed: unknown users, unknown permissions and storage failures
    /// all deny.
    pub async fn effective(&self, user_id: UserId, permission_id: PermissionId) -> bool {
        match self.decision_context(user_id).await {
            Some((user, snapshot)) => {
                let decision = snapshot.resolve(&user, permission_id);
                debug!(
                    %user_id,
                    %permission_id,
                    granted = decision.granted,
                    source = decision.source.as_str(),
                    "permission resolved"
                );
                decision.granted
            }
            None => false,
        }
    }

    /// Returns whether the user may perform `action` on `resource`.
    ///
    /// Fails closed like [`PolicyService::effective`].
    pub async fn is_allowed(&self, user_id: UserId, resource: &str, action: &str) -> bool {
        let Some((user, snapshot)) = self.decision_context(user_id).await else {
            return false;
        };

        let Some(permission) = snapshot.catalog().permission_by_key(resource, action) else {
            debug!(%user_id, resource, action, "unknown permission denied");
            return false;
        };

        let decision = snapshot.resolve(&user, permission.id());
        debug!(
            %user_id,
            permission = %permission.key(),
            granted = decision.granted,
            source = decision.source.as_str(),
            "permission resolved"
        );

        decision.granted
    }

    /// Returns the user's effective permission set.
    ///
    /// The set is side-effect free; callers may memoize it per request.
    pub async fn effective_permissions(&self, user_id: UserId) -> BTreeSet<PermissionId> {
        self.decision_context(user_id)
            .await
            .map(|(user, snapshot)| snapshot.effective_set(&user))
            .unwrap_or_default()
    }

    async fn decision_context(&self, user_id: UserId) -> Option<(UserRef, PolicySnapshot)> {
        let user = match self.user_directory.find_user(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!(%user_id, "unknown user denied");
                return None;
            }
            Err(failure) => {
                error!(%user_id, error = %failure, "user lookup failed, denying");
                return None;
            }
        };

        match self.grant_repository.load_snapshot().await {
            Ok(snapshot) => Some((user, snapshot)),
            Err(failure) => {
                error!(%user_id, error = %failure, "policy snapshot failed, denying");
                None
            }
        }
    }
}
