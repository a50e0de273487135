use accessgrid_domain::{PermissionId, RoleGrantToggle, RoleId, UserOverride};
use tracing::{info, warn};

use super::*;

impl PolicyService {
    /// Flips a role default grant and returns the new state.
    ///
    /// Callers must read the direction from the return value.
    pub async fn toggle_role_grant(
        &self,
        actor: &Actor,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let outcome = self
            .grant_repository
            .toggle_role_grant(role_id, permission_id)
            .await?;

        if outcome == RoleGrantToggle::Converged {
            warn!(
                %role_id,
                %permission_id,
                "role grant insert converged with a concurrent toggle"
            );
        }

        let granted = outcome.is_granted();
        info!(%role_id, %permission_id, granted, "role grant toggled");

        self.append_audit_event(
            actor,
            AuditAction::RoleGrantToggled,
            "policy_role_grant",
            format!("{role_id}:{permission_id}"),
            format!(
                "{} permission '{permission_id}' for role '{role_id}'",
                if granted { "granted" } else { "revoked" }
            ),
        )
        .await;

        Ok(granted)
    }

    /// Upserts a per-user override and returns the stored value.
    pub async fn set_user_override(
        &self,
        actor: &Actor,
        user_id: UserId,
        permission_id: PermissionId,
        granted: bool,
    ) -> AppResult<bool> {
        self.require_user(user_id).await?;

        let granted = self
            .grant_repository
            .set_user_override(user_id, permission_id, granted)
            .await?;

        info!(%user_id, %permission_id, granted, "user override set");

        self.append_audit_event(
            actor,
            AuditAction::UserOverrideSet,
            "policy_user_override",
            format!("{user_id}:{permission_id}"),
            format!("set override '{granted}' on permission '{permission_id}' for user '{user_id}'"),
        )
        .await;

        Ok(granted)
    }

    /// Removes a per-user override so the role default applies again.
    ///
    /// Returns whether an override existed. No audit event is written when
    /// nothing was removed.
    pub async fn clear_user_override(
        &self,
        actor: &Actor,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        self.require_user(user_id).await?;

        let removed = self
            .grant_repository
            .clear_user_override(user_id, permission_id)
            .await?;

        if !removed {
            return Ok(false);
        }

        info!(%user_id, %permission_id, "user override cleared");

        self.append_audit_event(
            actor,
            AuditAction::UserOverrideCleared,
            "policy_user_override",
            format!("{user_id}:{permission_id}"),
            format!("cleared override on permission '{permission_id}' for user '{user_id}'"),
        )
        .await;

        Ok(true)
    }

    /// Lists the explicit overrides of one user.
    pub async fn list_user_overrides(&self, user_id: UserId) -> AppResult<Vec<UserOverride>> {
        self.require_user(user_id).await?;
        self.grant_repository.list_user_overrides(user_id).await
    }
}
