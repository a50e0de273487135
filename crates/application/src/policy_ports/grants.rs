use async_trait::async_trait;

use accessgrid_core::AppResult;
use accessgrid_domain::{
    PermissionId, PolicySnapshot, RoleGrantToggle, RoleId, UserId, UserOverride,
};

/// Repository port for role grants and user overrides.
///
/// Every mutation runs as one atomic transaction and validates that the
/// referenced catalog rows exist, failing with `NotFound` otherwise.
#[async_trait]
pub trait GrantRepository: Send + Sync {
    /// Reads catalog and grants in one consistent transaction.
    async fn load_snapshot(&self) -> AppResult<PolicySnapshot>;

    /// Lists the overrides of one user, ordered by permission.
    async fn list_user_overrides(&self, user_id: UserId) -> AppResult<Vec<UserOverride>>;

    /// Flips the role grant.
    ///
    /// An insert that collides with a concurrent insert of the same grant
    /// reports `Converged` rather than failing or retrying.
    async fn toggle_role_grant(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<RoleGrantToggle>;

    /// Inserts or updates the override and returns the stored value.
    async fn set_user_override(
        &self,
        user_id: UserId,
        permission_id: PermissionId,
        granted: bool,
    ) -> AppResult<bool>;

    /// Removes the override; returns whether one existed.
    async fn clear_user_override(
        &self,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<bool>;
}
