use async_trait::async_trait;

use accessgrid_core::AppResult;
use accessgrid_domain::{
    NewPermission, NewRole, Permission, PermissionId, Role, RoleId, SystemCatalogSeed,
};

/// Input payload for adding a permission to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePermissionInput {
    /// Display name.
    pub name: String,
    /// Optional description; empty when absent.
    pub description: String,
    /// Protected resource, e.g. `documents`.
    pub resource: String,
    /// Action on the resource, e.g. `delete`.
    pub action: String,
}

/// Input payload for creating custom roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRoleInput {
    /// Unique role name.
    pub name: String,
    /// Optional description; empty when absent.
    pub description: String,
}

/// Rows inserted by a system catalog seed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Permissions that did not exist yet.
    pub permissions_created: usize,
    /// System roles that did not exist yet.
    pub roles_created: usize,
    /// Default grants attached to newly created system roles.
    pub grants_created: usize,
}

impl SeedReport {
    /// Returns whether the run changed anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permissions_created == 0 && self.roles_created == 0 && self.grants_created == 0
    }
}

/// Repository port for the permission and role catalog.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Lists permissions ordered by resource, then action.
    async fn list_permissions(&self) -> AppResult<Vec<Permission>>;

    /// Lists roles ordered by name.
    async fn list_roles(&self) -> AppResult<Vec<Role>>;

    /// Persists a permission; `Duplicate` when `(resource, action)` exists.
    async fn create_permission(&self, permission: NewPermission) -> AppResult<Permission>;

    /// Persists a non-system role; `Duplicate` when the name exists.
    async fn create_role(&self, role: NewRole) -> AppResult<Role>;

    /// Removes an unreferenced permission and returns it.
    async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<Permission>;

    /// Removes an unreferenced non-system role and returns it.
    async fn delete_role(&self, role_id: RoleId) -> AppResult<Role>;

    /// Inserts missing seeded permissions, system roles and their defaults.
    ///
    /// Grants are only attached to roles created by this call, so
    /// administrator edits to existing system roles survive.
    async fn ensure_system_catalog(&self, seed: &SystemCatalogSeed) -> AppResult<SeedReport>;
}
