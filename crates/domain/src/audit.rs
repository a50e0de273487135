use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by policy mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Emitted when a permission is added to the catalog.
    PermissionCreated,
    /// Emitted when an unreferenced permission is removed.
    PermissionDeleted,
    /// Emitted when a custom role is created.
    RoleCreated,
    /// Emitted when an unreferenced custom role is removed.
    RoleDeleted,
    /// Emitted when a role default grant is flipped.
    RoleGrantToggled,
    /// Emitted when a user override is inserted or updated.
    UserOverrideSet,
    /// Emitted when a user override is removed.
    UserOverrideCleared,
    /// Emitted when the system catalog is seeded.
    SystemCatalogSeeded,
}

impl AuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PermissionCreated => "policy.permission.created",
            Self::PermissionDeleted => "policy.permission.deleted",
            Self::RoleCreated => "policy.role.created",
            Self::RoleDeleted => "policy.role.deleted",
            Self::RoleGrantToggled => "policy.role_grant.toggled",
            Self::UserOverrideSet => "policy.user_override.set",
            Self::UserOverrideCleared => "policy.user_override.cleared",
            Self::SystemCatalogSeeded => "policy.catalog.seeded",
        }
    }
}
