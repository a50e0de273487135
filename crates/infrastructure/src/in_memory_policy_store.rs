use std::collections::{BTreeMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::RwLock;

use accessgrid_application::{
    AuditEvent, AuditLogEntry, AuditLogQuery, AuditLogRepository, AuditRepository,
    CatalogRepository, GrantRepository, SeedReport,
};
use accessgrid_core::{AppError, AppResult};
use accessgrid_domain::{
    Catalog, GrantLookup, GrantSet, NewPermission, NewRole, Permission, PermissionId,
    PolicySnapshot, Role, RoleGrantToggle, RoleId, SystemCatalogSeed, UserId, UserOverride,
};

mod audit;
mod catalog;
mod grants;

#[cfg(test)]
mod tests;

/// Audit entries kept by default before the oldest are evicted.
pub const DEFAULT_AUDIT_CAPACITY: usize = 10_000;

/// In-memory catalog, grant and audit store.
///
/// One lock guards the whole state and every call holds it for its full
/// read-modify-write, so each call is atomic. The audit trail is bounded:
/// once it holds `audit_capacity` entries the oldest one is dropped.
#[derive(Debug)]
pub struct InMemoryPolicyStore {
    state: RwLock<PolicyState>,
    audit_capacity: usize,
}

#[derive(Debug, Default)]
struct PolicyState {
    permissions: BTreeMap<PermissionId, Permission>,
    roles: BTreeMap<RoleId, Role>,
    grants: GrantSet,
    audit_entries: VecDeque<AuditLogEntry>,
    last_permission_id: i64,
    last_role_id: i64,
}

impl PolicyState {
    fn next_permission_id(&mut self) -> PermissionId {
        self.last_permission_id += 1;
        PermissionId::new(self.last_permission_id)
    }

    fn next_role_id(&mut self) -> RoleId {
        self.last_role_id += 1;
        RoleId::new(self.last_role_id)
    }

    fn find_permission_by_key(&self, resource: &str, action: &str) -> Option<&Permission> {
        self.permissions.values().find(|permission| {
            permission.resource().as_str() == resource && permission.action().as_str() == action
        })
    }

    fn find_role_by_name(&self, name: &str) -> Option<&Role> {
        self.roles.values().find(|role| role.name().as_str() == name)
    }

    fn require_permission(&self, permission_id: PermissionId) -> AppResult<&Permission> {
        self.permissions
            .get(&permission_id)
            .ok_or_else(|| AppError::NotFound(format!("permission '{permission_id}' was not found")))
    }

    fn require_role(&self, role_id: RoleId) -> AppResult<&Role> {
        self.roles
            .get(&role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))
    }

    fn catalog(&self) -> AppResult<Catalog> {
        Catalog::new(
            self.permissions.values().cloned().collect(),
            self.roles.values().cloned().collect(),
        )
    }

    fn snapshot(&self) -> AppResult<PolicySnapshot> {
        Ok(PolicySnapshot::new(self.catalog()?, self.grants.clone()))
    }
}

impl InMemoryPolicyStore {
    /// Creates an empty store keeping [`DEFAULT_AUDIT_CAPACITY`] audit entries.
    #[must_use]
    pub fn new() -> Self {
        Self::with_audit_capacity(DEFAULT_AUDIT_CAPACITY)
    }

    /// Creates an empty store keeping at most `audit_capacity` audit entries.
    #[must_use]
    pub fn with_audit_capacity(audit_capacity: usize) -> Self {
        Self {
            state: RwLock::new(PolicyState::default()),
            audit_capacity: audit_capacity.max(1),
        }
    }
}

impl Default for InMemoryPolicyStore {
    fn default() -> Self {
        Self::new()
    }
}
