use std::collections::BTreeSet;

use crate::{
    Catalog, Decision, GrantSet, PermissionGrant, PermissionId, PermissionMatrix, UserRef, matrix,
    resolver,
};

/// Consistent catalog and grant state read in one storage transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySnapshot {
    catalog: Catalog,
    grants: GrantSet,
}

impl PolicySnapshot {
    /// Creates a snapshot from its two halves.
    #[must_use]
    pub fn new(catalog: Catalog, grants: GrantSet) -> Self {
        Self { catalog, grants }
    }

    /// Returns the catalog half.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the grant half.
    #[must_use]
    pub fn grants(&self) -> &GrantSet {
        &self.grants
    }

    /// Resolves one decision with its provenance.
    #[must_use]
    pub fn resolve(&self, user: &UserRef, permission_id: PermissionId) -> Decision {
        resolver::resolve(&self.catalog, &self.grants, user, permission_id)
    }

    /// Returns the effective decision for one permission.
    #[must_use]
    pub fn effective(&self, user: &UserRef, permission_id: PermissionId) -> bool {
        resolver::effective(&self.catalog, &self.grants, user, permission_id)
    }

    /// Returns every effectively granted permission.
    #[must_use]
    pub fn effective_set(&self, user: &UserRef) -> BTreeSet<PermissionId> {
        resolver::effective_set(&self.catalog, &self.grants, user)
    }

    /// Builds the role default matrix.
    #[must_use]
    pub fn matrix(&self) -> PermissionMatrix {
        matrix::build_matrix(&self.catalog, &self.grants)
    }

    /// Builds the per-user effective view.
    #[must_use]
    pub fn user_view(&self, user: &UserRef) -> Vec<PermissionGrant> {
        matrix::build_user_view(&self.catalog, &self.grants, user)
    }
}
