//! Administrative projections over a catalog and grant set.

use serde::{Deserialize, Serialize};

use crate::{Catalog, GrantLookup, Permission, Role, UserRef, resolver};

/// Permission annotated with a grant flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Catalog permission.
    pub permission: Permission,
    /// Whether the permission is granted in this view.
    pub granted: bool,
}

/// One role and its default grant for every catalog permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRow {
    /// Catalog role.
    pub role: Role,
    /// Grants in catalog permission order.
    pub grants: Vec<PermissionGrant>,
}

/// Role × permission grid used for policy authoring.
///
/// Only role defaults are shown; per-user overrides never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionMatrix {
    /// Permissions ordered by resource, then action.
    pub permissions: Vec<Permission>,
    /// Roles ordered by name.
    pub roles: Vec<Role>,
    /// One row per role, in role order.
    pub matrix: Vec<RoleRow>,
}

/// Builds the role default matrix.
#[must_use]
pub fn build_matrix(catalog: &Catalog, grants: &impl GrantLookup) -> PermissionMatrix {
    let matrix = catalog
        .roles()
        .iter()
        .map(|role| RoleRow {
            role: role.clone(),
            grants: catalog
                .permissions()
                .iter()
                .map(|permission| PermissionGrant {
                    permission: permission.clone(),
                    granted: grants.has_role_grant(role.id(), permission.id()),
                })
                .collect(),
        })
        .collect();

    PermissionMatrix {
        permissions: catalog.permissions().to_vec(),
        roles: catalog.roles().to_vec(),
        matrix,
    }
}

/// Builds the per-user audit view with effective decisions.
#[must_use]
pub fn build_user_view(
    catalog: &Catalog,
    grants: &impl GrantLookup,
    user: &UserRef,
) -> Vec<PermissionGrant> {
    catalog
        .permissions()
        .iter()
        .map(|permission| PermissionGrant {
            permission: permission.clone(),
            granted: resolver::effective(catalog, grants, user, permission.id()),
        })
        .collect()
}
