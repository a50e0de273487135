//! Seeded system catalog.

/// Permission seeded at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPermission {
    /// Protected resource.
    pub resource: &'static str,
    /// Action on the resource.
    pub action: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Description.
    pub description: &'static str,
}

/// System role seeded at initialization with its default grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRole {
    /// Unique role name.
    pub name: &'static str,
    /// Description.
    pub description: &'static str,
    /// `(resource, action)` pairs granted by default.
    pub grants: Vec<(&'static str, &'static str)>,
}

/// Complete system catalog to seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemCatalogSeed {
    /// Seeded permissions.
    pub permissions: Vec<SeedPermission>,
    /// Seeded system roles.
    pub roles: Vec<SeedRole>,
}

const fn seed(
    resource: &'static str,
    action: &'static str,
    name: &'static str,
    description: &'static str,
) -> SeedPermission {
    SeedPermission {
        resource,
        action,
        name,
        description,
    }
}

const STANDARD_PERMISSIONS: &[SeedPermission] = &[
    seed("process", "read", "Read processes", "View processes"),
    seed("process", "create", "Create processes", "Create new processes"),
    seed("process", "edit", "Edit processes", "Modify existing processes"),
    seed("process", "delete", "Delete processes", "Delete processes"),
    seed("process", "publish", "Publish processes", "Publish or activate processes"),
    seed("document", "read", "Read documents", "View documents"),
    seed("document", "upload", "Upload documents", "Add new documents"),
    seed("document", "edit", "Edit documents", "Modify document metadata"),
    seed("document", "delete", "Delete documents", "Delete documents"),
    seed("document", "download", "Download documents", "Download documents"),
    seed("user", "read", "Read users", "View the user list"),
    seed("user", "create", "Create users", "Add new users"),
    seed("user", "edit", "Edit users", "Modify user profiles"),
    seed("user", "delete", "Delete users", "Delete users"),
    seed("user", "assign_roles", "Assign roles", "Manage user roles"),
    seed("system", "admin", "System administration", "Full system access"),
    seed("system", "analytics", "View analytics", "Access dashboards"),
    seed("system", "reports", "Generate reports", "Create and export reports"),
    seed("system", "settings", "Manage settings", "Modify system settings"),
];

impl SystemCatalogSeed {
    /// Returns the standard catalog: `admin`, `contributor` and `reader`.
    #[must_use]
    pub fn standard() -> Self {
        let permissions = STANDARD_PERMISSIONS.to_vec();
        let everything = permissions
            .iter()
            .map(|permission| (permission.resource, permission.action))
            .collect();

        Self {
            permissions,
            roles: vec![
                SeedRole {
                    name: "admin",
                    description: "Full access to every feature",
                    grants: everything,
                },
                SeedRole {
                    name: "contributor",
                    description: "Can create and edit processes and documents",
                    grants: vec![
                        ("process", "read"),
                        ("process", "create"),
                        ("process", "edit"),
                        ("process", "publish"),
                        ("document", "read"),
                        ("document", "upload"),
                        ("document", "edit"),
                        ("document", "download"),
                        ("system", "analytics"),
                        ("system", "reports"),
                    ],
                },
                SeedRole {
                    name: "reader",
                    description: "Read-only access to processes and documents",
                    grants: vec![
                        ("process", "read"),
                        ("document", "read"),
                        ("document", "download"),
                        ("system", "analytics"),
                    ],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::SystemCatalogSeed;

    #[test]
    fn standard_roles_only_grant_seeded_permissions() {
        let seed = SystemCatalogSeed::standard();
        let keys: HashSet<(&str, &str)> = seed
            .permissions
            .iter()
            .map(|permission| (permission.resource, permission.action))
            .collect();

        assert_eq!(keys.len(), seed.permissions.len());
        for role in &seed.roles {
            assert!(role.grants.iter().all(|grant| keys.contains(grant)));
        }
    }

    #[test]
    fn standard_role_sizes() {
        let seed = SystemCatalogSeed::standard();
        let sizes: Vec<(&str, usize)> = seed
            .roles
            .iter()
            .map(|role| (role.name, role.grants.len()))
            .collect();

        assert_eq!(
            sizes,
            vec![("admin", 19), ("contributor", 10), ("reader", 4)]
        );
    }
}
