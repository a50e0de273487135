use std::collections::HashMap;

use accessgrid_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Stable identifier for a catalog permission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PermissionId(i64);

impl PermissionId {
    /// Creates a permission identifier from a storage key.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying storage key.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PermissionId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Stable identifier for a catalog role.
///
/// Every lookup goes through this id; role names are display-only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RoleId(i64);

impl RoleId {
    /// Creates a role identifier from a storage key.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying storage key.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated permission attributes prior to persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPermission {
    name: NonEmptyString,
    description: String,
    resource: NonEmptyString,
    action: NonEmptyString,
}

impl NewPermission {
    /// Validates permission attributes.
    ///
    /// `resource` and `action` must be single segments so that the rendered
    /// `resource.action` key stays unambiguous.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            description: description.into().trim().to_owned(),
            resource: key_segment("resource", resource.into())?,
            action: key_segment("action", action.into())?,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the protected resource.
    #[must_use]
    pub fn resource(&self) -> &NonEmptyString {
        &self.resource
    }

    /// Returns the action on the resource.
    #[must_use]
    pub fn action(&self) -> &NonEmptyString {
        &self.action
    }

    /// Attaches the identifier assigned by storage.
    #[must_use]
    pub fn into_permission(self, id: PermissionId) -> Permission {
        Permission {
            id,
            name: self.name,
            description: self.description,
            resource: self.resource,
            action: self.action,
        }
    }
}

fn key_segment(label: &str, value: String) -> AppResult<NonEmptyString> {
    let segment = NonEmptyString::new(value)
        .map_err(|_| AppError::Validation(format!("permission {label} must not be empty")))?;

    if segment
        .as_str()
        .chars()
        .any(|character| character == '.' || character.is_whitespace())
    {
        return Err(AppError::Validation(format!(
            "permission {label} '{segment}' must not contain '.' or whitespace"
        )));
    }

    Ok(segment)
}

/// Atomic capability: one action on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    id: PermissionId,
    name: NonEmptyString,
    description: String,
    resource: NonEmptyString,
    action: NonEmptyString,
}

impl Permission {
    /// Creates a validated permission with a known identifier.
    pub fn new(
        id: PermissionId,
        name: impl Into<String>,
        description: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> AppResult<Self> {
        Ok(NewPermission::new(name, description, resource, action)?.into_permission(id))
    }

    /// Returns the stable identifier.
    #[must_use]
    pub fn id(&self) -> PermissionId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the protected resource.
    #[must_use]
    pub fn resource(&self) -> &NonEmptyString {
        &self.resource
    }

    /// Returns the action on the resource.
    #[must_use]
    pub fn action(&self) -> &NonEmptyString {
        &self.action
    }

    /// Returns the `resource.action` key, e.g. `documents.delete`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}.{}", self.resource, self.action)
    }

    fn sort_key(&self) -> (&str, &str) {
        (self.resource.as_str(), self.action.as_str())
    }
}

/// Validated role attributes prior to persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRole {
    name: NonEmptyString,
    description: String,
}

impl NewRole {
    /// Validates role attributes.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::new(name)?,
            description: description.into().trim().to_owned(),
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Attaches the identifier assigned by storage.
    #[must_use]
    pub fn into_role(self, id: RoleId, is_system: bool) -> Role {
        Role {
            id,
            name: self.name,
            description: self.description,
            is_system,
        }
    }
}

/// Named bundle of default permission grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: NonEmptyString,
    description: String,
    is_system: bool,
}

impl Role {
    /// Creates a validated role with a known identifier.
    pub fn new(
        id: RoleId,
        name: impl Into<String>,
        description: impl Into<String>,
        is_system: bool,
    ) -> AppResult<Self> {
        Ok(NewRole::new(name, description)?.into_role(id, is_system))
    }

    /// Returns the stable identifier.
    #[must_use]
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Indicates a seeded role that cannot be deleted.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.is_system
    }
}

/// Point-in-time view of the permission and role catalog.
///
/// Permissions are kept ordered by resource then action, roles by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    permissions: Vec<Permission>,
    roles: Vec<Role>,
    permission_index: HashMap<PermissionId, usize>,
    role_index: HashMap<RoleId, usize>,
}

impl Catalog {
    /// Builds a catalog, enforcing display ordering and key uniqueness.
    pub fn new(mut permissions: Vec<Permission>, mut roles: Vec<Role>) -> AppResult<Self> {
        permissions.sort_by(|left, right| left.sort_key().cmp(&right.sort_key()));
        roles.sort_by(|left, right| left.name.cmp(&right.name));

        if let Some(pair) = permissions
            .windows(2)
            .find(|pair| pair[0].sort_key() == pair[1].sort_key())
        {
            return Err(AppError::Duplicate(format!(
                "permission '{}' appears more than once",
                pair[0].key()
            )));
        }

        if let Some(pair) = roles.windows(2).find(|pair| pair[0].name == pair[1].name) {
            return Err(AppError::Duplicate(format!(
                "role '{}' appears more than once",
                pair[0].name
            )));
        }

        let permission_index: HashMap<PermissionId, usize> = permissions
            .iter()
            .enumerate()
            .map(|(position, permission)| (permission.id, position))
            .collect();
        let role_index: HashMap<RoleId, usize> = roles
            .iter()
            .enumerate()
            .map(|(position, role)| (role.id, position))
            .collect();

        if permission_index.len() != permissions.len() || role_index.len() != roles.len() {
            return Err(AppError::Validation(
                "catalog identifiers must be unique".to_owned(),
            ));
        }

        Ok(Self {
            permissions,
            roles,
            permission_index,
            role_index,
        })
    }

    /// Returns permissions ordered by resource, then action.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        self.permissions.as_slice()
    }

    /// Returns roles ordered by name.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        self.roles.as_slice()
    }

    /// Finds a permission by id.
    #[must_use]
    pub fn permission(&self, permission_id: PermissionId) -> Option<&Permission> {
        self.permission_index
            .get(&permission_id)
            .map(|position| &self.permissions[*position])
    }

    /// Finds a role by id.
    #[must_use]
    pub fn role(&self, role_id: RoleId) -> Option<&Role> {
        self.role_index
            .get(&role_id)
            .map(|position| &self.roles[*position])
    }

    /// Finds a permission by its `(resource, action)` pair.
    #[must_use]
    pub fn permission_by_key(&self, resource: &str, action: &str) -> Option<&Permission> {
        self.permissions
            .binary_search_by(|permission| permission.sort_key().cmp(&(resource, action)))
            .ok()
            .map(|position| &self.permissions[position])
    }

    /// Finds a role by display name.
    #[must_use]
    pub fn role_by_name(&self, name: &str) -> Option<&Role> {
        self.roles.iter().find(|role| role.name.as_str() == name)
    }
}
