//! Engine-side view of users owned by an external directory.

use serde::{Deserialize, Serialize};

use crate::RoleId;

/// Unique identifier for a user record in the external directory.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user identifier from a storage key.
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

impl std::fmt::Display for UserId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// A user as seen by the resolver: identity plus its single role reference.
///
/// The role reference is not validated against the catalog; a missing or
/// dangling role resolves to deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    id: UserId,
    role_id: Option<RoleId>,
}

impl UserRef {
    /// Creates a user reference.
    #[must_use]
    pub fn new(id: UserId, role_id: Option<RoleId>) -> Self {
        Self { id, role_id }
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the referenced role, if the user has one.
    #[must_use]
    pub fn role_id(&self) -> Option<RoleId> {
        self.role_id
    }
}
