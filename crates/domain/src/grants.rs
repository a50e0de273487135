use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{PermissionId, RoleId, UserId};

/// Row asserting that a role grants a permission by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoleGrant {
    /// Granting role.
    pub role_id: RoleId,
    /// Granted permission.
    pub permission_id: PermissionId,
}

/// Explicit per-user grant or denial that takes precedence over the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserOverride {
    /// Overridden user.
    pub user_id: UserId,
    /// Overridden permission.
    pub permission_id: PermissionId,
    /// `true` forces a grant, `false` forces a denial.
    pub granted: bool,
}

/// Outcome of flipping a role grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleGrantToggle {
    /// The grant did not exist and was inserted.
    Granted,
    /// The grant existed and was deleted.
    Revoked,
    /// The insert lost a race against a concurrent insert of the same grant.
    Converged,
}

impl RoleGrantToggle {
    /// Returns the grant state after the toggle.
    #[must_use]
    pub fn is_granted(&self) -> bool {
        !matches!(self, Self::Revoked)
    }
}

/// Read accessors over the two grant relations.
pub trait GrantLookup {
    /// Returns whether the role grants the permission by default.
    fn has_role_grant(&self, role_id: RoleId, permission_id: PermissionId) -> bool;

    /// Returns the override value for a user and permission, if one exists.
    fn user_override(&self, user_id: UserId, permission_id: PermissionId) -> Option<bool>;
}

/// In-memory set of role grants and user overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GrantSet {
    role_grants: BTreeSet<RoleGrant>,
    user_overrides: BTreeMap<(UserId, PermissionId), bool>,
}

impl GrantSet {
    /// Creates a grant set from stored rows.
    ///
    /// Later overrides for the same pair replace earlier ones.
    #[must_use]
    pub fn new(
        role_grants: impl IntoIterator<Item = RoleGrant>,
        user_overrides: impl IntoIterator<Item = UserOverride>,
    ) -> Self {
        Self {
            role_grants: role_grants.into_iter().collect(),
            user_overrides: user_overrides
                .into_iter()
                .map(|row| ((row.user_id, row.permission_id), row.granted))
                .collect(),
        }
    }

    /// Lists role grants ordered by role, then permission.
    pub fn role_grants(&self) -> impl Iterator<Item = RoleGrant> + '_ {
        self.role_grants.iter().copied()
    }

    /// Lists user overrides ordered by user, then permission.
    pub fn user_overrides(&self) -> impl Iterator<Item = UserOverride> + '_ {
        self.user_overrides
            .iter()
            .map(|((user_id, permission_id), granted)| UserOverride {
                user_id: *user_id,
                permission_id: *permission_id,
                granted: *granted,
            })
    }

    /// Lists the overrides of one user.
    pub fn overrides_for_user(&self, user_id: UserId) -> impl Iterator<Item = UserOverride> + '_ {
        self.user_overrides().filter(move |row| row.user_id == user_id)
    }

    /// Flips a role grant and returns the new state.
    pub fn toggle_role_grant(&mut self, role_id: RoleId, permission_id: PermissionId) -> bool {
        let grant = RoleGrant {
            role_id,
            permission_id,
        };

        if self.role_grants.remove(&grant) {
            return false;
        }

        self.role_grants.insert(grant);
        true
    }

    /// Inserts or updates an override and returns the stored value.
    pub fn set_user_override(
        &mut self,
        user_id: UserId,
        permission_id: PermissionId,
        granted: bool,
    ) -> bool {
        self.user_overrides
            .insert((user_id, permission_id), granted);
        granted
    }

    /// Removes an override; returns whether one existed.
    pub fn clear_user_override(&mut self, user_id: UserId, permission_id: PermissionId) -> bool {
        self.user_overrides
            .remove(&(user_id, permission_id))
            .is_some()
    }

    /// Returns whether any grant or override references the permission.
    #[must_use]
    pub fn references_permission(&self, permission_id: PermissionId) -> bool {
        self.role_grants
            .iter()
            .any(|grant| grant.permission_id == permission_id)
            || self
                .user_overrides
                .keys()
                .any(|(_, stored_permission_id)| *stored_permission_id == permission_id)
    }

    /// Returns whether any grant references the role.
    #[must_use]
    pub fn references_role(&self, role_id: RoleId) -> bool {
        self.role_grants
            .range(
                RoleGrant {
                    role_id,
                    permission_id: PermissionId::new(i64::MIN),
                }..,
            )
            .next()
            .is_some_and(|grant| grant.role_id == role_id)
    }
}

impl GrantLookup for GrantSet {
    fn has_role_grant(&self, role_id: RoleId, permission_id: PermissionId) -> bool {
        self.role_grants.contains(&RoleGrant {
            role_id,
            permission_id,
        })
    }

    fn user_override(&self, user_id: UserId, permission_id: PermissionId) -> Option<bool> {
        self.user_overrides
            .get(&(user_id, permission_id))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{GrantLookup, GrantSet, RoleGrant, RoleGrantToggle, UserOverride};
    use crate::{PermissionId, RoleId, UserId};

    #[test]
    fn toggle_flips_membership() {
        let mut grants = GrantSet::default();
        let role_id = RoleId::new(1);
        let permission_id = PermissionId::new(5);

        assert!(grants.toggle_role_grant(role_id, permission_id));
        assert!(grants.has_role_grant(role_id, permission_id));
        assert!(!grants.toggle_role_grant(role_id, permission_id));
        assert!(!grants.has_role_grant(role_id, permission_id));
    }

    #[test]
    fn override_upsert_keeps_one_row() {
        let mut grants = GrantSet::default();
        let user_id = UserId::new(7);
        let permission_id = PermissionId::new(5);

        grants.set_user_override(user_id, permission_id, true);
        grants.set_user_override(user_id, permission_id, true);

        assert_eq!(grants.user_overrides().count(), 1);
        assert_eq!(grants.user_override(user_id, permission_id), Some(true));

        grants.set_user_override(user_id, permission_id, false);
        assert_eq!(grants.user_override(user_id, permission_id), Some(false));
        assert!(grants.clear_user_override(user_id, permission_id));
        assert!(!grants.clear_user_override(user_id, permission_id));
        assert_eq!(grants.user_override(user_id, permission_id), None);
    }

    #[test]
    fn references_detect_grants_and_overrides() {
        let grants = GrantSet::new(
            [RoleGrant {
                role_id: RoleId::new(2),
                permission_id: PermissionId::new(1),
            }],
            [UserOverride {
                user_id: UserId::new(9),
                permission_id: PermissionId::new(3),
                granted: false,
            }],
        );

        assert!(grants.references_role(RoleId::new(2)));
        assert!(!grants.references_role(RoleId::new(1)));
        assert!(!grants.references_role(RoleId::new(3)));
        assert!(grants.references_permission(PermissionId::new(1)));
        assert!(grants.references_permission(PermissionId::new(3)));
        assert!(!grants.references_permission(PermissionId::new(2)));
    }

    #[test]
    fn converged_toggle_reports_granted_state() {
        assert!(RoleGrantToggle::Granted.is_granted());
        assert!(RoleGrantToggle::Converged.is_granted());
        assert!(!RoleGrantToggle::Revoked.is_granted());
    }
}
