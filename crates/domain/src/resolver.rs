//! Effective permission resolution.
//!
//! Precedence is override, then role default, then deny. Resolution is pure
//! and never fails: anything that cannot be resolved is a denial.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{Catalog, GrantLookup, PermissionId, UserRef};

/// Which tier of the precedence chain produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// A per-user override decided.
    Override,
    /// The user's role default decided.
    Role,
    /// Nothing applied, so the request was denied.
    Default,
}

impl DecisionSource {
    /// Returns a stable label for logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Override => "override",
            Self::Role => "role",
            Self::Default => "default",
        }
    }
}

/// Grant or deny decision with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Final decision.
    pub granted: bool,
    /// Tier that produced the decision.
    pub source: DecisionSource,
}

impl Decision {
    const DENY: Self = Self {
        granted: false,
        source: DecisionSource::Default,
    };
}

/// Resolves a decision for one user and permission.
#[must_use]
pub fn resolve(
    catalog: &Catalog,
    grants: &impl GrantLookup,
    user: &UserRef,
    permission_id: PermissionId,
) -> Decision {
    if catalog.permission(permission_id).is_none() {
        return Decision::DENY;
    }

    if let Some(granted) = grants.user_override(user.id(), permission_id) {
        return Decision {
            granted,
            source: DecisionSource::Override,
        };
    }

    match user.role_id().and_then(|role_id| catalog.role(role_id)) {
        Some(role) => Decision {
            granted: grants.has_role_grant(role.id(), permission_id),
            source: DecisionSource::Role,
        },
        None => Decision::DENY,
    }
}

/// Returns the effective decision for one user and permission.
#[must_use]
pub fn effective(
    catalog: &Catalog,
    grants: &impl GrantLookup,
    user: &UserRef,
    permission_id: PermissionId,
) -> bool {
    resolve(catalog, grants, user, permission_id).granted
}

/// Returns every permission the user is effectively granted.
#[must_use]
pub fn effective_set(
    catalog: &Catalog,
    grants: &impl GrantLookup,
    user: &UserRef,
) -> BTreeSet<PermissionId> {
    catalog
        .permissions()
        .iter()
        .map(|permission| permission.id())
        .filter(|permission_id| effective(catalog, grants, user, *permission_id))
        .collect()
}
