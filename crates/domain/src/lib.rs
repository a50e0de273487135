//! Domain entities, invariants and pure policy evaluation.

#![forbid(unsafe_code)]

mod audit;
mod catalog;
mod grants;
mod matrix;
mod policy;
mod resolver;
mod seed;
mod user;

pub use audit::AuditAction;
pub use catalog::{Catalog, NewPermission, NewRole, Permission, PermissionId, Role, RoleId};
pub use grants::{GrantLookup, GrantSet, RoleGrant, RoleGrantToggle, UserOverride};
pub use matrix::{PermissionGrant, PermissionMatrix, RoleRow, build_matrix, build_user_view};
pub use policy::PolicySnapshot;
pub use resolver::{Decision, DecisionSource, effective, effective_set, resolve};
pub use seed::{SeedPermission, SeedRole, SystemCatalogSeed};
pub use user::{UserId, UserRef};
