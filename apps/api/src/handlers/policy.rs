use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use accessgrid_application::{AuditLogQuery, CreatePermissionInput, CreateRoleInput};
use accessgrid_core::Actor;
use accessgrid_domain::{PermissionId, RoleId, UserId};

use crate::dto::{
    AuditLogEntryResponse, CreatePermissionRequest, CreateRoleRequest, PermissionCheckResponse,
    PermissionGrantResponse, PermissionMatrixResponse, PermissionResponse, RoleResponse,
    SetUserOverrideRequest, ToggleRoleGrantResponse, UserOverrideRemovalResponse,
    UserOverrideResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod audit;
mod catalog;
mod grants;
mod users;

#[cfg(test)]
mod tests;

pub use audit::list_audit_log_handler;
pub use catalog::{
    create_permission_handler, create_role_handler, delete_permission_handler,
    delete_role_handler, list_permissions_handler, list_roles_handler, matrix_handler,
};
pub use grants::{clear_user_override_handler, set_user_override_handler, toggle_role_grant_handler};
pub use users::{check_permission_handler, list_user_overrides_handler, user_permissions_handler};
