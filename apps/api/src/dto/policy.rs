use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// Incoming payload for adding a permission to the catalog.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-permission-request.ts"
)]
pub struct CreatePermissionRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub resource: String,
    pub action: String,
}

/// Incoming payload for custom role creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/create-role-request.ts"
)]
pub struct CreateRoleRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Incoming payload for per-user overrides.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/set-user-override-request.ts"
)]
pub struct SetUserOverrideRequest {
    pub granted: bool,
}

/// API representation of a catalog permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub resource: String,
    pub action: String,
    pub key: String,
}

/// API representation of a catalog role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub is_system: bool,
}

/// Permission annotated with a grant flag.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-grant-response.ts"
)]
pub struct PermissionGrantResponse {
    pub permission: PermissionResponse,
    pub granted: bool,
}

/// One matrix row: a role and its default grant per permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/role-row-response.ts"
)]
pub struct RoleRowResponse {
    pub role: RoleResponse,
    pub grants: Vec<PermissionGrantResponse>,
}

/// Role × permission matrix of role defaults.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-matrix-response.ts"
)]
pub struct PermissionMatrixResponse {
    pub permissions: Vec<PermissionResponse>,
    pub roles: Vec<RoleResponse>,
    pub matrix: Vec<RoleRowResponse>,
}

/// Grant state after a toggle.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/toggle-role-grant-response.ts"
)]
pub struct ToggleRoleGrantResponse {
    pub granted: bool,
}

/// API representation of a per-user override.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-override-response.ts"
)]
pub struct UserOverrideResponse {
    pub user_id: i64,
    pub permission_id: i64,
    pub granted: bool,
}

/// Result of clearing a per-user override.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/user-override-removal-response.ts"
)]
pub struct UserOverrideRemovalResponse {
    pub removed: bool,
}

/// Access decision for one resource and action.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/permission-check-response.ts"
)]
pub struct PermissionCheckResponse {
    pub allowed: bool,
}

/// API representation of a policy audit entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/audit-log-entry-response.ts"
)]
pub struct AuditLogEntryResponse {
    pub event_id: String,
    pub subject: String,
    pub action: String,
    pub resource_type: String,
    pub resource_id: String,
    pub detail: Option<String>,
    pub created_at: String,
}
