use serde::Serialize;
use ts_rs::TS;

mod policy;

pub use policy::{
    AuditLogEntryResponse, CreatePermissionRequest, CreateRoleRequest,
    PermissionCheckResponse, PermissionGrantResponse, PermissionMatrixResponse,
    PermissionResponse, RoleResponse, SetUserOverrideRequest,
    ToggleRoleGrantResponse, UserOverrideRemovalResponse, UserOverrideResponse,
};

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub storage: &'static str,
}

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    pub message: String,
}
