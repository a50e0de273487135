use accessgrid_application::AuditLogEntry;
use accessgrid_domain::{
    Permission, PermissionGrant, PermissionMatrix, Role, RoleRow, UserOverride,
};

use super::{
    AuditLogEntryResponse, PermissionGrantResponse, PermissionMatrixResponse, PermissionResponse,
    RoleResponse, RoleRowResponse, UserOverrideResponse,
};

impl From<Permission> for PermissionResponse {
    fn from(value: Permission) -> Self {
        Self {
            id: value.id().as_i64(),
            key: value.key(),
            name: value.name().as_str().to_owned(),
            description: value.description().to_owned(),
            resource: value.resource().as_str().to_owned(),
            action: value.action().as_str().to_owned(),
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(value: Role) -> Self {
        Self {
            id: value.id().as_i64(),
            name: value.name().as_str().to_owned(),
            description: value.description().to_owned(),
            is_system: value.is_system(),
        }
    }
}

impl From<PermissionGrant> for PermissionGrantResponse {
    fn from(value: PermissionGrant) -> Self {
        Self {
            permission: PermissionResponse::from(value.permission),
            granted: value.granted,
        }
    }
}

impl From<RoleRow> for RoleRowResponse {
    fn from(value: RoleRow) -> Self {
        Self {
            role: RoleResponse::from(value.role),
            grants: value
                .grants
                .into_iter()
                .map(PermissionGrantResponse::from)
                .collect(),
        }
    }
}

impl From<PermissionMatrix> for PermissionMatrixResponse {
    fn from(value: PermissionMatrix) -> Self {
        Self {
            permissions: value
                .permissions
                .into_iter()
                .map(PermissionResponse::from)
                .collect(),
            roles: value.roles.into_iter().map(RoleResponse::from).collect(),
            matrix: value.matrix.into_iter().map(RoleRowResponse::from).collect(),
        }
    }
}

impl From<UserOverride> for UserOverrideResponse {
    fn from(value: UserOverride) -> Self {
        Self {
            user_id: value.user_id.as_i64(),
            permission_id: value.permission_id.as_i64(),
            granted: value.granted,
        }
    }
}

impl From<AuditLogEntry> for AuditLogEntryResponse {
    fn from(value: AuditLogEntry) -> Self {
        Self {
            event_id: value.event_id,
            subject: value.subject,
            action: value.action,
            resource_type: value.resource_type,
            resource_id: value.resource_id,
            detail: value.detail,
            created_at: value.created_at,
        }
    }
}
