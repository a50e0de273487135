//! Application services and ports.

#![forbid(unsafe_code)]

mod policy_ports;
mod policy_service;

pub use policy_ports::{
    AuditEvent, AuditLogEntry, AuditLogQuery, AuditLogRepository, AuditRepository,
    CatalogRepository, CreatePermissionInput, CreateRoleInput, GrantRepository, SeedReport,
    UserDirectory,
};
pub use policy_service::PolicyService;
