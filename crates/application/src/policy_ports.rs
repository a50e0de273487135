mod audit;
mod catalog;
mod grants;
mod users;

pub use audit::{AuditEvent, AuditLogEntry, AuditLogQuery, AuditLogRepository, AuditRepository};
pub use catalog::{CatalogRepository, CreatePermissionInput, CreateRoleInput, SeedReport};
pub use grants::GrantRepository;
pub use users::UserDirectory;
