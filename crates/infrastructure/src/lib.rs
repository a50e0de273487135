//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_policy_store;
mod in_memory_user_directory;
mod postgres_audit_log_repository;
mod postgres_audit_repository;
mod postgres_catalog_repository;
mod postgres_errors;
mod postgres_grant_repository;
mod postgres_user_directory;

pub use in_memory_policy_store::{DEFAULT_AUDIT_CAPACITY, InMemoryPolicyStore};
pub use in_memory_user_directory::InMemoryUserDirectory;
pub use postgres_audit_log_repository::PostgresAuditLogRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_catalog_repository::PostgresCatalogRepository;
pub use postgres_grant_repository::PostgresGrantRepository;
pub use postgres_user_directory::PostgresUserDirectory;
