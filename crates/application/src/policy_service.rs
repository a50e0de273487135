use std::sync::Arc;

use accessgrid_core::{Actor, AppError, AppResult};
use accessgrid_domain::{AuditAction, UserId, UserRef};
use tracing::error;

use crate::policy_ports::{
    AuditEvent, AuditLogRepository, AuditRepository, CatalogRepository, GrantRepository,
    UserDirectory,
};

mod audit_log;
mod catalog;
mod grants;
mod resolution;


/// Application service for permission resolution and policy administration.
#[derive(Clone)]
pub struct PolicyService {
    catalog_repository: Arc<dyn CatalogRepository>,
    grant_repository: Arc<dyn GrantRepository>,
    user_directory: Arc<dyn UserDirectory>,
    audit_repository: Arc<dyn AuditRepository>,
    audit_log_repository: Arc<dyn AuditLogRepository>,
}

impl PolicyService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        catalog_repository: Arc<dyn CatalogRepository>,
        grant_repository: Arc<dyn GrantRepository>,
        user_directory: Arc<dyn UserDirectory>,
        audit_repository: Arc<dyn AuditRepository>,
        audit_log_repository: Arc<dyn AuditLogRepository>,
    ) -> Self {
        Self {
            catalog_repository,
            grant_repository,
            user_directory,
            audit_repository,
            audit_log_repository,
        }
    }

    async fn require_user(&self, user_id: UserId) -> AppResult<UserRef> {
        self.user_directory
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' was not found")))
    }

    /// Records an audit event for a mutation that has already committed.
    ///
    /// Failures are logged, never returned to the caller.
    async fn append_audit_event(
        &self,
        actor: &Actor,
        action: AuditAction,
        resource_type: &str,
        resource_id: String,
        detail: String,
    ) {
        let result = self
            .audit_repository
            .append_event(AuditEvent {
                subject: actor.subject().to_owned(),
                action,
                resource_type: resource_type.to_owned(),
                resource_id: resource_id.clone(),
                detail: Some(detail),
            })
            .await;

        if let Err(failure) = result {
            error!(
                action = action.as_str(),
                resource_type,
                resource_id = %resource_id,
                error = %failure,
                "failed to record audit event for committed mutation"
            );
        }
    }
}
