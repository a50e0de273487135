use crate::policy_ports::{AuditLogEntry, AuditLogQuery};

use super::*;

impl PolicyService {
    /// Returns recent policy audit entries, newest first.
    pub async fn list_audit_log(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        self.audit_log_repository.list_recent_entries(query).await
    }
}
