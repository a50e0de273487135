use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use super::*;

#[async_trait]
impl AuditRepository for InMemoryPolicyStore {
    async fn append_event(&self, event: AuditEvent) -> AppResult<()> {
        let entry = AuditLogEntry {
            event_id: Uuid::new_v4().to_string(),
            subject: event.subject,
            action: event.action.as_str().to_owned(),
            resource_type: event.resource_type,
            resource_id: event.resource_id,
            detail: event.detail,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        };

        let mut state = self.state.write().await;
        if state.audit_entries.len() >= self.audit_capacity {
            state.audit_entries.pop_front();
        }
        state.audit_entries.push_back(entry);

        Ok(())
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryPolicyStore {
    async fn list_recent_entries(&self, query: AuditLogQuery) -> AppResult<Vec<AuditLogEntry>> {
        let state = self.state.read().await;

        Ok(state
            .audit_entries
            .iter()
            .rev()
            .filter(|entry| {
                query
                    .action
                    .as_deref()
                    .is_none_or(|action| entry.action == action)
                    && query
                        .subject
                        .as_deref()
                        .is_none_or(|subject| entry.subject == subject)
            })
            .skip(query.offset)
            .take(query.capped_limit())
            .cloned()
            .collect())
    }
}
