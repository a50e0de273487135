use accessgrid_application::{AuditEvent, AuditLogQuery, AuditLogRepository, AuditRepository};
use accessgrid_domain::AuditAction;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresAuditLogRepository;
use crate::PostgresAuditRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres audit log tests: {error}");
    }

    Some(pool)
}

#[tokio::test]
async fn entries_filter_by_subject_and_action() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let writer = PostgresAuditRepository::new(pool.clone());
    let reader = PostgresAuditLogRepository::new(pool);
    let subject = format!("auditor-{}", uuid::Uuid::new_v4());

    for action in [AuditAction::RoleCreated, AuditAction::RoleGrantToggled] {
        let appended = writer
            .append_event(AuditEvent {
                subject: subject.clone(),
                action,
                resource_type: "policy_role".to_owned(),
                resource_id: "1".to_owned(),
                detail: None,
            })
            .await;
        assert!(appended.is_ok());
    }

    let all = reader
        .list_recent_entries(AuditLogQuery {
            subject: Some(subject.clone()),
            ..AuditLogQuery::default()
        })
        .await
        .unwrap_or_default();
    assert_eq!(all.len(), 2);

    let toggles = reader
        .list_recent_entries(AuditLogQuery {
            subject: Some(subject),
            action: Some(AuditAction::RoleGrantToggled.as_str().to_owned()),
            ..AuditLogQuery::default()
        })
        .await
        .unwrap_or_default();
    assert_eq!(toggles.len(), 1);
    assert_eq!(toggles[0].action, "policy.role_grant.toggled");
    assert!(toggles[0].created_at.ends_with('Z'));
}
