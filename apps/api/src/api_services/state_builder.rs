use std::sync::Arc;

use accessgrid_application::PolicyService;
use accessgrid_core::AppResult;
use accessgrid_domain::{RoleId, UserId};
use accessgrid_infrastructure::{
    InMemoryPolicyStore, InMemoryUserDirectory, PostgresAuditLogRepository,
    PostgresAuditRepository, PostgresCatalogRepository, PostgresGrantRepository,
    PostgresUserDirectory,
};
use sqlx::PgPool;
use tracing::info;

use crate::state::AppState;

/// Demo users registered by the memory backend, bound to system roles by name.
const MEMORY_DEMO_USERS: [(i64, &str); 3] = [(1, "admin"), (2, "contributor"), (3, "reader")];

pub fn build_postgres_state(pool: PgPool) -> AppState {
    let policy_service = PolicyService::new(
        Arc::new(PostgresCatalogRepository::new(pool.clone())),
        Arc::new(PostgresGrantRepository::new(pool.clone())),
        Arc::new(PostgresUserDirectory::new(pool.clone())),
        Arc::new(PostgresAuditRepository::new(pool.clone())),
        Arc::new(PostgresAuditLogRepository::new(pool.clone())),
    );

    AppState {
        policy_service,
        postgres_pool: Some(pool),
    }
}

/// Builds a process-local state. Demo users are bound to seeded roles once they exist.
pub async fn build_memory_state(seed_system_catalog: bool) -> AppResult<AppState> {
    let store = Arc::new(InMemoryPolicyStore::new());
    let user_directory = Arc::new(InMemoryUserDirectory::new());
    let policy_service = PolicyService::new(
        store.clone(),
        store.clone(),
        user_directory.clone(),
        store.clone(),
        store,
    );

    if seed_system_catalog {
        let report = policy_service.seed_system_catalog().await?;
        info!(
            permissions = report.permissions_created,
            roles = report.roles_created,
            grants = report.grants_created,
            "seeded system catalog"
        );
    }

    let roles = policy_service.list_roles().await?;
    for (user_id, role_name) in MEMORY_DEMO_USERS {
        let role_id: Option<RoleId> = roles
            .iter()
            .find(|role| role.name().as_str() == role_name)
            .map(|role| role.id());
        user_directory
            .upsert_user(UserId::new(user_id), role_id)
            .await;
    }
    info!(users = MEMORY_DEMO_USERS.len(), "registered memory demo users");

    Ok(AppState {
        policy_service,
        postgres_pool: None,
    })
}
