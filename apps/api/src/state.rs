use accessgrid_application::PolicyService;
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub policy_service: PolicyService,
    pub postgres_pool: Option<PgPool>,
}
