//! Accessgrid API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use accessgrid_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, StorageConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let app_state = match &config.storage {
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = api_services::connect_and_migrate(database_url, *max_connections).await?;

            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }

            let app_state = api_services::build_postgres_state(pool);
            if config.seed_system_catalog {
                seed_system_catalog(&app_state).await?;
            }
            app_state
        }
        StorageConfig::Memory => {
            info!("using in-memory policy store; state is lost on restart");
            api_services::build_memory_state(config.seed_system_catalog).await?
        }
    };

    let app = api_router::build_router(app_state, &config.frontend_url)?;
    let address = config.socket_address()?;

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "accessgrid-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}

async fn seed_system_catalog(app_state: &AppState) -> Result<(), AppError> {
    let report = app_state.policy_service.seed_system_catalog().await?;
    if report.is_empty() {
        info!("system catalog already seeded");
    } else {
        info!(
            permissions = report.permissions_created,
            roles = report.roles_created,
            grants = report.grants_created,
            "seeded system catalog"
        );
    }

    Ok(())
}
