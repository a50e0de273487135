use accessgrid_core::AppError;
use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, policy};
use crate::middleware;
use crate::state::AppState;

mod cors;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let protected_routes = Router::new()
        .route(
            "/api/permissions",
            get(policy::list_permissions_handler).post(policy::create_permission_handler),
        )
        .route(
            "/api/permissions/{permission_id}",
            delete(policy::delete_permission_handler),
        )
        .route(
            "/api/roles",
            get(policy::list_roles_handler).post(policy::create_role_handler),
        )
        .route("/api/roles/{role_id}", delete(policy::delete_role_handler))
        .route(
            "/api/roles/{role_id}/permissions/{permission_id}/toggle",
            post(policy::toggle_role_grant_handler),
        )
        .route("/api/permissions/matrix", get(policy::matrix_handler))
        .route(
            "/api/users/{user_id}/permissions",
            get(policy::user_permissions_handler),
        )
        .route(
            "/api/users/{user_id}/permissions/check",
            get(policy::check_permission_handler),
        )
        .route(
            "/api/users/{user_id}/overrides",
            get(policy::list_user_overrides_handler),
        )
        .route(
            "/api/users/{user_id}/overrides/{permission_id}",
            put(policy::set_user_override_handler).delete(policy::clear_user_override_handler),
        )
        .route("/api/audit-log", get(policy::list_audit_log_handler))
        .route_layer(from_fn(middleware::require_actor));

    Ok(Router::new()
        .route("/health", get(health::health_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}
