use accessgrid_core::{Actor, AppError};
use axum::extract::Request;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiResult;

/// Header carrying the caller identity, set by the upstream gateway.
pub const ACTOR_HEADER: &str = "x-actor-subject";

pub async fn require_actor(mut request: Request, next: Next) -> ApiResult<Response> {
    let actor = actor_from_headers(request.headers())?;

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

fn actor_from_headers(headers: &HeaderMap) -> Result<Actor, AppError> {
    let subject = headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("{ACTOR_HEADER} header is required")))?;

    Actor::new(subject)
        .map_err(|_| AppError::Unauthorized(format!("{ACTOR_HEADER} header must not be empty")))
}
