use super::*;

#[derive(Debug, Deserialize)]
pub struct PermissionCheckQuery {
    pub resource: String,
    pub action: String,
}

pub async fn user_permissions_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<PermissionGrantResponse>>> {
    let view = state
        .policy_service
        .get_user_view(UserId::new(user_id))
        .await?
        .into_iter()
        .map(PermissionGrantResponse::from)
        .collect();

    Ok(Json(view))
}

/// Never fails: unknown users, unknown permissions and storage errors deny.
pub async fn check_permission_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Query(query): Query<PermissionCheckQuery>,
) -> Json<PermissionCheckResponse> {
    let allowed = state
        .policy_service
        .is_allowed(
            UserId::new(user_id),
            query.resource.trim(),
            query.action.trim(),
        )
        .await;

    Json(PermissionCheckResponse { allowed })
}

pub async fn list_user_overrides_handler(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<UserOverrideResponse>>> {
    let overrides = state
        .policy_service
        .list_user_overrides(UserId::new(user_id))
        .await?
        .into_iter()
        .map(UserOverrideResponse::from)
        .collect();

    Ok(Json(overrides))
}
