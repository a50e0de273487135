use super::*;

pub async fn toggle_role_grant_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((role_id, permission_id)): Path<(i64, i64)>,
) -> ApiResult<Json<ToggleRoleGrantResponse>> {
    let granted = state
        .policy_service
        .toggle_role_grant(&actor, RoleId::new(role_id), PermissionId::new(permission_id))
        .await?;

    Ok(Json(ToggleRoleGrantResponse { granted }))
}

pub async fn set_user_override_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((user_id, permission_id)): Path<(i64, i64)>,
    Json(payload): Json<SetUserOverrideRequest>,
) -> ApiResult<Json<UserOverrideResponse>> {
    let granted = state
        .policy_service
        .set_user_override(
            &actor,
            UserId::new(user_id),
            PermissionId::new(permission_id),
            payload.granted,
        )
        .await?;

    Ok(Json(UserOverrideResponse {
        user_id,
        permission_id,
        granted,
    }))
}

pub async fn clear_user_override_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((user_id, permission_id)): Path<(i64, i64)>,
) -> ApiResult<Json<UserOverrideRemovalResponse>> {
    let removed = state
        .policy_service
        .clear_user_override(
            &actor,
            UserId::new(user_id),
            PermissionId::new(permission_id),
        )
        .await?;

    Ok(Json(UserOverrideRemovalResponse { removed }))
}
