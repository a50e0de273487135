use super::*;

pub async fn list_permissions_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .policy_service
        .list_permissions()
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn create_permission_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreatePermissionRequest>,
) -> ApiResult<(StatusCode, Json<PermissionResponse>)> {
    let permission = state
        .policy_service
        .create_permission(
            &actor,
            CreatePermissionInput {
                name: payload.name,
                description: payload.description.unwrap_or_default(),
                resource: payload.resource,
                action: payload.action,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PermissionResponse::from(permission))))
}

pub async fn delete_permission_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(permission_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .policy_service
        .delete_permission(&actor, PermissionId::new(permission_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn matrix_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<PermissionMatrixResponse>> {
    let matrix = state.policy_service.get_matrix().await?;

    Ok(Json(PermissionMatrixResponse::from(matrix)))
}

pub async fn list_roles_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<RoleResponse>>> {
    let roles = state
        .policy_service
        .list_roles()
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn create_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<CreateRoleRequest>,
) -> ApiResult<(StatusCode, Json<RoleResponse>)> {
    let role = state
        .policy_service
        .create_role(
            &actor,
            CreateRoleInput {
                name: payload.name,
                description: payload.description.unwrap_or_default(),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(RoleResponse::from(role))))
}

pub async fn delete_role_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(role_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .policy_service
        .delete_role(&actor, RoleId::new(role_id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
