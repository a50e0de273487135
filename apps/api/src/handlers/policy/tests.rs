use accessgrid_core::AppError;
use serde_json::json;

use super::audit::AuditLogParams;
use super::users::PermissionCheckQuery;
use super::*;
use crate::api_services::build_memory_state;

async fn seeded_state() -> AppState {
    build_memory_state(true)
        .await
        .unwrap_or_else(|_| unreachable!())
}

fn admin() -> Extension<Actor> {
    Extension(Actor::new("alice").unwrap_or_else(|_| unreachable!()))
}

async fn permission_id(state: &AppState, resource: &str, action: &str) -> i64 {
    let Json(permissions) = list_permissions_handler(State(state.clone()))
        .await
        .unwrap_or_else(|_| unreachable!());

    permissions
        .into_iter()
        .find(|permission| permission.resource == resource && permission.action == action)
        .map(|permission| permission.id)
        .unwrap_or_else(|| unreachable!())
}

async fn role_id(state: &AppState, name: &str) -> i64 {
    let Json(roles) = list_roles_handler(State(state.clone()))
        .await
        .unwrap_or_else(|_| unreachable!());

    roles
        .into_iter()
        .find(|role| role.name == name)
        .map(|role| role.id)
        .unwrap_or_else(|| unreachable!())
}

async fn check(state: &AppState, user_id: i64, resource: &str, action: &str) -> bool {
    let Json(response) = check_permission_handler(
        State(state.clone()),
        Path(user_id),
        Query(PermissionCheckQuery {
            resource: resource.to_owned(),
            action: action.to_owned(),
        }),
    )
    .await;

    response.allowed
}

#[tokio::test]
async fn create_permission_returns_created_with_key() {
    let state = seeded_state().await;

    let (status, Json(permission)) = create_permission_handler(
        State(state.clone()),
        admin(),
        Json(CreatePermissionRequest {
            name: "Archive documents".to_owned(),
            description: None,
            resource: "document".to_owned(),
            action: "archive".to_owned(),
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(permission.key, "document.archive");
    assert_eq!(permission.description, "");

    let payload = serde_json::to_value(&permission).unwrap_or_else(|_| unreachable!());
    assert_eq!(payload["resource"], json!("document"));
    assert_eq!(payload["id"], json!(permission.id));
}

#[tokio::test]
async fn duplicate_permission_is_rejected() {
    let state = seeded_state().await;

    let result = create_permission_handler(
        State(state),
        admin(),
        Json(CreatePermissionRequest {
            name: "Read documents again".to_owned(),
            description: Some("duplicate key".to_owned()),
            resource: "document".to_owned(),
            action: "read".to_owned(),
        }),
    )
    .await;

    assert!(matches!(result, Err(error) if matches!(error.0, AppError::Duplicate(_))));
}

#[tokio::test]
async fn toggle_flips_check_for_role_members() {
    let state = seeded_state().await;
    let reader = role_id(&state, "reader").await;
    let delete_documents = permission_id(&state, "document", "delete").await;

    assert!(!check(&state, 3, "document", "delete").await);

    let Json(first) = toggle_role_grant_handler(
        State(state.clone()),
        admin(),
        Path((reader, delete_documents)),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert!(first.granted);
    assert!(check(&state, 3, "document", "delete").await);

    let Json(second) = toggle_role_grant_handler(
        State(state.clone()),
        admin(),
        Path((reader, delete_documents)),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert!(!second.granted);
    assert!(!check(&state, 3, "document", "delete").await);
}

#[tokio::test]
async fn override_routes_set_list_and_clear() {
    let state = seeded_state().await;
    let read_documents = permission_id(&state, "document", "read").await;

    let Json(created) = set_user_override_handler(
        State(state.clone()),
        admin(),
        Path((3, read_documents)),
        Json(SetUserOverrideRequest { granted: false }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert!(!created.granted);
    assert!(!check(&state, 3, "document", "read").await);

    let Json(overrides) = list_user_overrides_handler(State(state.clone()), Path(3))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(overrides.len(), 1);
    assert_eq!(overrides[0].permission_id, read_documents);

    let Json(removal) = clear_user_override_handler(
        State(state.clone()),
        admin(),
        Path((3, read_documents)),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert!(removal.removed);
    assert!(check(&state, 3, "document", "read").await);

    let Json(second_removal) =
        clear_user_override_handler(State(state.clone()), admin(), Path((3, read_documents)))
            .await
            .unwrap_or_else(|_| unreachable!());
    assert!(!second_removal.removed);
}

#[tokio::test]
async fn unknown_user_is_not_found_but_check_denies() {
    let state = seeded_state().await;
    let read_documents = permission_id(&state, "document", "read").await;

    let view = user_permissions_handler(State(state.clone()), Path(404)).await;
    assert!(matches!(view, Err(error) if matches!(error.0, AppError::NotFound(_))));

    let override_result = set_user_override_handler(
        State(state.clone()),
        admin(),
        Path((404, read_documents)),
        Json(SetUserOverrideRequest { granted: true }),
    )
    .await;
    assert!(matches!(override_result, Err(error) if matches!(error.0, AppError::NotFound(_))));

    assert!(!check(&state, 404, "document", "read").await);
    assert!(!check(&state, 1, "document", "shred").await);
}

#[tokio::test]
async fn matrix_and_user_view_follow_catalog_order() {
    let state = seeded_state().await;

    let Json(matrix) = matrix_handler(State(state.clone()))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(matrix.permissions.len(), 19);
    assert_eq!(matrix.roles.len(), 3);
    assert_eq!(matrix.matrix.len(), 3);
    for row in &matrix.matrix {
        let ids: Vec<i64> = row.grants.iter().map(|grant| grant.permission.id).collect();
        let catalog_ids: Vec<i64> = matrix
            .permissions
            .iter()
            .map(|permission| permission.id)
            .collect();
        assert_eq!(ids, catalog_ids);
    }

    let Json(view) = user_permissions_handler(State(state.clone()), Path(3))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(view.len(), 19);
    assert_eq!(view.iter().filter(|grant| grant.granted).count(), 4);
}

#[tokio::test]
async fn custom_role_lifecycle_and_protections() {
    let state = seeded_state().await;

    let (status, Json(role)) = create_role_handler(
        State(state.clone()),
        admin(),
        Json(CreateRoleRequest {
            name: "auditor".to_owned(),
            description: Some("Reviews reports".to_owned()),
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert_eq!(status, StatusCode::CREATED);
    assert!(!role.is_system);

    let status = delete_role_handler(State(state.clone()), admin(), Path(role.id))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(status, StatusCode::NO_CONTENT);

    let reader = role_id(&state, "reader").await;
    let system_role = delete_role_handler(State(state.clone()), admin(), Path(reader)).await;
    assert!(matches!(system_role, Err(error) if matches!(error.0, AppError::Integrity(_))));

    let read_documents = permission_id(&state, "document", "read").await;
    let granted_permission =
        delete_permission_handler(State(state.clone()), admin(), Path(read_documents)).await;
    assert!(
        matches!(granted_permission, Err(error) if matches!(error.0, AppError::Integrity(_)))
    );
}

#[tokio::test]
async fn audit_log_lists_newest_first_with_filters() {
    let state = seeded_state().await;
    let reader = role_id(&state, "reader").await;
    let delete_documents = permission_id(&state, "document", "delete").await;

    for _ in 0..2 {
        toggle_role_grant_handler(
            State(state.clone()),
            admin(),
            Path((reader, delete_documents)),
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    }

    let Json(entries) = list_audit_log_handler(
        State(state.clone()),
        Query(AuditLogParams {
            limit: Some(10),
            offset: None,
            action: Some("policy.role_grant.toggled".to_owned()),
            subject: Some("alice".to_owned()),
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.subject == "alice"));
    assert!(entries[0].created_at >= entries[1].created_at);

    let Json(nobody) = list_audit_log_handler(
        State(state),
        Query(AuditLogParams {
            limit: None,
            offset: None,
            action: None,
            subject: Some("mallory".to_owned()),
        }),
    )
    .await
    .unwrap_or_else(|_| unreachable!());
    assert!(nobody.is_empty());
}
