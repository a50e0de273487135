use std::sync::Arc;

use accessgrid_application::{
    AuditEvent, AuditLogQuery, AuditLogRepository, AuditRepository, CatalogRepository,
    CreatePermissionInput, GrantRepository, PolicyService,
};
use accessgrid_core::{Actor, AppError};
use accessgrid_domain::{
    AuditAction, GrantLookup, NewPermission, NewRole, Permission, Role, RoleGrantToggle,
    SystemCatalogSeed, UserId,
};

use super::InMemoryPolicyStore;
use crate::InMemoryUserDirectory;

async fn create_permission(
    store: &InMemoryPolicyStore,
    resource: &str,
    action: &str,
) -> Permission {
    let permission = NewPermission::new(format!("{resource} {action}"), "", resource, action)
        .unwrap_or_else(|_| unreachable!());
    store
        .create_permission(permission)
        .await
        .unwrap_or_else(|_| unreachable!())
}

async fn create_role(store: &InMemoryPolicyStore, name: &str) -> Role {
    let role = NewRole::new(name, "").unwrap_or_else(|_| unreachable!());
    store
        .create_role(role)
        .await
        .unwrap_or_else(|_| unreachable!())
}

#[tokio::test]
async fn catalog_lists_in_display_order() {
    let store = InMemoryPolicyStore::new();
    create_permission(&store, "process", "read").await;
    create_permission(&store, "document", "upload").await;
    let delete = create_permission(&store, "document", "delete").await;
    let reader = create_role(&store, "reader").await;
    create_role(&store, "admin").await;
    let toggled = store.toggle_role_grant(reader.id(), delete.id()).await;
    assert!(matches!(toggled, Ok(RoleGrantToggle::Granted)));

    let keys: Vec<String> = store
        .list_permissions()
        .await
        .unwrap_or_default()
        .iter()
        .map(Permission::key)
        .collect();
    assert_eq!(
        keys,
        vec!["document.delete", "document.upload", "process.read"]
    );

    let roles = store.list_roles().await.unwrap_or_default();
    assert_eq!(roles[0].name().as_str(), "admin");
    assert!(!roles[0].is_system());
}

#[tokio::test]
async fn duplicates_leave_catalog_unchanged() {
    let store = InMemoryPolicyStore::new();
    create_permission(&store, "documents", "delete").await;
    create_role(&store, "reader").await;

    let permission = store
        .create_permission(
            NewPermission::new("Other", "", "documents", "delete")
                .unwrap_or_else(|_| unreachable!()),
        )
        .await;
    let role = store
        .create_role(NewRole::new("reader", "").unwrap_or_else(|_| unreachable!()))
        .await;

    assert!(matches!(permission, Err(AppError::Duplicate(_))));
    assert!(matches!(role, Err(AppError::Duplicate(_))));
    assert_eq!(store.list_permissions().await.unwrap_or_default().len(), 1);
    assert_eq!(store.list_roles().await.unwrap_or_default().len(), 1);
}

#[tokio::test]
async fn toggle_parity_follows_call_count() {
    let store = InMemoryPolicyStore::new();
    let permission = create_permission(&store, "documents", "delete").await;
    let role = create_role(&store, "reader").await;

    let mut outcomes = Vec::new();
    for _ in 0..5 {
        let outcome = store.toggle_role_grant(role.id(), permission.id()).await;
        outcomes.push(outcome.unwrap_or_else(|_| unreachable!()));
    }

    assert_eq!(
        outcomes,
        vec![
            RoleGrantToggle::Granted,
            RoleGrantToggle::Revoked,
            RoleGrantToggle::Granted,
            RoleGrantToggle::Revoked,
            RoleGrantToggle::Granted,
        ]
    );
    let snapshot = store.load_snapshot().await.unwrap_or_default();
    assert!(snapshot.grants().has_role_grant(role.id(), permission.id()));
}

#[tokio::test]
async fn concurrent_toggles_serialize() {
    let store = Arc::new(InMemoryPolicyStore::new());
    let permission = create_permission(&store, "documents", "delete").await;
    let role = create_role(&store, "reader").await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            let role_id = role.id();
            let permission_id = permission.id();
            tokio::spawn(async move { store.toggle_role_grant(role_id, permission_id).await })
        })
        .collect();

    let mut granted = 0;
    for handle in handles {
        let outcome = handle
            .await
            .unwrap_or_else(|_| unreachable!())
            .unwrap_or_else(|_| unreachable!());
        if outcome.is_granted() {
            granted += 1;
        }
    }

    assert_eq!(granted, 4);
    let snapshot = store.load_snapshot().await.unwrap_or_default();
    assert_eq!(snapshot.grants().role_grants().count(), 0);
}

#[tokio::test]
async fn concurrent_override_upserts_keep_one_row() {
    let store = Arc::new(InMemoryPolicyStore::new());
    let permission = create_permission(&store, "documents", "delete").await;
    let user_id = UserId::new(3);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            let permission_id = permission.id();
            tokio::spawn(
                async move { store.set_user_override(user_id, permission_id, true).await },
            )
        })
        .collect();

    for handle in handles {
        let stored = handle.await.unwrap_or_else(|_| unreachable!());
        assert!(matches!(stored, Ok(true)));
    }

    let overrides = store.list_user_overrides(user_id).await.unwrap_or_default();
    assert_eq!(overrides.len(), 1);
}

#[tokio::test]
async fn mutations_reject_unknown_catalog_rows() {
    let store = InMemoryPolicyStore::new();
    let permission = create_permission(&store, "documents", "delete").await;
    let role = create_role(&store, "reader").await;

    let unknown_role = store
        .toggle_role_grant(accessgrid_domain::RoleId::new(99), permission.id())
        .await;
    let unknown_permission = store
        .toggle_role_grant(role.id(), accessgrid_domain::PermissionId::new(99))
        .await;
    let unknown_override = store
        .set_user_override(UserId::new(1), accessgrid_domain::PermissionId::new(99), true)
        .await;

    assert!(matches!(unknown_role, Err(AppError::NotFound(_))));
    assert!(matches!(unknown_permission, Err(AppError::NotFound(_))));
    assert!(matches!(unknown_override, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn referenced_rows_and_system_roles_are_protected() {
    let store = InMemoryPolicyStore::new();
    let seeded = store
        .ensure_system_catalog(&SystemCatalogSeed::standard())
        .await;
    assert!(seeded.is_ok());
    let permission = create_permission(&store, "documents", "archive").await;
    let role = create_role(&store, "archivist").await;

    let override_set = store
        .set_user_override(UserId::new(1), permission.id(), false)
        .await;
    assert!(override_set.is_ok());
    assert!(matches!(
        store.delete_permission(permission.id()).await,
        Err(AppError::Integrity(_))
    ));

    let admin = store
        .list_roles()
        .await
        .unwrap_or_default()
        .into_iter()
        .find(|role| role.name().as_str() == "admin")
        .unwrap_or_else(|| unreachable!());
    assert!(matches!(
        store.delete_role(admin.id()).await,
        Err(AppError::Integrity(_))
    ));

    assert!(store.delete_role(role.id()).await.is_ok());
    assert!(matches!(
        store.delete_role(role.id()).await,
        Err(AppError::NotFound(_))
    ));

    let cleared = store
        .clear_user_override(UserId::new(1), permission.id())
        .await;
    assert!(matches!(cleared, Ok(true)));
    assert!(store.delete_permission(permission.id()).await.is_ok());
}

#[tokio::test]
async fn seeding_preserves_admin_edits() {
    let store = InMemoryPolicyStore::new();
    let seed = SystemCatalogSeed::standard();

    let first = store.ensure_system_catalog(&seed).await.unwrap_or_default();
    assert_eq!(first.permissions_created, 19);
    assert_eq!(first.roles_created, 3);
    assert_eq!(first.grants_created, 33);

    let snapshot = store.load_snapshot().await.unwrap_or_default();
    let reader = snapshot
        .catalog()
        .role_by_name("reader")
        .map(Role::id)
        .unwrap_or_else(|| unreachable!());
    let analytics = snapshot
        .catalog()
        .permission_by_key("system", "analytics")
        .map(Permission::id)
        .unwrap_or_else(|| unreachable!());
    let revoked = store.toggle_role_grant(reader, analytics).await;
    assert!(matches!(revoked, Ok(RoleGrantToggle::Revoked)));

    let second = store.ensure_system_catalog(&seed).await.unwrap_or_default();
    assert!(second.is_empty());
    let snapshot = store.load_snapshot().await.unwrap_or_default();
    assert!(!snapshot.grants().has_role_grant(reader, analytics));
}

#[tokio::test]
async fn audit_entries_list_newest_first_with_filters() {
    let store = InMemoryPolicyStore::new();

    for (subject, action) in [
        ("alice", AuditAction::PermissionCreated),
        ("bob", AuditAction::RoleCreated),
        ("alice", AuditAction::RoleGrantToggled),
    ] {
        let appended = store
            .append_event(AuditEvent {
                subject: subject.to_owned(),
                action,
                resource_type: "policy".to_owned(),
                resource_id: "1".to_owned(),
                detail: None,
            })
            .await;
        assert!(appended.is_ok());
    }

    let all = store
        .list_recent_entries(AuditLogQuery::default())
        .await
        .unwrap_or_default();
    let actions: Vec<&str> = all.iter().map(|entry| entry.action.as_str()).collect();
    assert_eq!(
        actions,
        vec![
            "policy.role_grant.toggled",
            "policy.role.created",
            "policy.permission.created",
        ]
    );

    let alice = store
        .list_recent_entries(AuditLogQuery {
            subject: Some("alice".to_owned()),
            limit: 1,
            ..AuditLogQuery::default()
        })
        .await
        .unwrap_or_default();
    assert_eq!(alice.len(), 1);
    assert_eq!(alice[0].action, "policy.role_grant.toggled");
}

#[tokio::test]
async fn audit_trail_evicts_oldest_entries_beyond_capacity() {
    let store = InMemoryPolicyStore::with_audit_capacity(3);

    for resource_id in 1..=5 {
        let appended = store
            .append_event(AuditEvent {
                subject: "alice".to_owned(),
                action: AuditAction::RoleGrantToggled,
                resource_type: "policy_role_grant".to_owned(),
                resource_id: resource_id.to_string(),
                detail: None,
            })
            .await;
        assert!(appended.is_ok());
    }

    let entries = store
        .list_recent_entries(AuditLogQuery::default())
        .await
        .unwrap_or_default();
    let resource_ids: Vec<&str> = entries
        .iter()
        .map(|entry| entry.resource_id.as_str())
        .collect();
    assert_eq!(resource_ids, vec!["5", "4", "3"]);
}

#[tokio::test]
async fn documents_delete_scenario_through_service() {
    let store = Arc::new(InMemoryPolicyStore::new());
    let users = Arc::new(InMemoryUserDirectory::new());
    let service = PolicyService::new(
        store.clone(),
        store.clone(),
        users.clone(),
        store.clone(),
        store,
    );
    let actor = Actor::new("alice").unwrap_or_else(|_| unreachable!());

    let permission = service
        .create_permission(
            &actor,
            CreatePermissionInput {
                name: "Delete documents".to_owned(),
                description: String::new(),
                resource: "documents".to_owned(),
                action: "delete".to_owned(),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    let reader = service
        .create_role(
            &actor,
            accessgrid_application::CreateRoleInput {
                name: "reader".to_owned(),
                description: String::new(),
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    let user = UserId::new(1);
    let colleague = UserId::new(2);
    users.upsert_user(user, Some(reader.id())).await;
    users.upsert_user(colleague, Some(reader.id())).await;

    assert!(!service.is_allowed(user, "documents", "delete").await);

    let set = service
        .set_user_override(&actor, user, permission.id(), true)
        .await;
    assert!(matches!(set, Ok(true)));
    assert!(service.is_allowed(user, "documents", "delete").await);
    assert!(!service.is_allowed(colleague, "documents", "delete").await);

    let toggled = service
        .toggle_role_grant(&actor, reader.id(), permission.id())
        .await;
    assert!(matches!(toggled, Ok(true)));
    assert!(service.is_allowed(user, "documents", "delete").await);
    assert!(service.is_allowed(colleague, "documents", "delete").await);

    let denied = service
        .set_user_override(&actor, user, permission.id(), false)
        .await;
    assert!(matches!(denied, Ok(false)));
    assert!(!service.is_allowed(user, "documents", "delete").await);

    let view = service.get_user_view(user).await.unwrap_or_default();
    assert_eq!(view.len(), 1);
    assert!(!view[0].granted);

    let matrix = service.get_matrix().await.unwrap_or_else(|_| unreachable!());
    assert!(matrix.matrix[0].grants[0].granted);

    let audit = service
        .list_audit_log(AuditLogQuery::default())
        .await
        .unwrap_or_default();
    assert_eq!(audit.len(), 5);
    assert!(audit.iter().all(|entry| entry.subject == "alice"));
}
