use accessgrid_domain::{
    NewPermission, NewRole, Permission, PermissionId, Role, RoleId, SystemCatalogSeed,
};
use tracing::info;

use crate::policy_ports::{CreatePermissionInput, CreateRoleInput, SeedReport};

use super::*;

impl PolicyService {
    /// Lists permissions ordered by resource, then action.
    pub async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        self.catalog_repository.list_permissions().await
    }

    /// Lists roles ordered by name.
    pub async fn list_roles(&self) -> AppResult<Vec<Role>> {
        self.catalog_repository.list_roles().await
    }

    /// Adds a permission to the catalog and emits an audit event.
    pub async fn create_permission(
        &self,
        actor: &Actor,
        input: CreatePermissionInput,
    ) -> AppResult<Permission> {
        let permission = NewPermission::new(
            input.name,
            input.description,
            input.resource,
            input.action,
        )?;
        let permission = self
            .catalog_repository
            .create_permission(permission)
            .await?;

        info!(
            permission_id = %permission.id(),
            key = %permission.key(),
            "permission created"
        );

        self.append_audit_event(
            actor,
            AuditAction::PermissionCreated,
            "policy_permission",
            permission.id().to_string(),
            format!("created permission '{}'", permission.key()),
        )
        .await;

        Ok(permission)
    }

    /// Creates a custom role and emits an audit event.
    pub async fn create_role(&self, actor: &Actor, input: CreateRoleInput) -> AppResult<Role> {
        let role = NewRole::new(input.name, input.description)?;
        let role = self.catalog_repository.create_role(role).await?;

        info!(role_id = %role.id(), name = %role.name(), "role created");

        self.append_audit_event(
            actor,
            AuditAction::RoleCreated,
            "policy_role",
            role.id().to_string(),
            format!("created role '{}'", role.name()),
        )
        .await;

        Ok(role)
    }

    /// Removes a permission nothing references and emits an audit event.
    pub async fn delete_permission(
        &self,
        actor: &Actor,
        permission_id: PermissionId,
    ) -> AppResult<()> {
        let permission = self
            .catalog_repository
            .delete_permission(permission_id)
            .await?;

        info!(%permission_id, key = %permission.key(), "permission deleted");

        self.append_audit_event(
            actor,
            AuditAction::PermissionDeleted,
            "policy_permission",
            permission_id.to_string(),
            format!("deleted permission '{}'", permission.key()),
        )
        .await;

        Ok(())
    }

    /// Removes a custom role nothing references and emits an audit event.
    pub async fn delete_role(&self, actor: &Actor, role_id: RoleId) -> AppResult<()> {
        let role = self.catalog_repository.delete_role(role_id).await?;

        info!(%role_id, name = %role.name(), "role deleted");

        self.append_audit_event(
            actor,
            AuditAction::RoleDeleted,
            "policy_role",
            role_id.to_string(),
            format!("deleted role '{}'", role.name()),
        )
        .await;

        Ok(())
    }

    /// Seeds the standard system catalog; existing rows are left untouched.
    pub async fn seed_system_catalog(&self) -> AppResult<SeedReport> {
        let report = self
            .catalog_repository
            .ensure_system_catalog(&SystemCatalogSeed::standard())
            .await?;

        if report.is_empty() {
            return Ok(report);
        }

        info!(
            permissions_created = report.permissions_created,
            roles_created = report.roles_created,
            grants_created = report.grants_created,
            "system catalog seeded"
        );

        self.append_audit_event(
            &Actor::system(),
            AuditAction::SystemCatalogSeeded,
            "policy_catalog",
            "system".to_owned(),
            format!(
                "seeded {} permissions, {} roles, {} grants",
                report.permissions_created, report.roles_created, report.grants_created
            ),
        )
        .await;

        Ok(report)
    }
}
