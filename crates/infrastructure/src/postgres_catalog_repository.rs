use async_trait::async_trait;
use sqlx::{FromRow, PgExecutor, PgPool};

use accessgrid_application::{CatalogRepository, SeedReport};
use accessgrid_core::{AppError, AppResult};
use accessgrid_domain::{
    NewPermission, NewRole, Permission, PermissionId, Role, RoleId, SystemCatalogSeed,
};

use crate::postgres_errors::{
    begin_error, commit_error, is_foreign_key_violation, is_unique_violation, map_sqlx_error,
};

mod seed;

/// PostgreSQL-backed repository for the permission and role catalog.
#[derive(Clone)]
pub struct PostgresCatalogRepository {
    pool: PgPool,
}

impl PostgresCatalogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct PermissionRow {
    id: i64,
    name: String,
    description: String,
    resource: String,
    action: String,
}

impl PermissionRow {
    fn into_permission(self) -> AppResult<Permission> {
        let id = self.id;
        Permission::new(
            PermissionId::new(id),
            self.name,
            self.description,
            self.resource,
            self.action,
        )
        .map_err(|error| {
            AppError::Internal(format!("stored permission '{id}' is invalid: {error}"))
        })
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct RoleRow {
    id: i64,
    name: String,
    description: String,
    is_system: bool,
}

impl RoleRow {
    fn into_role(self) -> AppResult<Role> {
        let id = self.id;
        Role::new(
            RoleId::new(id),
            self.name,
            self.description,
            self.is_system,
        )
        .map_err(|error| {
            AppError::Internal(format!("stored role '{id}' is invalid: {error}"))
        })
    }
}

pub(crate) async fn fetch_permissions<'e>(
    executor: impl PgExecutor<'e>,
) -> AppResult<Vec<Permission>> {
    sqlx::query_as::<_, PermissionRow>(
        r#"
        SELECT id, name, description, resource, action
        FROM permissions
        ORDER BY resource, action
        "#,
    )
    .fetch_all(executor)
    .await
    .map_err(|error| map_sqlx_error(error, "list permissions"))?
    .into_iter()
    .map(PermissionRow::into_permission)
    .collect()
}

pub(crate) async fn fetch_roles<'e>(executor: impl PgExecutor<'e>) -> AppResult<Vec<Role>> {
    sqlx::query_as::<_, RoleRow>(
        r#"
        SELECT id, name, description, is_system
        FROM roles
        ORDER BY name
        "#,
    )
    .fetch_all(executor)
    .await
    .map_err(|error| map_sqlx_error(error, "list roles"))?
    .into_iter()
    .map(RoleRow::into_role)
    .collect()
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        fetch_permissions(&self.pool).await
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        fetch_roles(&self.pool).await
    }

    async fn create_permission(&self, permission: NewPermission) -> AppResult<Permission> {
        let permission_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO permissions (name, description, resource, action)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(permission.name().as_str())
        .bind(permission.description())
        .bind(permission.resource().as_str())
        .bind(permission.action().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                return AppError::Duplicate(format!(
                    "permission '{}.{}' already exists",
                    permission.resource(),
                    permission.action()
                ));
            }

            map_sqlx_error(error, "create permission")
        })?;

        Ok(permission.into_permission(PermissionId::new(permission_id)))
    }

    async fn create_role(&self, role: NewRole) -> AppResult<Role> {
        let role_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO roles (name, description, is_system)
            VALUES ($1, $2, false)
            RETURNING id
            "#,
        )
        .bind(role.name().as_str())
        .bind(role.description())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                return AppError::Duplicate(format!("role '{}' already exists", role.name()));
            }

            map_sqlx_error(error, "create role")
        })?;

        Ok(role.into_role(RoleId::new(role_id), false))
    }

    async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<Permission> {
        let mut transaction = self.pool.begin().await.map_err(begin_error)?;

        let permission = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name, description, resource, action
            FROM permissions
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(permission_id.as_i64())
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| map_sqlx_error(error, "load permission"))?
        .ok_or_else(|| {
            AppError::NotFound(format!("permission '{permission_id}' was not found"))
        })?
        .into_permission()?;

        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT
                EXISTS (SELECT 1 FROM role_grants WHERE permission_id = $1)
                OR EXISTS (SELECT 1 FROM user_overrides WHERE permission_id = $1)
            "#,
        )
        .bind(permission_id.as_i64())
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| map_sqlx_error(error, "check permission references"))?;

        if referenced {
            return Err(AppError::Integrity(format!(
                "permission '{}' is still granted or overridden",
                permission.key()
            )));
        }

        sqlx::query("DELETE FROM permissions WHERE id = $1")
            .bind(permission_id.as_i64())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                if is_foreign_key_violation(&error) {
                    return AppError::Integrity(format!(
                        "permission '{}' is still granted or overridden",
                        permission.key()
                    ));
                }

                map_sqlx_error(error, "delete permission")
            })?;

        transaction.commit().await.map_err(commit_error)?;

        Ok(permission)
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<Role> {
        let mut transaction = self.pool.begin().await.map_err(begin_error)?;

        let role = sqlx::query_as::<_, RoleRow>(
            r#"
            SELECT id, name, description, is_system
            FROM roles
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(role_id.as_i64())
        .fetch_optional(&mut *transaction)
        .await
        .map_err(|error| map_sqlx_error(error, "load role"))?
        .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))?
        .into_role()?;

        if role.is_system() {
            return Err(AppError::Integrity(format!(
                "system role '{}' cannot be deleted",
                role.name()
            )));
        }

        let referenced = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM role_grants WHERE role_id = $1)",
        )
        .bind(role_id.as_i64())
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| map_sqlx_error(error, "check role references"))?;

        if referenced {
            return Err(AppError::Integrity(format!(
                "role '{}' still grants permissions",
                role.name()
            )));
        }

        sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(role_id.as_i64())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                if is_foreign_key_violation(&error) {
                    return AppError::Integrity(format!(
                        "role '{}' still grants permissions",
                        role.name()
                    ));
                }

                map_sqlx_error(error, "delete role")
            })?;

        transaction.commit().await.map_err(commit_error)?;

        Ok(role)
    }

    async fn ensure_system_catalog(&self, seed: &SystemCatalogSeed) -> AppResult<SeedReport> {
        self.ensure_system_catalog_impl(seed).await
    }
}
