use async_trait::async_trait;
use sqlx::{FromRow, PgConnection, PgPool};

use accessgrid_application::GrantRepository;
use accessgrid_core::{AppError, AppResult};
use accessgrid_domain::{
    Catalog, GrantSet, PermissionId, PolicySnapshot, RoleGrant, RoleGrantToggle, RoleId, UserId,
    UserOverride,
};

use crate::postgres_catalog_repository::{fetch_permissions, fetch_roles};
use crate::postgres_errors::{begin_error, commit_error, map_sqlx_error};

mod mutations;


/// PostgreSQL-backed repository for role grants and user overrides.
#[derive(Clone)]
pub struct PostgresGrantRepository {
    pool: PgPool,
}

impl PostgresGrantRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleGrantRow {
    role_id: i64,
    permission_id: i64,
}

#[derive(Debug, FromRow)]
struct UserOverrideRow {
    user_id: i64,
    permission_id: i64,
    granted: bool,
}

impl From<UserOverrideRow> for UserOverride {
    fn from(row: UserOverrideRow) -> Self {
        Self {
            user_id: UserId::new(row.user_id),
            permission_id: PermissionId::new(row.permission_id),
            granted: row.granted,
        }
    }
}

/// Locks the permission row against deletion for the rest of the transaction.
async fn lock_permission(
    connection: &mut PgConnection,
    permission_id: PermissionId,
) -> AppResult<()> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM permissions WHERE id = $1 FOR KEY SHARE")
        .bind(permission_id.as_i64())
        .fetch_optional(connection)
        .await
        .map_err(|error| map_sqlx_error(error, "resolve permission"))?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("permission '{permission_id}' was not found")))
}

/// Locks the role row against deletion for the rest of the transaction.
async fn lock_role(connection: &mut PgConnection, role_id: RoleId) -> AppResult<()> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM roles WHERE id = $1 FOR KEY SHARE")
        .bind(role_id.as_i64())
        .fetch_optional(connection)
        .await
        .map_err(|error| map_sqlx_error(error, "resolve role"))?
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))
}

#[async_trait]
impl GrantRepository for PostgresGrantRepository {
    async fn load_snapshot(&self) -> AppResult<PolicySnapshot> {
        let mut transaction = self.pool.begin().await.map_err(begin_error)?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *transaction)
            .await
            .map_err(|error| map_sqlx_error(error, "start snapshot"))?;

        let permissions = fetch_permissions(&mut *transaction).await?;
        let roles = fetch_roles(&mut *transaction).await?;

        let role_grants = sqlx::query_as::<_, RoleGrantRow>(
            "SELECT role_id, permission_id FROM role_grants ORDER BY role_id, permission_id",
        )
        .fetch_all(&mut *transaction)
        .await
        .map_err(|error| map_sqlx_error(error, "list role grants"))?;

        let user_overrides = sqlx::query_as::<_, UserOverrideRow>(
            r#"
            SELECT user_id, permission_id, granted
            FROM user_overrides
            ORDER BY user_id, permission_id
            "#,
        )
        .fetch_all(&mut *transaction)
        .await
        .map_err(|error| map_sqlx_error(error, "list user overrides"))?;

        transaction.commit().await.map_err(commit_error)?;

        let grants = GrantSet::new(
            role_grants.into_iter().map(|row| RoleGrant {
                role_id: RoleId::new(row.role_id),
                permission_id: PermissionId::new(row.permission_id),
            }),
            user_overrides.into_iter().map(UserOverride::from),
        );

        Ok(PolicySnapshot::new(Catalog::new(permissions, roles)?, grants))
    }

    async fn list_user_overrides(&self, user_id: UserId) -> AppResult<Vec<UserOverride>> {
        let rows = sqlx::query_as::<_, UserOverrideRow>(
            r#"
            SELECT user_id, permission_id, granted
            FROM user_overrides
            WHERE user_id = $1
            ORDER BY permission_id
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| map_sqlx_error(error, "list user overrides"))?;

        Ok(rows.into_iter().map(UserOverride::from).collect())
    }

    async fn toggle_role_grant(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<RoleGrantToggle> {
        self.toggle_role_grant_impl(role_id, permission_id).await
    }

    async fn set_user_override(
        &self,
        user_id: UserId,
        permission_id: PermissionId,
        granted: bool,
    ) -> AppResult<bool> {
        self.set_user_override_impl(user_id, permission_id, granted)
            .await
    }

    async fn clear_user_override(
        &self,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        self.clear_user_override_impl(user_id, permission_id).await
    }
}
