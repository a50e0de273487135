use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use accessgrid_application::UserDirectory;
use accessgrid_core::AppResult;
use accessgrid_domain::{RoleId, UserId, UserRef};

use crate::postgres_errors::map_sqlx_error;

/// Reads role references from the `users` table owned by the surrounding system.
#[derive(Clone)]
pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    /// Creates a directory with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    role_id: Option<i64>,
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserRef>> {
        let row = sqlx::query_as::<_, UserRow>("SELECT id, role_id FROM users WHERE id = $1")
            .bind(user_id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| map_sqlx_error(error, "find user"))?;

        Ok(row.map(|row| UserRef::new(UserId::new(row.id), row.role_id.map(RoleId::new))))
    }
}
