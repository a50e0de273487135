use super::*;

impl PostgresGrantRepository {
    pub(super) async fn toggle_role_grant_impl(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<RoleGrantToggle> {
        let mut transaction = self.pool.begin().await.map_err(begin_error)?;

        lock_role(&mut transaction, role_id).await?;
        lock_permission(&mut transaction, permission_id).await?;

        let revoked = sqlx::query(
            r#"
            DELETE FROM role_grants
            WHERE role_id = $1
                AND permission_id = $2
            "#,
        )
        .bind(role_id.as_i64())
        .bind(permission_id.as_i64())
        .execute(&mut *transaction)
        .await
        .map_err(|error| map_sqlx_error(error, "revoke role grant"))?
        .rows_affected();

        let outcome = if revoked > 0 {
            RoleGrantToggle::Revoked
        } else {
            // A concurrent insert of the same pair blocks here until it
            // commits; the conflict then resolves to a no-op.
            let inserted = sqlx::query(
                r#"
                INSERT INTO role_grants (role_id, permission_id)
                VALUES ($1, $2)
                ON CONFLICT (role_id, permission_id) DO NOTHING
                "#,
            )
            .bind(role_id.as_i64())
            .bind(permission_id.as_i64())
            .execute(&mut *transaction)
            .await
            .map_err(|error| map_sqlx_error(error, "grant role permission"))?
            .rows_affected();

            if inserted > 0 {
                RoleGrantToggle::Granted
            } else {
                RoleGrantToggle::Converged
            }
        };

        transaction.commit().await.map_err(commit_error)?;

        Ok(outcome)
    }

    pub(super) async fn set_user_override_impl(
        &self,
        user_id: UserId,
        permission_id: PermissionId,
        granted: bool,
    ) -> AppResult<bool> {
        let mut transaction = self.pool.begin().await.map_err(begin_error)?;

        lock_permission(&mut transaction, permission_id).await?;

        let stored = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO user_overrides (user_id, permission_id, granted)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, permission_id)
            DO UPDATE SET granted = EXCLUDED.granted, updated_at = now()
            RETURNING granted
            "#,
        )
        .bind(user_id.as_i64())
        .bind(permission_id.as_i64())
        .bind(granted)
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| map_sqlx_error(error, "upsert user override"))?;

        transaction.commit().await.map_err(commit_error)?;

        Ok(stored)
    }

    pub(super) async fn clear_user_override_impl(
        &self,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let mut transaction = self.pool.begin().await.map_err(begin_error)?;

        lock_permission(&mut transaction, permission_id).await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM user_overrides
            WHERE user_id = $1
                AND permission_id = $2
            "#,
        )
        .bind(user_id.as_i64())
        .bind(permission_id.as_i64())
        .execute(&mut *transaction)
        .await
        .map_err(|error| map_sqlx_error(error, "clear user override"))?
        .rows_affected();

        transaction.commit().await.map_err(commit_error)?;

        Ok(removed > 0)
    }
}
