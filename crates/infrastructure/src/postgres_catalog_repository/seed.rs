use tracing::debug;

use super::*;

impl PostgresCatalogRepository {
    pub(super) async fn ensure_system_catalog_impl(
        &self,
        seed: &SystemCatalogSeed,
    ) -> AppResult<SeedReport> {
        let mut transaction = self.pool.begin().await.map_err(begin_error)?;
        let mut report = SeedReport::default();

        for permission in &seed.permissions {
            let inserted = sqlx::query(
                r#"
                INSERT INTO permissions (name, description, resource, action)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (resource, action) DO NOTHING
                "#,
            )
            .bind(permission.name)
            .bind(permission.description)
            .bind(permission.resource)
            .bind(permission.action)
            .execute(&mut *transaction)
            .await
            .map_err(|error| map_sqlx_error(error, "seed permission"))?
            .rows_affected();

            report.permissions_created += inserted as usize;
        }

        for role in &seed.roles {
            let role_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO roles (name, description, is_system)
                VALUES ($1, $2, true)
                ON CONFLICT (name) DO NOTHING
                RETURNING id
                "#,
            )
            .bind(role.name)
            .bind(role.description)
            .fetch_optional(&mut *transaction)
            .await
            .map_err(|error| map_sqlx_error(error, "seed role"))?;

            let Some(role_id) = role_id else {
                debug!(role = role.name, "system role already present");
                continue;
            };
            report.roles_created += 1;

            for (resource, action) in &role.grants {
                let inserted = sqlx::query(
                    r#"
                    INSERT INTO role_grants (role_id, permission_id)
                    SELECT $1, permissions.id
                    FROM permissions
                    WHERE permissions.resource = $2
                        AND permissions.action = $3
                    ON CONFLICT (role_id, permission_id) DO NOTHING
                    "#,
                )
                .bind(role_id)
                .bind(*resource)
                .bind(*action)
                .execute(&mut *transaction)
                .await
                .map_err(|error| map_sqlx_error(error, "seed role grant"))?
                .rows_affected();

                report.grants_created += inserted as usize;
            }
        }

        transaction.commit().await.map_err(commit_error)?;

        Ok(report)
    }
}
