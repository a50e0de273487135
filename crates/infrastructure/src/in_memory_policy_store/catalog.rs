use super::*;

#[async_trait]
impl CatalogRepository for InMemoryPolicyStore {
    async fn list_permissions(&self) -> AppResult<Vec<Permission>> {
        Ok(self.state.read().await.catalog()?.permissions().to_vec())
    }

    async fn list_roles(&self) -> AppResult<Vec<Role>> {
        Ok(self.state.read().await.catalog()?.roles().to_vec())
    }

    async fn create_permission(&self, permission: NewPermission) -> AppResult<Permission> {
        let mut state = self.state.write().await;

        if state
            .find_permission_by_key(permission.resource().as_str(), permission.action().as_str())
            .is_some()
        {
            return Err(AppError::Duplicate(format!(
                "permission '{}.{}' already exists",
                permission.resource(),
                permission.action()
            )));
        }

        let permission_id = state.next_permission_id();
        let permission = permission.into_permission(permission_id);
        state.permissions.insert(permission_id, permission.clone());

        Ok(permission)
    }

    async fn create_role(&self, role: NewRole) -> AppResult<Role> {
        let mut state = self.state.write().await;

        if state.find_role_by_name(role.name().as_str()).is_some() {
            return Err(AppError::Duplicate(format!(
                "role '{}' already exists",
                role.name()
            )));
        }

        let role_id = state.next_role_id();
        let role = role.into_role(role_id, false);
        state.roles.insert(role_id, role.clone());

        Ok(role)
    }

    async fn delete_permission(&self, permission_id: PermissionId) -> AppResult<Permission> {
        let mut state = self.state.write().await;
        let key = state.require_permission(permission_id)?.key();

        if state.grants.references_permission(permission_id) {
            return Err(AppError::Integrity(format!(
                "permission '{key}' is still granted or overridden"
            )));
        }

        state
            .permissions
            .remove(&permission_id)
            .ok_or_else(|| AppError::NotFound(format!("permission '{permission_id}' was not found")))
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<Role> {
        let mut state = self.state.write().await;
        let role = state.require_role(role_id)?;

        if role.is_system() {
            return Err(AppError::Integrity(format!(
                "system role '{}' cannot be deleted",
                role.name()
            )));
        }

        if state.grants.references_role(role_id) {
            return Err(AppError::Integrity(format!(
                "role '{}' still grants permissions",
                role.name()
            )));
        }

        state
            .roles
            .remove(&role_id)
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' was not found")))
    }

    async fn ensure_system_catalog(&self, seed: &SystemCatalogSeed) -> AppResult<SeedReport> {
        let mut state = self.state.write().await;
        let mut report = SeedReport::default();

        for seeded in &seed.permissions {
            if state
                .find_permission_by_key(seeded.resource, seeded.action)
                .is_some()
            {
                continue;
            }

            let permission = NewPermission::new(
                seeded.name,
                seeded.description,
                seeded.resource,
                seeded.action,
            )?;
            let permission_id = state.next_permission_id();
            state
                .permissions
                .insert(permission_id, permission.into_permission(permission_id));
            report.permissions_created += 1;
        }

        for seeded in &seed.roles {
            if state.find_role_by_name(seeded.name).is_some() {
                continue;
            }

            let role = NewRole::new(seeded.name, seeded.description)?;
            let role_id = state.next_role_id();
            state.roles.insert(role_id, role.into_role(role_id, true));
            report.roles_created += 1;

            for (resource, action) in &seeded.grants {
                let Some(permission_id) = state
                    .find_permission_by_key(resource, action)
                    .map(Permission::id)
                else {
                    continue;
                };

                if !state.grants.has_role_grant(role_id, permission_id) {
                    state.grants.toggle_role_grant(role_id, permission_id);
                    report.grants_created += 1;
                }
            }
        }

        Ok(report)
    }
}
