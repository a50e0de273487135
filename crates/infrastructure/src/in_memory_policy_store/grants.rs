use super::*;

#[async_trait]
impl GrantRepository for InMemoryPolicyStore {
    async fn load_snapshot(&self) -> AppResult<PolicySnapshot> {
        self.state.read().await.snapshot()
    }

    async fn list_user_overrides(&self, user_id: UserId) -> AppResult<Vec<UserOverride>> {
        Ok(self
            .state
            .read()
            .await
            .grants
            .overrides_for_user(user_id)
            .collect())
    }

    async fn toggle_role_grant(
        &self,
        role_id: RoleId,
        permission_id: PermissionId,
    ) -> AppResult<RoleGrantToggle> {
        let mut state = self.state.write().await;
        state.require_role(role_id)?;
        state.require_permission(permission_id)?;

        Ok(if state.grants.toggle_role_grant(role_id, permission_id) {
            RoleGrantToggle::Granted
        } else {
            RoleGrantToggle::Revoked
        })
    }

    async fn set_user_override(
        &self,
        user_id: UserId,
        permission_id: PermissionId,
        granted: bool,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        state.require_permission(permission_id)?;

        Ok(state
            .grants
            .set_user_override(user_id, permission_id, granted))
    }

    async fn clear_user_override(
        &self,
        user_id: UserId,
        permission_id: PermissionId,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        state.require_permission(permission_id)?;

        Ok(state.grants.clear_user_override(user_id, permission_id))
    }
}
