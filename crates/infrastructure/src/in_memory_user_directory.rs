use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use accessgrid_application::UserDirectory;
use accessgrid_core::AppResult;
use accessgrid_domain::{RoleId, UserId, UserRef};

/// In-memory user directory used by the memory backend and tests.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    users: RwLock<HashMap<UserId, Option<RoleId>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a user or replaces its role reference.
    pub async fn upsert_user(&self, user_id: UserId, role_id: Option<RoleId>) {
        self.users.write().await.insert(user_id, role_id);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserRef>> {
        Ok(self
            .users
            .read()
            .await
            .get(&user_id)
            .map(|role_id| UserRef::new(user_id, *role_id)))
    }
}
