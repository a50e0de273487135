use async_trait::async_trait;

use accessgrid_core::AppResult;
use accessgrid_domain::{UserId, UserRef};

/// Port onto the external user store, used only to learn a user's role.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user; `None` when the directory does not know the id.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserRef>>;
}
