//! User service.

use devshare_common::{AppError, AppResult};
use devshare_db::{entities::user, repositories::UserRepository};

/// User service for business logic.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Authenticate a user by API token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }
}
