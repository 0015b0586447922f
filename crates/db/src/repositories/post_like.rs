//! Post like repository.

use std::sync::Arc;

use crate::entities::{PostLike, post_like};
use devshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, SqlErr,
};

/// Post like repository for database operations.
#[derive(Clone)]
pub struct PostLikeRepository {
    db: Arc<DatabaseConnection>,
}

impl PostLikeRepository {
    /// Create a new post like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a like by user and post.
    pub async fn find_by_user_and_post(
        &self,
        user_id: &str,
        post_id: &str,
    ) -> AppResult<Option<post_like::Model>> {
        PostLike::find()
            .filter(post_like::Column::UserId.eq(user_id))
            .filter(post_like::Column::PostId.eq(post_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has liked a post.
    pub async fn has_liked(&self, user_id: &str, post_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_user_and_post(user_id, post_id)
            .await?
            .is_some())
    }

    /// Create a new like.
    ///
    /// A duplicate insert trips the unique (`user_id`, `post_id`) index
    /// and surfaces as a conflict.
    pub async fn create(&self, model: post_like::ActiveModel) -> AppResult<post_like::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("post already liked".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Delete a like by user and post.
    pub async fn delete_by_user_and_post(&self, user_id: &str, post_id: &str) -> AppResult<()> {
        let like = self.find_by_user_and_post(user_id, post_id).await?;
        if let Some(l) = like {
            l.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Get likes on a post, newest first.
    pub async fn find_by_post(&self, post_id: &str) -> AppResult<Vec<post_like::Model>> {
        PostLike::find()
            .filter(post_like::Column::PostId.eq(post_id))
            .order_by_desc(post_like::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::mock_post_like;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Set};

    #[tokio::test]
    async fn test_has_liked_true() {
        let like = mock_post_like("l1", "user1", "post1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like.clone()]])
                .into_connection(),
        );

        let repo = PostLikeRepository::new(db);
        assert!(repo.has_liked("user1", "post1").await.unwrap());
    }

    #[tokio::test]
    async fn test_has_liked_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post_like::Model>::new()])
                .into_connection(),
        );

        let repo = PostLikeRepository::new(db);
        assert!(!repo.has_liked("user1", "post1").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_maps_plain_errors_to_database() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([DbErr::Custom("connection reset".to_owned())])
                .into_connection(),
        );

        let repo = PostLikeRepository::new(db);
        let model = post_like::ActiveModel {
            id: Set("l1".to_string()),
            user_id: Set("user1".to_string()),
            post_id: Set("post1".to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };

        assert!(matches!(
            repo.create(model).await,
            Err(AppError::Database(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_post() {
        let l1 = mock_post_like("l1", "user1", "post1");
        let l2 = mock_post_like("l2", "user2", "post1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[l1, l2]])
                .into_connection(),
        );

        let repo = PostLikeRepository::new(db);
        let result = repo.find_by_post("post1").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
