//! Comment like repository.

use std::sync::Arc;

use crate::entities::{CommentLike, comment_like};
use devshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, SqlErr,
};

/// Comment like repository for database operations.
#[derive(Clone)]
pub struct CommentLikeRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentLikeRepository {
    /// Create a new comment like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a like by user and comment.
    pub async fn find_by_user_and_comment(
        &self,
        user_id: &str,
        comment_id: &str,
    ) -> AppResult<Option<comment_like::Model>> {
        CommentLike::find()
            .filter(comment_like::Column::UserId.eq(user_id))
            .filter(comment_like::Column::CommentId.eq(comment_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has liked a comment.
    pub async fn has_liked(&self, user_id: &str, comment_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_user_and_comment(user_id, comment_id)
            .await?
            .is_some())
    }

    /// Create a new like.
    ///
    /// A duplicate insert trips the unique (`user_id`, `comment_id`) index
    /// and surfaces as a conflict.
    pub async fn create(&self, model: comment_like::ActiveModel) -> AppResult<comment_like::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("comment already liked".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Delete a like by user and comment.
    pub async fn delete_by_user_and_comment(
        &self,
        user_id: &str,
        comment_id: &str,
    ) -> AppResult<()> {
        let like = self.find_by_user_and_comment(user_id, comment_id).await?;
        if let Some(l) = like {
            l.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Get likes on a comment, newest first.
    pub async fn find_by_comment(&self, comment_id: &str) -> AppResult<Vec<comment_like::Model>> {
        CommentLike::find()
            .filter(comment_like::Column::CommentId.eq(comment_id))
            .order_by_desc(comment_like::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count likes on a comment.
    ///
    /// Comments carry no stored like counter, so callers always count live.
    pub async fn count_by_comment(&self, comment_id: &str) -> AppResult<u64> {
        CommentLike::find()
            .filter(comment_like::Column::CommentId.eq(comment_id))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::mock_comment_like;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_has_liked_true() {
        let like = mock_comment_like("l1", "user1", "c1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like.clone()]])
                .into_connection(),
        );

        let repo = CommentLikeRepository::new(db);
        assert!(repo.has_liked("user1", "c1").await.unwrap());
    }

    #[tokio::test]
    async fn test_has_liked_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment_like::Model>::new()])
                .into_connection(),
        );

        let repo = CommentLikeRepository::new(db);
        assert!(!repo.has_liked("user1", "c1").await.unwrap());
    }
}
