//! Reply like repository.

use std::sync::Arc;

use crate::entities::{ReplyLike, reply_like};
use devshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, SqlErr,
};

/// Reply like repository for database operations.
#[derive(Clone)]
pub struct ReplyLikeRepository {
    db: Arc<DatabaseConnection>,
}

impl ReplyLikeRepository {
    /// Create a new reply like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a like by user and reply.
    pub async fn find_by_user_and_reply(
        &self,
        user_id: &str,
        reply_id: &str,
    ) -> AppResult<Option<reply_like::Model>> {
        ReplyLike::find()
            .filter(reply_like::Column::UserId.eq(user_id))
            .filter(reply_like::Column::ReplyId.eq(reply_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a user has liked a reply.
    pub async fn has_liked(&self, user_id: &str, reply_id: &str) -> AppResult<bool> {
        Ok(self
            .find_by_user_and_reply(user_id, reply_id)
            .await?
            .is_some())
    }

    /// Create a new like.
    ///
    /// A duplicate insert trips the unique (`user_id`, `reply_id`) index
    /// and surfaces as a conflict.
    pub async fn create(&self, model: reply_like::ActiveModel) -> AppResult<reply_like::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("reply already liked".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Delete a like by user and reply.
    pub async fn delete_by_user_and_reply(&self, user_id: &str, reply_id: &str) -> AppResult<()> {
        let like = self.find_by_user_and_reply(user_id, reply_id).await?;
        if let Some(l) = like {
            l.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }

    /// Get likes on a reply, newest first.
    pub async fn find_by_reply(&self, reply_id: &str) -> AppResult<Vec<reply_like::Model>> {
        ReplyLike::find()
            .filter(reply_like::Column::ReplyId.eq(reply_id))
            .order_by_desc(reply_like::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::mock_reply_like;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_has_liked_true() {
        let like = mock_reply_like("l1", "user1", "r1", "c1", "post1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[like.clone()]])
                .into_connection(),
        );

        let repo = ReplyLikeRepository::new(db);
        assert!(repo.has_liked("user1", "r1").await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_reply() {
        let l1 = mock_reply_like("l1", "user1", "r1", "c1", "post1");
        let l2 = mock_reply_like("l2", "user2", "r1", "c1", "post1");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[l1, l2]])
                .into_connection(),
        );

        let repo = ReplyLikeRepository::new(db);
        let result = repo.find_by_reply("r1").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
