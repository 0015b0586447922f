//! Post repository.

use std::sync::Arc;

use crate::entities::{Post, post};
use devshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::Expr,
};

/// Post repository for database operations.
#[derive(Clone)]
pub struct PostRepository {
    db: Arc<DatabaseConnection>,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a post by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<post::Model>> {
        Post::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a post by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<post::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::PostNotFound(id.to_string()))
    }

    /// Create a new post.
    pub async fn create(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a post.
    pub async fn update(&self, model: post::ActiveModel) -> AppResult<post::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List posts, newest first (paginated).
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<post::Model>> {
        Post::find()
            .order_by_desc(post::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment likes count atomically (single UPDATE query, no fetch).
    pub async fn increment_likes_count(&self, post_id: &str) -> AppResult<()> {
        Post::update_many()
            .col_expr(
                post::Column::LikesCount,
                Expr::col(post::Column::LikesCount).add(1),
            )
            .filter(post::Column::Id.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement likes count atomically, clamped at zero.
    pub async fn decrement_likes_count(&self, post_id: &str) -> AppResult<()> {
        Post::update_many()
            .col_expr(
                post::Column::LikesCount,
                Expr::cust("GREATEST(likes_count - 1, 0)"),
            )
            .filter(post::Column::Id.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Increment comments count atomically (single UPDATE query, no fetch).
    ///
    /// This counter tracks comments and replies together.
    pub async fn increment_comments_count(&self, post_id: &str) -> AppResult<()> {
        Post::update_many()
            .col_expr(
                post::Column::CommentsCount,
                Expr::col(post::Column::CommentsCount).add(1),
            )
            .filter(post::Column::Id.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement comments count atomically, clamped at zero.
    pub async fn decrement_comments_count(&self, post_id: &str) -> AppResult<()> {
        self.decrement_comments_count_by(post_id, 1).await
    }

    /// Decrement comments count by `n` atomically, clamped at zero.
    ///
    /// Used when deleting a comment removes its replies as well.
    pub async fn decrement_comments_count_by(&self, post_id: &str, n: i64) -> AppResult<()> {
        if n <= 0 {
            return Ok(());
        }
        Post::update_many()
            .col_expr(
                post::Column::CommentsCount,
                Expr::cust(format!("GREATEST(comments_count - {n}, 0)")),
            )
            .filter(post::Column::Id.eq(post_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::mock_post;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_find_by_id_found() {
        let post = mock_post("post1", "user1", "My project");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post.clone()]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.find_by_id("post1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().title, "My project");
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_returns_error() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.get_by_id("nonexistent").await;

        assert!(result.is_err());
        match result {
            Err(AppError::PostNotFound(id)) => assert_eq!(id, "nonexistent"),
            _ => panic!("Expected PostNotFound error"),
        }
    }

    #[tokio::test]
    async fn test_list() {
        let p1 = mock_post("post1", "user1", "First");
        let p2 = mock_post("post2", "user2", "Second");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[p1, p2]])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        let result = repo.list(10, 0).await.unwrap();

        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_increment_likes_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = PostRepository::new(db);
        assert!(repo.increment_likes_count("post1").await.is_ok());
    }

    #[tokio::test]
    async fn test_decrement_comments_count_by_zero_is_noop() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
        );

        let repo = PostRepository::new(db);
        assert!(repo.decrement_comments_count_by("post1", 0).await.is_ok());
    }
}
