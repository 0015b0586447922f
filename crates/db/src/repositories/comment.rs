//! Comment repository.

use std::sync::Arc;

use crate::entities::{Comment, comment};
use devshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::Expr,
};

/// Comment repository for database operations.
#[derive(Clone)]
pub struct CommentRepository {
    db: Arc<DatabaseConnection>,
}

impl CommentRepository {
    /// Create a new comment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a comment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<comment::Model>> {
        Comment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a comment by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<comment::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::CommentNotFound(id.to_string()))
    }

    /// Create a new comment.
    pub async fn create(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a comment.
    pub async fn update(&self, model: comment::ActiveModel) -> AppResult<comment::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get comments on a post, oldest first (paginated).
    pub async fn find_by_post(
        &self,
        post_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<comment::Model>> {
        Comment::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment replies count atomically (single UPDATE query, no fetch).
    pub async fn increment_replies_count(&self, comment_id: &str) -> AppResult<()> {
        Comment::update_many()
            .col_expr(
                comment::Column::RepliesCount,
                Expr::col(comment::Column::RepliesCount).add(1),
            )
            .filter(comment::Column::Id.eq(comment_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement replies count atomically, clamped at zero.
    pub async fn decrement_replies_count(&self, comment_id: &str) -> AppResult<()> {
        Comment::update_many()
            .col_expr(
                comment::Column::RepliesCount,
                Expr::cust("GREATEST(replies_count - 1, 0)"),
            )
            .filter(comment::Column::Id.eq(comment_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
