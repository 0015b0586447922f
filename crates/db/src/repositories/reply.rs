//! Reply repository.

use std::sync::Arc;

use crate::entities::{Reply, reply};
use devshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, sea_query::Expr,
};

/// Reply repository for database operations.
#[derive(Clone)]
pub struct ReplyRepository {
    db: Arc<DatabaseConnection>,
}

impl ReplyRepository {
    /// Create a new reply repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a reply by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<reply::Model>> {
        Reply::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a reply by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<reply::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ReplyNotFound(id.to_string()))
    }

    /// Create a new reply.
    pub async fn create(&self, model: reply::ActiveModel) -> AppResult<reply::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a reply.
    pub async fn update(&self, model: reply::ActiveModel) -> AppResult<reply::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get replies to a comment, oldest first (paginated).
    pub async fn find_by_comment(
        &self,
        comment_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<reply::Model>> {
        Reply::find()
            .filter(reply::Column::CommentId.eq(comment_id))
            .order_by_asc(reply::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Increment likes count atomically (single UPDATE query, no fetch).
    pub async fn increment_likes_count(&self, reply_id: &str) -> AppResult<()> {
        Reply::update_many()
            .col_expr(
                reply::Column::LikesCount,
                Expr::col(reply::Column::LikesCount).add(1),
            )
            .filter(reply::Column::Id.eq(reply_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Decrement likes count atomically, clamped at zero.
    pub async fn decrement_likes_count(&self, reply_id: &str) -> AppResult<()> {
        Reply::update_many()
            .col_expr(
                reply::Column::LikesCount,
                Expr::cust("GREATEST(likes_count - 1, 0)"),
            )
            .filter(reply::Column::Id.eq(reply_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
