//! Cascade deletion of posts, comments, and replies.
//!
//! Deleting a post removes the entire graph beneath it: comments,
//! replies, every like row, and every notification that references the
//! post. Each cascade runs in a single transaction so a failure leaves
//! no orphans and no partially-updated counters.

use std::sync::Arc;

use crate::entities::{
    Comment, CommentLike, Notification, Post, PostLike, Reply, ReplyLike, comment, comment_like,
    notification, post_like, reply, reply_like,
};
use devshare_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionError, TransactionTrait,
};

/// Row counts removed by a cascade, reported for logging and for
/// counter adjustments on surviving ancestors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeCounts {
    /// Comments deleted.
    pub comments: u64,
    /// Replies deleted.
    pub replies: u64,
    /// Post like rows deleted.
    pub post_likes: u64,
    /// Comment like rows deleted.
    pub comment_likes: u64,
    /// Reply like rows deleted.
    pub reply_likes: u64,
    /// Notifications deleted.
    pub notifications: u64,
}

/// Repository orchestrating transactional cascade deletes.
#[derive(Clone)]
pub struct CascadeRepository {
    db: Arc<DatabaseConnection>,
}

fn unwrap_txn_err(e: TransactionError<AppError>) -> AppError {
    match e {
        TransactionError::Connection(e) => AppError::Database(e.to_string()),
        TransactionError::Transaction(e) => e,
    }
}

impl CascadeRepository {
    /// Create a new cascade repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Delete a post and everything beneath it.
    ///
    /// Removes, in order: reply likes, comment likes, replies, comments,
    /// post likes, notifications referencing the post, and finally the
    /// post row itself. All within one transaction.
    pub async fn delete_post_graph(&self, post_id: &str) -> AppResult<CascadeCounts> {
        let post_id = post_id.to_string();

        self.db
            .transaction::<_, CascadeCounts, AppError>(|txn| {
                Box::pin(async move {
                    let mut counts = CascadeCounts::default();

                    counts.reply_likes = ReplyLike::delete_many()
                        .filter(reply_like::Column::PostId.eq(&post_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    // Comment likes carry no post_id, so resolve the
                    // post's comment IDs first.
                    let comment_ids: Vec<String> = Comment::find()
                        .filter(comment::Column::PostId.eq(&post_id))
                        .all(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .into_iter()
                        .map(|c| c.id)
                        .collect();

                    if !comment_ids.is_empty() {
                        counts.comment_likes = CommentLike::delete_many()
                            .filter(comment_like::Column::CommentId.is_in(comment_ids))
                            .exec(txn)
                            .await
                            .map_err(|e| AppError::Database(e.to_string()))?
                            .rows_affected;
                    }

                    counts.replies = Reply::delete_many()
                        .filter(reply::Column::PostId.eq(&post_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    counts.comments = Comment::delete_many()
                        .filter(comment::Column::PostId.eq(&post_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    counts.post_likes = PostLike::delete_many()
                        .filter(post_like::Column::PostId.eq(&post_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    counts.notifications = Notification::delete_many()
                        .filter(notification::Column::PostId.eq(&post_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    Post::delete_by_id(&post_id)
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?;

                    Ok(counts)
                })
            })
            .await
            .map_err(unwrap_txn_err)
    }

    /// Delete a comment, its replies, and all dependent rows.
    ///
    /// The caller is responsible for decrementing the parent post's
    /// comments counter by `1 + counts.replies` afterwards.
    pub async fn delete_comment_graph(&self, comment_id: &str) -> AppResult<CascadeCounts> {
        let comment_id = comment_id.to_string();

        self.db
            .transaction::<_, CascadeCounts, AppError>(|txn| {
                Box::pin(async move {
                    let mut counts = CascadeCounts::default();

                    counts.reply_likes = ReplyLike::delete_many()
                        .filter(reply_like::Column::CommentId.eq(&comment_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    counts.comment_likes = CommentLike::delete_many()
                        .filter(comment_like::Column::CommentId.eq(&comment_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    counts.replies = Reply::delete_many()
                        .filter(reply::Column::CommentId.eq(&comment_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    counts.notifications = Notification::delete_many()
                        .filter(notification::Column::CommentId.eq(&comment_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    let result = Comment::delete_by_id(&comment_id)
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?;
                    counts.comments = result.rows_affected;

                    Ok(counts)
                })
            })
            .await
            .map_err(unwrap_txn_err)
    }

    /// Delete a reply and its dependent rows.
    ///
    /// The caller is responsible for decrementing the parent comment's
    /// replies counter and the post's comments counter afterwards.
    pub async fn delete_reply_graph(&self, reply_id: &str) -> AppResult<CascadeCounts> {
        let reply_id = reply_id.to_string();

        self.db
            .transaction::<_, CascadeCounts, AppError>(|txn| {
                Box::pin(async move {
                    let mut counts = CascadeCounts::default();

                    counts.reply_likes = ReplyLike::delete_many()
                        .filter(reply_like::Column::ReplyId.eq(&reply_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    counts.notifications = Notification::delete_many()
                        .filter(notification::Column::ReplyId.eq(&reply_id))
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?
                        .rows_affected;

                    let result = Reply::delete_by_id(&reply_id)
                        .exec(txn)
                        .await
                        .map_err(|e| AppError::Database(e.to_string()))?;
                    counts.replies = result.rows_affected;

                    Ok(counts)
                })
            })
            .await
            .map_err(unwrap_txn_err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_delete_reply_graph_counts() {
        // reply likes, notifications, then the reply row
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(2), exec(1), exec(1)])
                .into_connection(),
        );

        let repo = CascadeRepository::new(db);
        let counts = repo.delete_reply_graph("r1").await.unwrap();

        assert_eq!(counts.reply_likes, 2);
        assert_eq!(counts.notifications, 1);
        assert_eq!(counts.replies, 1);
    }

    #[tokio::test]
    async fn test_delete_comment_graph_counts() {
        // reply likes, comment likes, replies, notifications, comment row
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(3), exec(2), exec(4), exec(1), exec(1)])
                .into_connection(),
        );

        let repo = CascadeRepository::new(db);
        let counts = repo.delete_comment_graph("c1").await.unwrap();

        assert_eq!(counts.reply_likes, 3);
        assert_eq!(counts.comment_likes, 2);
        assert_eq!(counts.replies, 4);
        assert_eq!(counts.notifications, 1);
        assert_eq!(counts.comments, 1);
    }
}
