//! Notification repository.

use std::sync::Arc;

use crate::entities::{Notification, notification, notification::NotificationType};
use devshare_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, sea_query::Expr,
};

/// Notification repository for database operations.
#[derive(Clone)]
pub struct NotificationRepository {
    db: Arc<DatabaseConnection>,
}

impl NotificationRepository {
    /// Create a new notification repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a notification by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<notification::Model>> {
        Notification::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new notification.
    pub async fn create(&self, model: notification::ActiveModel) -> AppResult<notification::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get notifications for a user, newest first (paginated).
    pub async fn find_by_user(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<notification::Model>> {
        let mut query = Notification::find()
            .filter(notification::Column::RecipientId.eq(user_id))
            .order_by_desc(notification::Column::CreatedAt);

        if unread_only {
            query = query.filter(notification::Column::IsRead.eq(false));
        }

        query
            .limit(limit)
            .offset(offset)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        Notification::find()
            .filter(notification::Column::RecipientId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .count(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Mark a single notification as read.
    pub async fn mark_as_read(&self, id: &str) -> AppResult<()> {
        Notification::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Mark all of a user's notifications as read. Returns the number updated.
    pub async fn mark_all_as_read(&self, user_id: &str) -> AppResult<u64> {
        let result = Notification::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::RecipientId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Delete a notification.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        Notification::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Delete all of a user's notifications. Returns the number deleted.
    pub async fn delete_all_by_user(&self, user_id: &str) -> AppResult<u64> {
        let result = Notification::delete_many()
            .filter(notification::Column::RecipientId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Delete notifications matching an exact actor/recipient/type/target
    /// combination. Used to retract a like notification when the like is
    /// undone. Returns the number of rows deleted.
    pub async fn delete_matching(
        &self,
        recipient_id: &str,
        actor_id: &str,
        notification_type: NotificationType,
        post_id: Option<&str>,
        comment_id: Option<&str>,
        reply_id: Option<&str>,
    ) -> AppResult<u64> {
        let mut condition = Condition::all()
            .add(notification::Column::RecipientId.eq(recipient_id))
            .add(notification::Column::ActorId.eq(actor_id))
            .add(notification::Column::NotificationType.eq(notification_type));

        if let Some(id) = post_id {
            condition = condition.add(notification::Column::PostId.eq(id));
        }
        if let Some(id) = comment_id {
            condition = condition.add(notification::Column::CommentId.eq(id));
        }
        if let Some(id) = reply_id {
            condition = condition.add(notification::Column::ReplyId.eq(id));
        }

        let result = Notification::delete_many()
            .filter(condition)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::mock_notification;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    #[tokio::test]
    async fn test_find_by_user() {
        let n1 = mock_notification(
            "n1",
            "user1",
            "user2",
            NotificationType::PostLiked,
            "Bob liked My project",
        );

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[n1]])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let result = repo.find_by_user("user1", false, 20, 0).await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].recipient_id, "user1");
    }

    #[tokio::test]
    async fn test_mark_all_as_read_returns_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 3,
                }])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let updated = repo.mark_all_as_read("user1").await.unwrap();

        assert_eq!(updated, 3);
    }

    #[tokio::test]
    async fn test_delete_matching_returns_count() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let repo = NotificationRepository::new(db);
        let deleted = repo
            .delete_matching(
                "user1",
                "user2",
                NotificationType::PostLiked,
                Some("post1"),
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(deleted, 1);
    }
}
