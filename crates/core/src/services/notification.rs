//! Notification service.
//!
//! Writes denormalized notification rows for social events and retracts
//! them when the triggering action is undone. Notification failures are
//! logged by callers and never fail the parent operation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use devshare_common::{AppError, AppResult, IdGenerator};
use devshare_db::{
    entities::{notification, notification::NotificationType, user},
    repositories::NotificationRepository,
};
use sea_orm::Set;

/// Optional external lookup for actor display names.
///
/// Covers users whose profile carries neither a display name nor a
/// username, mirroring the auth-provider fallback of the hosted
/// identity directory. Absent by default.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Resolve a display name for the given user, if known.
    async fn display_name(&self, user_id: &str) -> Option<String>;
}

/// A social event to notify a user about.
#[derive(Debug, Clone, Copy)]
pub struct NotificationEvent<'a> {
    /// User receiving the notification.
    pub recipient_id: &'a str,
    /// Event type.
    pub notification_type: NotificationType,
    /// Related post.
    pub post_id: Option<&'a str>,
    /// Related comment.
    pub comment_id: Option<&'a str>,
    /// Related reply.
    pub reply_id: Option<&'a str>,
    /// Title of the related post, used in the message.
    pub post_title: Option<&'a str>,
    /// Comment or reply content, previewed in the message.
    pub content: Option<&'a str>,
}

/// Notification service for business logic.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    directory: Option<Arc<dyn IdentityDirectory>>,
    id_gen: IdGenerator,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(notification_repo: NotificationRepository) -> Self {
        Self {
            notification_repo,
            directory: None,
            id_gen: IdGenerator::new(),
        }
    }

    /// Set the external identity directory.
    pub fn set_directory(&mut self, directory: Arc<dyn IdentityDirectory>) {
        self.directory = Some(directory);
    }

    /// Write a notification for a social event.
    ///
    /// Returns `None` without writing when the actor is the recipient.
    pub async fn notify(
        &self,
        actor: &user::Model,
        event: NotificationEvent<'_>,
    ) -> AppResult<Option<notification::Model>> {
        if event.recipient_id == actor.id {
            return Ok(None);
        }

        let actor_name = self.resolve_actor_name(actor).await;
        let message = Self::build_message(
            event.notification_type,
            &actor_name,
            event.post_title,
            event.content,
        );

        let model = notification::ActiveModel {
            id: Set(self.id_gen.generate()),
            recipient_id: Set(event.recipient_id.to_string()),
            actor_id: Set(actor.id.clone()),
            actor_name: Set(actor_name),
            notification_type: Set(event.notification_type),
            post_id: Set(event.post_id.map(ToString::to_string)),
            comment_id: Set(event.comment_id.map(ToString::to_string)),
            reply_id: Set(event.reply_id.map(ToString::to_string)),
            message: Set(message),
            is_read: Set(false),
            created_at: Set(Utc::now().into()),
        };

        let created = self.notification_repo.create(model).await?;
        Ok(Some(created))
    }

    /// Retract notifications written for an event that has been undone.
    ///
    /// Matches every provided field exactly; a no-op when nothing matches.
    pub async fn retract(
        &self,
        recipient_id: &str,
        actor_id: &str,
        notification_type: NotificationType,
        post_id: Option<&str>,
        comment_id: Option<&str>,
        reply_id: Option<&str>,
    ) -> AppResult<u64> {
        self.notification_repo
            .delete_matching(
                recipient_id,
                actor_id,
                notification_type,
                post_id,
                comment_id,
                reply_id,
            )
            .await
    }

    /// List a user's notifications, newest first.
    pub async fn list(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<notification::Model>> {
        self.notification_repo
            .find_by_user(user_id, unread_only, limit, offset)
            .await
    }

    /// Count a user's unread notifications.
    pub async fn unread_count(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.count_unread(user_id).await
    }

    /// Mark one of the user's notifications as read.
    pub async fn mark_read(&self, user_id: &str, notification_id: &str) -> AppResult<()> {
        let notification = self.owned_by(user_id, notification_id).await?;
        self.notification_repo.mark_as_read(&notification.id).await
    }

    /// Mark all of the user's notifications as read. Returns the count.
    pub async fn mark_all_read(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.mark_all_as_read(user_id).await
    }

    /// Delete one of the user's notifications.
    pub async fn delete(&self, user_id: &str, notification_id: &str) -> AppResult<()> {
        let notification = self.owned_by(user_id, notification_id).await?;
        self.notification_repo.delete(&notification.id).await
    }

    /// Delete all of the user's notifications. Returns the count.
    pub async fn delete_all(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.delete_all_by_user(user_id).await
    }

    async fn owned_by(
        &self,
        user_id: &str,
        notification_id: &str,
    ) -> AppResult<notification::Model> {
        let notification = self
            .notification_repo
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("notification {notification_id} not found")))?;

        if notification.recipient_id != user_id {
            return Err(AppError::Forbidden(
                "notification belongs to another user".to_string(),
            ));
        }

        Ok(notification)
    }

    /// Resolve the display name recorded on the notification.
    ///
    /// Chain: stored display name, stored username, external directory,
    /// email local part, then a generic fallback.
    async fn resolve_actor_name(&self, actor: &user::Model) -> String {
        if let Some(name) = &actor.display_name {
            if !name.trim().is_empty() {
                return name.clone();
            }
        }

        if !actor.username.trim().is_empty() {
            return actor.username.clone();
        }

        if let Some(directory) = &self.directory {
            if let Some(name) = directory.display_name(&actor.id).await {
                if !name.trim().is_empty() {
                    return name;
                }
            }
        }

        if let Some(local) = actor.email.split('@').next() {
            if !local.is_empty() {
                return local.to_string();
            }
        }

        "A user".to_string()
    }

    /// Build the display message for a notification.
    fn build_message(
        notification_type: NotificationType,
        actor_name: &str,
        post_title: Option<&str>,
        content: Option<&str>,
    ) -> String {
        let project_title = post_title
            .map_or_else(|| "your project".to_string(), |t| format!("\"{t}\""));
        let content_preview = content.map_or_else(String::new, |c| {
            let snippet: String = c.chars().take(100).collect();
            format!(": \"{snippet}...\"")
        });

        match notification_type {
            NotificationType::PostLiked => format!("{actor_name} liked {project_title}"),
            NotificationType::CommentAdded => {
                format!("{actor_name} commented on {project_title}{content_preview}")
            }
            NotificationType::CommentLiked => {
                format!("{actor_name} liked your comment{content_preview}")
            }
            NotificationType::ReplyAdded => {
                format!("{actor_name} replied to your comment{content_preview}")
            }
            NotificationType::ReplyLiked => {
                format!("{actor_name} liked your reply{content_preview}")
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use devshare_db::test_utils::{mock_notification, mock_user};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn empty_service() -> NotificationService {
        let notification_db =
            Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        NotificationService::new(NotificationRepository::new(notification_db))
    }

    struct StubDirectory(Option<String>);

    #[async_trait]
    impl IdentityDirectory for StubDirectory {
        async fn display_name(&self, _user_id: &str) -> Option<String> {
            self.0.clone()
        }
    }

    #[tokio::test]
    async fn test_notify_self_is_suppressed() {
        let service = empty_service();
        let actor = mock_user("user1", "alice");

        let result = service
            .notify(
                &actor,
                NotificationEvent {
                    recipient_id: "user1",
                    notification_type: NotificationType::PostLiked,
                    post_id: Some("post1"),
                    comment_id: None,
                    reply_id: None,
                    post_title: Some("My project"),
                    content: None,
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_resolve_actor_name_prefers_display_name() {
        let service = empty_service();
        let mut actor = mock_user("user1", "alice");
        actor.display_name = Some("Alice Liddell".to_string());

        assert_eq!(service.resolve_actor_name(&actor).await, "Alice Liddell");
    }

    #[tokio::test]
    async fn test_resolve_actor_name_falls_back_to_username() {
        let service = empty_service();
        let actor = mock_user("user1", "alice");

        assert_eq!(service.resolve_actor_name(&actor).await, "alice");
    }

    #[tokio::test]
    async fn test_resolve_actor_name_uses_directory() {
        let mut service = empty_service();
        service.set_directory(Arc::new(StubDirectory(Some("Directory Name".to_string()))));

        let mut actor = mock_user("user1", "alice");
        actor.username = String::new();

        assert_eq!(service.resolve_actor_name(&actor).await, "Directory Name");
    }

    #[tokio::test]
    async fn test_resolve_actor_name_falls_back_to_email_local_part() {
        let service = empty_service();
        let mut actor = mock_user("user1", "alice");
        actor.username = String::new();
        actor.email = "liddell@example.com".to_string();

        assert_eq!(service.resolve_actor_name(&actor).await, "liddell");
    }

    #[tokio::test]
    async fn test_resolve_actor_name_generic_fallback() {
        let service = empty_service();
        let mut actor = mock_user("user1", "alice");
        actor.username = String::new();
        actor.email = String::new();

        assert_eq!(service.resolve_actor_name(&actor).await, "A user");
    }

    #[test]
    fn test_build_message_post_liked_with_title() {
        let message = NotificationService::build_message(
            NotificationType::PostLiked,
            "alice",
            Some("My project"),
            None,
        );
        assert_eq!(message, "alice liked \"My project\"");
    }

    #[test]
    fn test_build_message_post_liked_without_title() {
        let message =
            NotificationService::build_message(NotificationType::PostLiked, "alice", None, None);
        assert_eq!(message, "alice liked your project");
    }

    #[test]
    fn test_build_message_comment_added_with_preview() {
        let message = NotificationService::build_message(
            NotificationType::CommentAdded,
            "bob",
            Some("My project"),
            Some("Great work"),
        );
        assert_eq!(message, "bob commented on \"My project\": \"Great work...\"");
    }

    #[test]
    fn test_build_message_truncates_long_content() {
        let long = "x".repeat(250);
        let message = NotificationService::build_message(
            NotificationType::ReplyAdded,
            "bob",
            None,
            Some(&long),
        );

        let expected_snippet = "x".repeat(100);
        assert_eq!(
            message,
            format!("bob replied to your comment: \"{expected_snippet}...\"")
        );
    }

    #[test]
    fn test_build_message_reply_liked() {
        let message = NotificationService::build_message(
            NotificationType::ReplyLiked,
            "carol",
            None,
            Some("I agree"),
        );
        assert_eq!(message, "carol liked your reply: \"I agree...\"");
    }

    #[tokio::test]
    async fn test_mark_read_rejects_other_users_notification() {
        let foreign = mock_notification(
            "n1",
            "someone-else",
            "actor1",
            NotificationType::PostLiked,
            "x liked y",
        );

        let notification_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[foreign]])
                .into_connection(),
        );

        let service = NotificationService::new(NotificationRepository::new(notification_db));

        let result = service.mark_read("user1", "n1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
