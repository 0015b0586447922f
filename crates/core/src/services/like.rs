//! Like service.
//!
//! Toggle-style likes for posts, comments, and replies. Each toggle
//! keeps the denormalized counters in step and writes or retracts the
//! matching notification.

use chrono::Utc;
use devshare_common::{AppResult, IdGenerator};
use devshare_db::{
    entities::{
        comment_like, notification::NotificationType, post_like, reply_like, user,
    },
    repositories::{
        CommentLikeRepository, CommentRepository, PostLikeRepository, PostRepository,
        ReplyLikeRepository, ReplyRepository,
    },
};
use sea_orm::Set;
use serde::Serialize;

use crate::services::notification::{NotificationEvent, NotificationService};

/// Outcome of a like toggle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeResult {
    /// Whether the target is liked after the toggle.
    pub liked: bool,
    /// Like count after the toggle.
    pub likes_count: i64,
}

/// Like service for business logic.
#[derive(Clone)]
pub struct LikeService {
    post_repo: PostRepository,
    comment_repo: CommentRepository,
    reply_repo: ReplyRepository,
    post_like_repo: PostLikeRepository,
    comment_like_repo: CommentLikeRepository,
    reply_like_repo: ReplyLikeRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        post_repo: PostRepository,
        comment_repo: CommentRepository,
        reply_repo: ReplyRepository,
        post_like_repo: PostLikeRepository,
        comment_like_repo: CommentLikeRepository,
        reply_like_repo: ReplyLikeRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            post_repo,
            comment_repo,
            reply_repo,
            post_like_repo,
            comment_like_repo,
            reply_like_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Toggle a like on a post.
    pub async fn toggle_post_like(
        &self,
        user: &user::Model,
        post_id: &str,
    ) -> AppResult<LikeResult> {
        let post = self.post_repo.get_by_id(post_id).await?;

        if self.post_like_repo.has_liked(&user.id, post_id).await? {
            self.post_like_repo
                .delete_by_user_and_post(&user.id, post_id)
                .await?;
            self.post_repo.decrement_likes_count(post_id).await?;

            if let Err(e) = self
                .notifications
                .retract(
                    &post.user_id,
                    &user.id,
                    NotificationType::PostLiked,
                    Some(post_id),
                    None,
                    None,
                )
                .await
            {
                tracing::warn!(error = %e, post_id = %post_id, "Failed to retract like notification");
            }

            return Ok(LikeResult {
                liked: false,
                likes_count: i64::from(post.likes_count - 1).max(0),
            });
        }

        let model = post_like::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user.id.clone()),
            post_id: Set(post_id.to_string()),
            created_at: Set(Utc::now().into()),
        };
        self.post_like_repo.create(model).await?;
        self.post_repo.increment_likes_count(post_id).await?;

        if let Err(e) = self
            .notifications
            .notify(
                user,
                NotificationEvent {
                    recipient_id: &post.user_id,
                    notification_type: NotificationType::PostLiked,
                    post_id: Some(post_id),
                    comment_id: None,
                    reply_id: None,
                    post_title: Some(&post.title),
                    content: None,
                },
            )
            .await
        {
            tracing::warn!(error = %e, post_id = %post_id, "Failed to create like notification");
        }

        Ok(LikeResult {
            liked: true,
            likes_count: i64::from(post.likes_count) + 1,
        })
    }

    /// Toggle a like on a comment.
    ///
    /// Comments carry no stored like counter; the returned count is a
    /// live count of like rows.
    pub async fn toggle_comment_like(
        &self,
        user: &user::Model,
        comment_id: &str,
    ) -> AppResult<LikeResult> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;

        let liked = if self
            .comment_like_repo
            .has_liked(&user.id, comment_id)
            .await?
        {
            self.comment_like_repo
                .delete_by_user_and_comment(&user.id, comment_id)
                .await?;

            if let Err(e) = self
                .notifications
                .retract(
                    &comment.user_id,
                    &user.id,
                    NotificationType::CommentLiked,
                    None,
                    Some(comment_id),
                    None,
                )
                .await
            {
                tracing::warn!(error = %e, comment_id = %comment_id, "Failed to retract like notification");
            }

            false
        } else {
            let model = comment_like::ActiveModel {
                id: Set(self.id_gen.generate()),
                user_id: Set(user.id.clone()),
                comment_id: Set(comment_id.to_string()),
                created_at: Set(Utc::now().into()),
            };
            self.comment_like_repo.create(model).await?;

            if let Err(e) = self
                .notifications
                .notify(
                    user,
                    NotificationEvent {
                        recipient_id: &comment.user_id,
                        notification_type: NotificationType::CommentLiked,
                        post_id: Some(&comment.post_id),
                        comment_id: Some(comment_id),
                        reply_id: None,
                        post_title: None,
                        content: Some(&comment.content),
                    },
                )
                .await
            {
                tracing::warn!(error = %e, comment_id = %comment_id, "Failed to create like notification");
            }

            true
        };

        let likes_count = self.comment_like_repo.count_by_comment(comment_id).await?;

        Ok(LikeResult {
            liked,
            likes_count: i64::try_from(likes_count).unwrap_or(i64::MAX),
        })
    }

    /// Toggle a like on a reply.
    pub async fn toggle_reply_like(
        &self,
        user: &user::Model,
        reply_id: &str,
    ) -> AppResult<LikeResult> {
        let reply = self.reply_repo.get_by_id(reply_id).await?;

        if self.reply_like_repo.has_liked(&user.id, reply_id).await? {
            self.reply_like_repo
                .delete_by_user_and_reply(&user.id, reply_id)
                .await?;
            self.reply_repo.decrement_likes_count(reply_id).await?;

            if let Err(e) = self
                .notifications
                .retract(
                    &reply.user_id,
                    &user.id,
                    NotificationType::ReplyLiked,
                    None,
                    None,
                    Some(reply_id),
                )
                .await
            {
                tracing::warn!(error = %e, reply_id = %reply_id, "Failed to retract like notification");
            }

            return Ok(LikeResult {
                liked: false,
                likes_count: i64::from(reply.likes_count - 1).max(0),
            });
        }

        let model = reply_like::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user.id.clone()),
            reply_id: Set(reply_id.to_string()),
            comment_id: Set(reply.comment_id.clone()),
            post_id: Set(reply.post_id.clone()),
            created_at: Set(Utc::now().into()),
        };
        self.reply_like_repo.create(model).await?;
        self.reply_repo.increment_likes_count(reply_id).await?;

        if let Err(e) = self
            .notifications
            .notify(
                user,
                NotificationEvent {
                    recipient_id: &reply.user_id,
                    notification_type: NotificationType::ReplyLiked,
                    post_id: Some(&reply.post_id),
                    comment_id: Some(&reply.comment_id),
                    reply_id: Some(reply_id),
                    post_title: None,
                    content: Some(&reply.content),
                },
            )
            .await
        {
            tracing::warn!(error = %e, reply_id = %reply_id, "Failed to create like notification");
        }

        Ok(LikeResult {
            liked: true,
            likes_count: i64::from(reply.likes_count) + 1,
        })
    }

    /// List likes on a post, newest first.
    pub async fn list_post_likes(&self, post_id: &str) -> AppResult<Vec<post_like::Model>> {
        self.post_repo.get_by_id(post_id).await?;
        self.post_like_repo.find_by_post(post_id).await
    }

    /// List likes on a comment, newest first.
    pub async fn list_comment_likes(
        &self,
        comment_id: &str,
    ) -> AppResult<Vec<comment_like::Model>> {
        self.comment_repo.get_by_id(comment_id).await?;
        self.comment_like_repo.find_by_comment(comment_id).await
    }

    /// List likes on a reply, newest first.
    pub async fn list_reply_likes(&self, reply_id: &str) -> AppResult<Vec<reply_like::Model>> {
        self.reply_repo.get_by_id(reply_id).await?;
        self.reply_like_repo.find_by_reply(reply_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use devshare_common::AppError;
    use devshare_db::entities::post;
    use devshare_db::repositories::NotificationRepository;
    use devshare_db::test_utils::{mock_notification, mock_post, mock_post_like, mock_user};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn service_with(
        post_db: Arc<sea_orm::DatabaseConnection>,
        like_db: Arc<sea_orm::DatabaseConnection>,
        notif_db: Arc<sea_orm::DatabaseConnection>,
    ) -> LikeService {
        LikeService::new(
            PostRepository::new(post_db),
            CommentRepository::new(empty_db()),
            ReplyRepository::new(empty_db()),
            PostLikeRepository::new(like_db),
            CommentLikeRepository::new(empty_db()),
            ReplyLikeRepository::new(empty_db()),
            NotificationService::new(NotificationRepository::new(notif_db)),
        )
    }

    fn service_with_post_db(post_db: Arc<sea_orm::DatabaseConnection>) -> LikeService {
        service_with(post_db, empty_db(), empty_db())
    }

    fn one_row_exec() -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }
    }

    #[tokio::test]
    async fn test_toggle_post_like_likes_and_bumps_count() {
        let mut post = mock_post("post1", "user2", "My project");
        post.likes_count = 3;

        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .append_exec_results([one_row_exec()])
                .into_connection(),
        );
        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([
                    Vec::<post_like::Model>::new(),
                    vec![mock_post_like("l1", "user1", "post1")],
                ])
                .into_connection(),
        );
        let notif_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_notification(
                    "n1",
                    "user2",
                    "user1",
                    NotificationType::PostLiked,
                    "alice liked \"My project\"",
                )]])
                .into_connection(),
        );

        let service = service_with(post_db, like_db, notif_db);
        let user = mock_user("user1", "alice");

        let result = service.toggle_post_like(&user, "post1").await.unwrap();

        assert!(result.liked);
        assert_eq!(result.likes_count, 4);
    }

    #[tokio::test]
    async fn test_toggle_post_like_unlikes_and_retracts_notification() {
        let mut post = mock_post("post1", "user2", "My project");
        post.likes_count = 3;

        let existing = mock_post_like("l1", "user1", "post1");

        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .append_exec_results([one_row_exec()])
                .into_connection(),
        );
        let like_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![existing.clone()], vec![existing]])
                .append_exec_results([one_row_exec()])
                .into_connection(),
        );
        let notif_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([one_row_exec()])
                .into_connection(),
        );

        let service = service_with(post_db, like_db, Arc::clone(&notif_db));
        let user = mock_user("user1", "alice");

        let result = service.toggle_post_like(&user, "post1").await.unwrap();

        assert!(!result.liked);
        assert_eq!(result.likes_count, 2);

        drop(service);
        let log = Arc::try_unwrap(notif_db).unwrap().into_transaction_log();
        assert_eq!(log.len(), 1);
        let retraction = format!("{:?}", log[0]);
        assert!(retraction.contains("DELETE"));
        assert!(retraction.contains("notification"));
    }

    #[tokio::test]
    async fn test_toggle_post_like_missing_post() {
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let service = service_with_post_db(post_db);
        let user = mock_user("user1", "alice");

        let result = service.toggle_post_like(&user, "nonexistent").await;
        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_post_likes_missing_post() {
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );

        let service = service_with_post_db(post_db);

        let result = service.list_post_likes("nonexistent").await;
        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }
}
