//! Reply service.

use chrono::Utc;
use devshare_common::{AppError, AppResult, IdGenerator};
use devshare_db::{
    entities::{notification::NotificationType, reply, user},
    repositories::{
        CascadeCounts, CascadeRepository, CommentRepository, PostRepository, ReplyRepository,
    },
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::notification::{NotificationEvent, NotificationService};

/// Reply body accepted on create and update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyInput {
    /// Reply content.
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}

/// Reply service for business logic.
#[derive(Clone)]
pub struct ReplyService {
    reply_repo: ReplyRepository,
    comment_repo: CommentRepository,
    post_repo: PostRepository,
    cascade_repo: CascadeRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl ReplyService {
    /// Create a new reply service.
    #[must_use]
    pub const fn new(
        reply_repo: ReplyRepository,
        comment_repo: CommentRepository,
        post_repo: PostRepository,
        cascade_repo: CascadeRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            reply_repo,
            comment_repo,
            post_repo,
            cascade_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a reply to a comment.
    ///
    /// Denormalizes the post ID from the parent comment, bumps the
    /// comment's replies counter and the post's comments counter, and
    /// notifies the comment owner and (when distinct) the post owner.
    pub async fn add(
        &self,
        user: &user::Model,
        comment_id: &str,
        input: ReplyInput,
    ) -> AppResult<reply::Model> {
        input.validate()?;
        let content = Self::trimmed_content(&input.content)?;
        let comment = self.comment_repo.get_by_id(comment_id).await?;
        let post = self.post_repo.get_by_id(&comment.post_id).await?;

        let now = Utc::now();
        let model = reply::ActiveModel {
            id: Set(self.id_gen.generate()),
            comment_id: Set(comment_id.to_string()),
            post_id: Set(comment.post_id.clone()),
            user_id: Set(user.id.clone()),
            content: Set(content.clone()),
            likes_count: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let created = self.reply_repo.create(model).await?;

        self.comment_repo.increment_replies_count(comment_id).await?;
        self.post_repo
            .increment_comments_count(&comment.post_id)
            .await?;

        // Comment owner first; then the post owner when they are a
        // third party to the thread.
        let event = NotificationEvent {
            recipient_id: &comment.user_id,
            notification_type: NotificationType::ReplyAdded,
            post_id: Some(&comment.post_id),
            comment_id: Some(comment_id),
            reply_id: Some(&created.id),
            post_title: None,
            content: Some(&content),
        };
        if let Err(e) = self.notifications.notify(user, event).await {
            tracing::warn!(error = %e, comment_id = %comment_id, "Failed to create reply notification");
        }

        if post.user_id != comment.user_id && post.user_id != user.id {
            let event = NotificationEvent {
                recipient_id: &post.user_id,
                ..event
            };
            if let Err(e) = self.notifications.notify(user, event).await {
                tracing::warn!(error = %e, comment_id = %comment_id, "Failed to create reply notification");
            }
        }

        Ok(created)
    }

    /// Update a reply's content. Author only.
    pub async fn update(
        &self,
        user: &user::Model,
        reply_id: &str,
        input: ReplyInput,
    ) -> AppResult<reply::Model> {
        input.validate()?;
        let content = Self::trimmed_content(&input.content)?;
        let existing = self.reply_repo.get_by_id(reply_id).await?;

        if existing.user_id != user.id {
            return Err(AppError::Forbidden("not the reply author".to_string()));
        }

        let mut model: reply::ActiveModel = existing.into();
        model.content = Set(content);
        model.updated_at = Set(Utc::now().into());

        self.reply_repo.update(model).await
    }

    /// Delete a reply and its dependent rows.
    ///
    /// Allowed for the reply author or the post owner. Decrements the
    /// parent comment's replies counter and the post's comments counter.
    pub async fn delete(&self, user: &user::Model, reply_id: &str) -> AppResult<CascadeCounts> {
        let reply = self.reply_repo.get_by_id(reply_id).await?;
        let post = self.post_repo.get_by_id(&reply.post_id).await?;

        if reply.user_id != user.id && post.user_id != user.id {
            return Err(AppError::Forbidden(
                "only the reply author or post owner may delete".to_string(),
            ));
        }

        let counts = self.cascade_repo.delete_reply_graph(reply_id).await?;

        self.comment_repo
            .decrement_replies_count(&reply.comment_id)
            .await?;
        self.post_repo
            .decrement_comments_count(&reply.post_id)
            .await?;

        tracing::info!(
            reply_id = %reply_id,
            reply_likes = counts.reply_likes,
            notifications = counts.notifications,
            "Deleted reply graph"
        );
        Ok(counts)
    }

    /// Get a reply by ID.
    pub async fn get(&self, reply_id: &str) -> AppResult<reply::Model> {
        self.reply_repo.get_by_id(reply_id).await
    }

    /// List replies to a comment, oldest first.
    pub async fn list(
        &self,
        comment_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<reply::Model>> {
        self.comment_repo.get_by_id(comment_id).await?;
        self.reply_repo
            .find_by_comment(comment_id, limit, offset)
            .await
    }

    fn trimmed_content(content: &str) -> AppResult<String> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "content must not be empty".to_string(),
            ));
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use devshare_db::entities::comment;
    use devshare_db::repositories::NotificationRepository;
    use devshare_db::test_utils::{mock_post, mock_reply, mock_user};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn input(content: &str) -> ReplyInput {
        ReplyInput {
            content: content.to_string(),
        }
    }

    fn build_service(
        reply_db: Arc<sea_orm::DatabaseConnection>,
        comment_db: Arc<sea_orm::DatabaseConnection>,
        post_db: Arc<sea_orm::DatabaseConnection>,
    ) -> ReplyService {
        ReplyService::new(
            ReplyRepository::new(reply_db),
            CommentRepository::new(comment_db),
            PostRepository::new(post_db),
            CascadeRepository::new(empty_db()),
            NotificationService::new(NotificationRepository::new(empty_db())),
        )
    }

    #[tokio::test]
    async fn test_add_rejects_empty_content() {
        let service = build_service(empty_db(), empty_db(), empty_db());
        let user = mock_user("user1", "alice");

        let result = service.add(&user, "c1", input("")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_missing_comment() {
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<comment::Model>::new()])
                .into_connection(),
        );
        let service = build_service(empty_db(), comment_db, empty_db());
        let user = mock_user("user1", "alice");

        let result = service.add(&user, "nonexistent", input("Agreed")).await;
        assert!(matches!(result, Err(AppError::CommentNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_non_author() {
        let existing = mock_reply("r1", "c1", "post1", "user1", "Original");
        let reply_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = build_service(reply_db, empty_db(), empty_db());
        let intruder = mock_user("user2", "bob");

        let result = service.update(&intruder, "r1", input("Changed")).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_allows_post_owner() {
        use sea_orm::MockExecResult;

        fn exec(rows_affected: u64) -> MockExecResult {
            MockExecResult {
                last_insert_id: 0,
                rows_affected,
            }
        }

        let reply_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_reply("r1", "c1", "post1", "user1", "Original")]])
                .into_connection(),
        );
        // serves the ownership lookup, then the counter decrement
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[mock_post("post1", "owner1", "Title")]])
                .append_exec_results([exec(1)])
                .into_connection(),
        );
        // reply likes, notifications, then the reply row
        let cascade_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(0), exec(0), exec(1)])
                .into_connection(),
        );
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_exec_results([exec(1)])
                .into_connection(),
        );

        let service = ReplyService::new(
            ReplyRepository::new(reply_db),
            CommentRepository::new(comment_db),
            PostRepository::new(post_db),
            CascadeRepository::new(cascade_db),
            NotificationService::new(NotificationRepository::new(empty_db())),
        );

        let owner = mock_user("owner1", "owner");
        let counts = service.delete(&owner, "r1").await.unwrap();

        assert_eq!(counts.replies, 1);
    }

    #[tokio::test]
    async fn test_delete_rejects_unrelated_user() {
        let existing = mock_reply("r1", "c1", "post1", "user1", "Original");
        let post = mock_post("post1", "owner1", "Title");

        let reply_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .into_connection(),
        );
        let service = build_service(reply_db, empty_db(), post_db);
        let intruder = mock_user("user3", "carol");

        let result = service.delete(&intruder, "r1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
