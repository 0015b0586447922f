//! Comment service.

use chrono::Utc;
use devshare_common::{AppError, AppResult, IdGenerator};
use devshare_db::{
    entities::{comment, notification::NotificationType, user},
    repositories::{CascadeCounts, CascadeRepository, CommentRepository, PostRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::services::notification::{NotificationEvent, NotificationService};

/// Comment body accepted on create and update.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CommentInput {
    /// Comment content.
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}

/// Comment service for business logic.
#[derive(Clone)]
pub struct CommentService {
    comment_repo: CommentRepository,
    post_repo: PostRepository,
    cascade_repo: CascadeRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

impl CommentService {
    /// Create a new comment service.
    #[must_use]
    pub const fn new(
        comment_repo: CommentRepository,
        post_repo: PostRepository,
        cascade_repo: CascadeRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            comment_repo,
            post_repo,
            cascade_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a comment to a post.
    ///
    /// Bumps the post's comments counter and notifies the post owner.
    pub async fn add(
        &self,
        user: &user::Model,
        post_id: &str,
        input: CommentInput,
    ) -> AppResult<comment::Model> {
        input.validate()?;
        let content = Self::trimmed_content(&input.content)?;
        let post = self.post_repo.get_by_id(post_id).await?;

        let now = Utc::now();
        let model = comment::ActiveModel {
            id: Set(self.id_gen.generate()),
            post_id: Set(post_id.to_string()),
            user_id: Set(user.id.clone()),
            content: Set(content.clone()),
            replies_count: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let created = self.comment_repo.create(model).await?;

        self.post_repo.increment_comments_count(post_id).await?;

        if let Err(e) = self
            .notifications
            .notify(
                user,
                NotificationEvent {
                    recipient_id: &post.user_id,
                    notification_type: NotificationType::CommentAdded,
                    post_id: Some(post_id),
                    comment_id: Some(&created.id),
                    reply_id: None,
                    post_title: Some(&post.title),
                    content: Some(&content),
                },
            )
            .await
        {
            tracing::warn!(error = %e, post_id = %post_id, "Failed to create comment notification");
        }

        Ok(created)
    }

    /// Update a comment's content. Author only.
    pub async fn update(
        &self,
        user: &user::Model,
        comment_id: &str,
        input: CommentInput,
    ) -> AppResult<comment::Model> {
        input.validate()?;
        let content = Self::trimmed_content(&input.content)?;
        let existing = self.comment_repo.get_by_id(comment_id).await?;

        if existing.user_id != user.id {
            return Err(AppError::Forbidden("not the comment author".to_string()));
        }

        let mut model: comment::ActiveModel = existing.into();
        model.content = Set(content);
        model.updated_at = Set(Utc::now().into());

        self.comment_repo.update(model).await
    }

    /// Delete a comment, its replies, and all dependent rows.
    ///
    /// Allowed for the comment author or the post owner. The post's
    /// comments counter drops by one plus the number of replies removed.
    pub async fn delete(&self, user: &user::Model, comment_id: &str) -> AppResult<CascadeCounts> {
        let comment = self.comment_repo.get_by_id(comment_id).await?;
        let post = self.post_repo.get_by_id(&comment.post_id).await?;

        if comment.user_id != user.id && post.user_id != user.id {
            return Err(AppError::Forbidden(
                "only the comment author or post owner may delete".to_string(),
            ));
        }

        let counts = self.cascade_repo.delete_comment_graph(comment_id).await?;

        let removed = i64::try_from(counts.comments + counts.replies).unwrap_or(i64::MAX);
        self.post_repo
            .decrement_comments_count_by(&comment.post_id, removed)
            .await?;

        tracing::info!(
            comment_id = %comment_id,
            replies = counts.replies,
            comment_likes = counts.comment_likes,
            reply_likes = counts.reply_likes,
            notifications = counts.notifications,
            "Deleted comment graph"
        );
        Ok(counts)
    }

    /// Get a comment by ID.
    pub async fn get(&self, comment_id: &str) -> AppResult<comment::Model> {
        self.comment_repo.get_by_id(comment_id).await
    }

    /// List comments on a post, oldest first.
    pub async fn list(
        &self,
        post_id: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<comment::Model>> {
        self.post_repo.get_by_id(post_id).await?;
        self.comment_repo.find_by_post(post_id, limit, offset).await
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
    use devshare_db::entities::post;
    use devshare_db::repositories::NotificationRepository;
    use devshare_db::test_utils::{mock_comment, mock_post, mock_user};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    fn input(content: &str) -> CommentInput {
        CommentInput {
            content: content.to_string(),
        }
    }

    fn build_service(
        comment_db: Arc<sea_orm::DatabaseConnection>,
        post_db: Arc<sea_orm::DatabaseConnection>,
    ) -> CommentService {
        CommentService::new(
            CommentRepository::new(comment_db),
            PostRepository::new(post_db),
            CascadeRepository::new(empty_db()),
            NotificationService::new(NotificationRepository::new(empty_db())),
        )
    }

    #[tokio::test]
    async fn test_add_rejects_empty_content() {
        let service = build_service(empty_db(), empty_db());
        let user = mock_user("user1", "alice");

        let result = service.add(&user, "post1", input("   ")).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_rejects_long_content() {
        let service = build_service(empty_db(), empty_db());
        let user = mock_user("user1", "alice");

        let long = "x".repeat(1001);
        let result = service.add(&user, "post1", input(&long)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_missing_post() {
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<post::Model>::new()])
                .into_connection(),
        );
        let service = build_service(empty_db(), post_db);
        let user = mock_user("user1", "alice");

        let result = service.add(&user, "nonexistent", input("Nice!")).await;
        assert!(matches!(result, Err(AppError::PostNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_non_author() {
        let existing = mock_comment("c1", "post1", "user1", "Original");
        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = build_service(comment_db, empty_db());
        let intruder = mock_user("user2", "bob");

        let result = service.update(&intruder, "c1", input("Changed")).await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_rejects_unrelated_user() {
        let existing = mock_comment("c1", "post1", "user1", "Original");
        let post = mock_post("post1", "owner1", "Title");

        let comment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let post_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[post]])
                .into_connection(),
        );
        let service = build_service(comment_db, post_db);
        let intruder = mock_user("user3", "carol");

        let result = service.delete(&intruder, "c1").await;
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
