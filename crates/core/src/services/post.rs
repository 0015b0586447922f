//! Post service.

use chrono::Utc;
use devshare_common::{AppError, AppResult, IdGenerator};
use devshare_db::{
    entities::{post, user},
    repositories::{CascadeCounts, CascadeRepository, PostRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

/// Fields accepted when creating or updating a post. All fields are
/// optional so the same shape serves partial updates; `create` enforces
/// the required ones.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PostInput {
    /// Post title.
    #[validate(length(max = 200))]
    pub title: Option<String>,
    /// Project description.
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Technology tags.
    #[validate(length(max = 20))]
    pub tech_stack: Option<Vec<String>>,
    /// Repository link.
    pub github_link: Option<String>,
    /// Opaque blob-store file references.
    #[validate(length(max = 10))]
    pub files: Option<Vec<serde_json::Value>>,
}

/// Post service for business logic.
#[derive(Clone)]
pub struct PostService {
    post_repo: PostRepository,
    cascade_repo: CascadeRepository,
    id_gen: IdGenerator,
}

impl PostService {
    /// Create a new post service.
    #[must_use]
    pub const fn new(post_repo: PostRepository, cascade_repo: CascadeRepository) -> Self {
        Self {
            post_repo,
            cascade_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a post owned by `owner`.
    pub async fn create(&self, owner: &user::Model, input: PostInput) -> AppResult<post::Model> {
        input.validate()?;

        let title = input
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("title is required".to_string()))?;
        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::Validation("description is required".to_string()))?;

        let tech_stack = input.tech_stack.unwrap_or_default();
        Self::validate_tech_entries(&tech_stack)?;

        if let Some(link) = input.github_link.as_deref() {
            Self::validate_github_link(link)?;
        }

        let files = input.files.unwrap_or_default();

        let model = post::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(owner.id.clone()),
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            tech_stack: Set(json!(tech_stack)),
            github_link: Set(input.github_link),
            files: Set(json!(files)),
            likes_count: Set(0),
            comments_count: Set(0),
            created_at: Set(Utc::now().into()),
            updated_at: Set(None),
        };

        self.post_repo.create(model).await
    }

    /// Update a post. Only provided fields change; owner only.
    pub async fn update(
        &self,
        user: &user::Model,
        post_id: &str,
        input: PostInput,
    ) -> AppResult<post::Model> {
        input.validate()?;

        let existing = self.post_repo.get_by_id(post_id).await?;
        if existing.user_id != user.id {
            return Err(AppError::Forbidden("not the post owner".to_string()));
        }

        let mut model: post::ActiveModel = existing.into();

        if let Some(title) = input.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(AppError::Validation("title must not be empty".to_string()));
            }
            model.title = Set(title);
        }
        if let Some(description) = input.description {
            let description = description.trim().to_string();
            if description.is_empty() {
                return Err(AppError::Validation(
                    "description must not be empty".to_string(),
                ));
            }
            model.description = Set(description);
        }
        if let Some(tech_stack) = input.tech_stack {
            Self::validate_tech_entries(&tech_stack)?;
            model.tech_stack = Set(json!(tech_stack));
        }
        if let Some(link) = input.github_link {
            Self::validate_github_link(&link)?;
            model.github_link = Set(Some(link));
        }
        if let Some(files) = input.files {
            model.files = Set(json!(files));
        }

        model.updated_at = Set(Some(Utc::now().into()));

        self.post_repo.update(model).await
    }

    /// Get a post by ID.
    pub async fn get(&self, post_id: &str) -> AppResult<post::Model> {
        self.post_repo.get_by_id(post_id).await
    }

    /// List posts, newest first.
    pub async fn list(&self, limit: u64, offset: u64) -> AppResult<Vec<post::Model>> {
        self.post_repo.list(limit, offset).await
    }

    /// Delete a post and its entire graph.
    ///
    /// Reports not-found both when the post is missing and when it
    /// belongs to someone else, so other users' post IDs cannot be
    /// enumerated.
    pub async fn delete(&self, user: &user::Model, post_id: &str) -> AppResult<CascadeCounts> {
        let post = self.post_repo.get_by_id(post_id).await?;
        if post.user_id != user.id {
            return Err(AppError::PostNotFound(post_id.to_string()));
        }

        let counts = self.cascade_repo.delete_post_graph(post_id).await?;
        tracing::info!(
            post_id = %post_id,
            comments = counts.comments,
            replies = counts.replies,
            post_likes = counts.post_likes,
            comment_likes = counts.comment_likes,
            reply_likes = counts.reply_likes,
            notifications = counts.notifications,
            "Deleted post graph"
        );
        Ok(counts)
    }

    fn validate_tech_entries(tech_stack: &[String]) -> AppResult<()> {
        if tech_stack.iter().any(|t| t.trim().is_empty()) {
            return Err(AppError::Validation(
                "tech stack entries must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    fn validate_github_link(link: &str) -> AppResult<()> {
        // Expects at least https://github.com/user/repo
        if !link.starts_with("https://github.com/") || link.split('/').count() < 5 {
            return Err(AppError::Validation(
                "github_link must be a https://github.com/user/repo URL".to_string(),
            ));
        }
        Ok(())
    }
}
