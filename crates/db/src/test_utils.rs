//! Model factories for repository and service tests.

use chrono::Utc;
use serde_json::json;

use crate::entities::{
    comment, comment_like, notification, notification::NotificationType, post, post_like, reply,
    reply_like, user,
};

/// Build a user model with sensible defaults.
#[must_use]
pub fn mock_user(id: &str, username: &str) -> user::Model {
    user::Model {
        id: id.to_string(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        display_name: None,
        api_token: Some(format!("token-{id}")),
        created_at: Utc::now().into(),
    }
}

/// Build a post model with sensible defaults.
#[must_use]
pub fn mock_post(id: &str, user_id: &str, title: &str) -> post::Model {
    post::Model {
        id: id.to_string(),
        user_id: user_id.to_string(),
        title: title.to_string(),
        description: "A test project".to_string(),
        tech_stack: json!(["rust"]),
        github_link: None,
        files: json!([]),
        likes_count: 0,
        comments_count: 0,
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

/// Build a comment model with sensible defaults.
#[must_use]
pub fn mock_comment(id: &str, post_id: &str, user_id: &str, content: &str) -> comment::Model {
    comment::Model {
        id: id.to_string(),
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
        content: content.to_string(),
        replies_count: 0,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

/// Build a reply model with sensible defaults.
#[must_use]
pub fn mock_reply(
    id: &str,
    comment_id: &str,
    post_id: &str,
    user_id: &str,
    content: &str,
) -> reply::Model {
    reply::Model {
        id: id.to_string(),
        comment_id: comment_id.to_string(),
        post_id: post_id.to_string(),
        user_id: user_id.to_string(),
        content: content.to_string(),
        likes_count: 0,
        created_at: Utc::now().into(),
        updated_at: Utc::now().into(),
    }
}

/// Build a post like model.
#[must_use]
pub fn mock_post_like(id: &str, user_id: &str, post_id: &str) -> post_like::Model {
    post_like::Model {
        id: id.to_string(),
        user_id: user_id.to_string(),
        post_id: post_id.to_string(),
        created_at: Utc::now().into(),
    }
}

/// Build a comment like model.
#[must_use]
pub fn mock_comment_like(id: &str, user_id: &str, comment_id: &str) -> comment_like::Model {
    comment_like::Model {
        id: id.to_string(),
        user_id: user_id.to_string(),
        comment_id: comment_id.to_string(),
        created_at: Utc::now().into(),
    }
}

/// Build a reply like model.
#[must_use]
pub fn mock_reply_like(
    id: &str,
    user_id: &str,
    reply_id: &str,
    comment_id: &str,
    post_id: &str,
) -> reply_like::Model {
    reply_like::Model {
        id: id.to_string(),
        user_id: user_id.to_string(),
        reply_id: reply_id.to_string(),
        comment_id: comment_id.to_string(),
        post_id: post_id.to_string(),
        created_at: Utc::now().into(),
    }
}

/// Build a notification model.
#[must_use]
pub fn mock_notification(
    id: &str,
    recipient_id: &str,
    actor_id: &str,
    notification_type: NotificationType,
    message: &str,
) -> notification::Model {
    notification::Model {
        id: id.to_string(),
        recipient_id: recipient_id.to_string(),
        actor_id: actor_id.to_string(),
        actor_name: "Test User".to_string(),
        notification_type,
        post_id: None,
        comment_id: None,
        reply_id: None,
        message: message.to_string(),
        is_read: false,
        created_at: Utc::now().into(),
    }
}
