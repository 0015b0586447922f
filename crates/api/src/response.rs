//! API response types.

#![allow(missing_docs)]

use devshare_db::{
    entities::{comment, comment_like, notification, post, post_like, reply, reply_like, user},
    repositories::CascadeCounts,
};
use serde::Serialize;

/// Post response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub tech_stack: serde_json::Value,
    pub github_link: Option<String>,
    pub files: serde_json::Value,
    pub likes_count: i32,
    pub comments_count: i32,
    pub created_at: String,
    pub updated_at: Option<String>,
}

impl From<post::Model> for PostResponse {
    fn from(p: post::Model) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            title: p.title,
            description: p.description,
            tech_stack: p.tech_stack,
            github_link: p.github_link,
            files: p.files,
            likes_count: p.likes_count,
            comments_count: p.comments_count,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Comment response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub replies_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<comment::Model> for CommentResponse {
    fn from(c: comment::Model) -> Self {
        Self {
            id: c.id,
            post_id: c.post_id,
            user_id: c.user_id,
            content: c.content,
            replies_count: c.replies_count,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

/// Reply response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyResponse {
    pub id: String,
    pub comment_id: String,
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub likes_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<reply::Model> for ReplyResponse {
    fn from(r: reply::Model) -> Self {
        Self {
            id: r.id,
            comment_id: r.comment_id,
            post_id: r.post_id,
            user_id: r.user_id,
            content: r.content,
            likes_count: r.likes_count,
            created_at: r.created_at.to_rfc3339(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

/// A like row, shared shape for post, comment, and reply likes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub id: String,
    pub user_id: String,
    pub created_at: String,
}

impl From<post_like::Model> for LikeResponse {
    fn from(l: post_like::Model) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            created_at: l.created_at.to_rfc3339(),
        }
    }
}

impl From<comment_like::Model> for LikeResponse {
    fn from(l: comment_like::Model) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            created_at: l.created_at.to_rfc3339(),
        }
    }
}

impl From<reply_like::Model> for LikeResponse {
    fn from(l: reply_like::Model) -> Self {
        Self {
            id: l.id,
            user_id: l.user_id,
            created_at: l.created_at.to_rfc3339(),
        }
    }
}

/// Notification response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: String,
    pub actor_id: String,
    pub actor_name: String,
    #[serde(rename = "type")]
    pub notification_type: notification::NotificationType,
    pub post_id: Option<String>,
    pub comment_id: Option<String>,
    pub reply_id: Option<String>,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

impl From<notification::Model> for NotificationResponse {
    fn from(n: notification::Model) -> Self {
        Self {
            id: n.id,
            actor_id: n.actor_id,
            actor_name: n.actor_name,
            notification_type: n.notification_type,
            post_id: n.post_id,
            comment_id: n.comment_id,
            reply_id: n.reply_id,
            message: n.message,
            is_read: n.is_read,
            created_at: n.created_at.to_rfc3339(),
        }
    }
}

/// Account response for the authenticated user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: String,
}

impl From<user::Model> for AccountResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            display_name: u.display_name,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Rows removed by a cascade delete.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeResponse {
    pub comments: u64,
    pub replies: u64,
    pub post_likes: u64,
    pub comment_likes: u64,
    pub reply_likes: u64,
    pub notifications: u64,
}

impl From<CascadeCounts> for CascadeResponse {
    fn from(c: CascadeCounts) -> Self {
        Self {
            comments: c.comments,
            replies: c.replies,
            post_likes: c.post_likes,
            comment_likes: c.comment_likes,
            reply_likes: c.reply_likes,
            notifications: c.notifications,
        }
    }
}
