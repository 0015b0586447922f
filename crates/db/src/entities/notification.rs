//! Notification entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Notification types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum NotificationType {
    #[sea_orm(string_value = "post_liked")]
    PostLiked,
    #[sea_orm(string_value = "comment_added")]
    CommentAdded,
    #[sea_orm(string_value = "comment_liked")]
    CommentLiked,
    #[sea_orm(string_value = "reply_added")]
    ReplyAdded,
    #[sea_orm(string_value = "reply_liked")]
    ReplyLiked,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The user receiving the notification
    #[sea_orm(indexed)]
    pub recipient_id: String,

    /// The user whose action triggered the notification
    #[sea_orm(indexed)]
    pub actor_id: String,

    /// Actor display name, denormalized at creation time
    pub actor_name: String,

    /// Notification type
    pub notification_type: NotificationType,

    /// Related post ID
    #[sea_orm(indexed, nullable)]
    pub post_id: Option<String>,

    /// Related comment ID
    #[sea_orm(indexed, nullable)]
    pub comment_id: Option<String>,

    /// Related reply ID
    #[sea_orm(indexed, nullable)]
    pub reply_id: Option<String>,

    /// Precomputed display message
    #[sea_orm(column_type = "Text")]
    pub message: String,

    /// Has this notification been read?
    #[sea_orm(default_value = false)]
    pub is_read: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RecipientId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Recipient,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ActorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Actor,
}

impl ActiveModelBehavior for ActiveModel {}
