//! Reply like entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A record of a user liking a reply. At most one row exists per
/// (`user_id`, `reply_id`) pair, enforced by a unique index.
///
/// The comment and post IDs are denormalized so cascade deletes can
/// filter by ancestor without joining.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reply_like")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// User who liked the reply.
    #[sea_orm(indexed)]
    pub user_id: String,

    /// Reply that was liked.
    #[sea_orm(indexed)]
    pub reply_id: String,

    /// Parent comment of the reply.
    #[sea_orm(indexed)]
    pub comment_id: String,

    /// Grandparent post of the reply.
    #[sea_orm(indexed)]
    pub post_id: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::reply::Entity",
        from = "Column::ReplyId",
        to = "super::reply::Column::Id",
        on_delete = "Cascade"
    )]
    Reply,
}

impl Related<super::reply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reply.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
