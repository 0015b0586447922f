//! Post entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Owner user ID
    #[sea_orm(indexed)]
    pub user_id: String,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Technology tags, a JSON array of strings
    pub tech_stack: Json,

    /// Link to the project repository
    #[sea_orm(nullable)]
    pub github_link: Option<String>,

    /// Opaque blob-store references, a JSON array of
    /// `{file_id, filename, content_type}` objects
    pub files: Json,

    /// Count of post likes (denormalized)
    #[sea_orm(default_value = 0)]
    pub likes_count: i32,

    /// Count of comments plus replies under this post (denormalized)
    #[sea_orm(default_value = 0)]
    pub comments_count: i32,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
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

    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,

    #[sea_orm(has_many = "super::post_like::Entity")]
    Likes,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
