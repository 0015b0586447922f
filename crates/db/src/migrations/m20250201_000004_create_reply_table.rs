//! Create reply table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reply::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reply::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reply::CommentId).string_len(32).not_null())
                    .col(ColumnDef::new(Reply::PostId).string_len(32).not_null())
                    .col(ColumnDef::new(Reply::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Reply::Content).text().not_null())
                    .col(
                        ColumnDef::new(Reply::LikesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reply::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Reply::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_comment")
                            .from(Reply::Table, Reply::CommentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_post")
                            .from(Reply::Table, Reply::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_user")
                            .from(Reply::Table, Reply::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: comment_id (for listing replies and cascade filters)
        manager
            .create_index(
                Index::create()
                    .name("idx_reply_comment_id")
                    .table(Reply::Table)
                    .col(Reply::CommentId)
                    .to_owned(),
            )
            .await?;

        // Index: post_id (for post-level cascade filters)
        manager
            .create_index(
                Index::create()
                    .name("idx_reply_post_id")
                    .table(Reply::Table)
                    .col(Reply::PostId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reply::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reply {
    Table,
    Id,
    CommentId,
    PostId,
    UserId,
    Content,
    LikesCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Comment {
    Table,
    Id,
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
