//! Create reply like table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReplyLike::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReplyLike::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReplyLike::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(ReplyLike::ReplyId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(ReplyLike::CommentId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReplyLike::PostId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(ReplyLike::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_like_user")
                            .from(ReplyLike::Table, ReplyLike::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reply_like_reply")
                            .from(ReplyLike::Table, ReplyLike::ReplyId)
                            .to(Reply::Table, Reply::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, reply_id) - one like per user per reply
        manager
            .create_index(
                Index::create()
                    .name("idx_reply_like_user_reply")
                    .table(ReplyLike::Table)
                    .col(ReplyLike::UserId)
                    .col(ReplyLike::ReplyId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: reply_id (for counts and cascade filters)
        manager
            .create_index(
                Index::create()
                    .name("idx_reply_like_reply_id")
                    .table(ReplyLike::Table)
                    .col(ReplyLike::ReplyId)
                    .to_owned(),
            )
            .await?;

        // Index: comment_id (for comment-level cascade filters)
        manager
            .create_index(
                Index::create()
                    .name("idx_reply_like_comment_id")
                    .table(ReplyLike::Table)
                    .col(ReplyLike::CommentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReplyLike::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ReplyLike {
    Table,
    Id,
    UserId,
    ReplyId,
    CommentId,
    PostId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Reply {
    Table,
    Id,
}
