//! Create comment like table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommentLike::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CommentLike::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CommentLike::UserId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommentLike::CommentId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CommentLike::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_like_user")
                            .from(CommentLike::Table, CommentLike::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_like_comment")
                            .from(CommentLike::Table, CommentLike::CommentId)
                            .to(Comment::Table, Comment::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, comment_id) - one like per user per comment
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_like_user_comment")
                    .table(CommentLike::Table)
                    .col(CommentLike::UserId)
                    .col(CommentLike::CommentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: comment_id (for counts and cascade filters)
        manager
            .create_index(
                Index::create()
                    .name("idx_comment_like_comment_id")
                    .table(CommentLike::Table)
                    .col(CommentLike::CommentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommentLike::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CommentLike {
    Table,
    Id,
    UserId,
    CommentId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Comment {
    Table,
    Id,
}
