//! Create post like table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostLike::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PostLike::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PostLike::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(PostLike::PostId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(PostLike::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_like_user")
                            .from(PostLike::Table, PostLike::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_post_like_post")
                            .from(PostLike::Table, PostLike::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: (user_id, post_id) - one like per user per post
        manager
            .create_index(
                Index::create()
                    .name("idx_post_like_user_post")
                    .table(PostLike::Table)
                    .col(PostLike::UserId)
                    .col(PostLike::PostId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: post_id (for listing likes on a post)
        manager
            .create_index(
                Index::create()
                    .name("idx_post_like_post_id")
                    .table(PostLike::Table)
                    .col(PostLike::PostId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostLike::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PostLike {
    Table,
    Id,
    UserId,
    PostId,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Post {
    Table,
    Id,
}
