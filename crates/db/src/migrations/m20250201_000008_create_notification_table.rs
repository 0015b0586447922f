//! Create notification table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notification::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notification::RecipientId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notification::ActorId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notification::ActorName)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notification::NotificationType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notification::PostId).string_len(32))
                    .col(ColumnDef::new(Notification::CommentId).string_len(32))
                    .col(ColumnDef::new(Notification::ReplyId).string_len(32))
                    .col(ColumnDef::new(Notification::Message).text().not_null())
                    .col(
                        ColumnDef::new(Notification::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notification::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_recipient")
                            .from(Notification::Table, Notification::RecipientId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notification_actor")
                            .from(Notification::Table, Notification::ActorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: recipient_id (for listing a user's notifications)
        manager
            .create_index(
                Index::create()
                    .name("idx_notification_recipient_id")
                    .table(Notification::Table)
                    .col(Notification::RecipientId)
                    .to_owned(),
            )
            .await?;

        // Index: post_id (for post-level cascade deletes)
        manager
            .create_index(
                Index::create()
                    .name("idx_notification_post_id")
                    .table(Notification::Table)
                    .col(Notification::PostId)
                    .to_owned(),
            )
            .await?;

        // Index: comment_id (for comment-level cascade deletes)
        manager
            .create_index(
                Index::create()
                    .name("idx_notification_comment_id")
                    .table(Notification::Table)
                    .col(Notification::CommentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Notification {
    Table,
    Id,
    RecipientId,
    ActorId,
    ActorName,
    NotificationType,
    PostId,
    CommentId,
    ReplyId,
    Message,
    IsRead,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}
