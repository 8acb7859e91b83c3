use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Participants live in different tables (admin users, vendors, customers),
        // so sender and recipient are stored as (kind, id) pairs without foreign keys
        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Message::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Message::SenderKind).string_len(16).not_null())
                    .col(ColumnDef::new(Message::SenderId).integer().not_null())
                    .col(ColumnDef::new(Message::RecipientKind).string_len(16).not_null())
                    .col(ColumnDef::new(Message::RecipientId).integer().not_null())
                    .col(ColumnDef::new(Message::Content).text().not_null())
                    .col(ColumnDef::new(Message::IsSent).boolean().not_null().default(false))
                    .col(ColumnDef::new(Message::IsSeen).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Message::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_message_sender")
                    .table(Message::Table)
                    .col(Message::SenderKind)
                    .col(Message::SenderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_message_recipient")
                    .table(Message::Table)
                    .col(Message::RecipientKind)
                    .col(Message::RecipientId)
                    .col(Message::IsSeen)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Message::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Message {
    Table,
    Id,
    SenderKind,
    SenderId,
    RecipientKind,
    RecipientId,
    Content,
    IsSent,
    IsSeen,
    CreatedAt,
}
