use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_auto(Ticket::Id))
                    .col(string(Ticket::GuildId))
                    .col(string_uniq(Ticket::ChannelId))
                    .col(string(Ticket::OpenerId))
                    .col(string(Ticket::Status).default("open"))
                    .col(string_null(Ticket::ClaimedBy))
                    .col(string_null(Ticket::ControlMessageId))
                    .col(
                        timestamp_with_time_zone(Ticket::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Ticket::ClosedAt))
                    .to_owned(),
            )
            .await?;

        // Open-ticket count per opener
        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_guild_opener")
                    .table(Ticket::Table)
                    .col(Ticket::GuildId)
                    .col(Ticket::OpenerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_ticket_guild_opener")
                    .table(Ticket::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    GuildId,
    ChannelId,
    OpenerId,
    Status,
    ClaimedBy,
    ControlMessageId,
    CreatedAt,
    ClosedAt,
}
