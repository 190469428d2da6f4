use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Action::Table)
                    .if_not_exists()
                    .col(pk_auto(Action::Id))
                    .col(string(Action::GuildId))
                    .col(integer(Action::TypeId))
                    .col(string(Action::TypeName))
                    .col(integer(Action::MaxPlayers))
                    .col(big_integer(Action::TotalValueCents))
                    .col(string(Action::CreatorId))
                    .col(string(Action::Status).default("open"))
                    .col(boolean(Action::RegistrationsOpen).default(false))
                    .col(string_null(Action::Result))
                    .col(string(Action::ChannelId))
                    .col(string_null(Action::MessageId))
                    .col(
                        timestamp_with_time_zone(Action::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Action::ClosedAt))
                    .to_owned(),
            )
            .await?;

        // Unfinished actions per guild, for startup reconciliation and reset
        manager
            .create_index(
                Index::create()
                    .name("idx_action_guild_status")
                    .table(Action::Table)
                    .col(Action::GuildId)
                    .col(Action::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_action_guild_status")
                    .table(Action::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Action::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Action {
    Table,
    Id,
    GuildId,
    TypeId,
    TypeName,
    MaxPlayers,
    TotalValueCents,
    CreatorId,
    Status,
    RegistrationsOpen,
    Result,
    ChannelId,
    MessageId,
    CreatedAt,
    ClosedAt,
}
