use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionSettings::Table)
                    .if_not_exists()
                    .col(pk_auto(ActionSettings::Id))
                    .col(string_uniq(ActionSettings::GuildId))
                    .col(string_null(ActionSettings::ActionChannelId))
                    .col(string_null(ActionSettings::RankingChannelId))
                    .col(string_null(ActionSettings::RankingMessageId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActionSettings {
    Table,
    Id,
    GuildId,
    ActionChannelId,
    RankingChannelId,
    RankingMessageId,
}
