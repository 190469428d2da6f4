use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VoiceSettings::Table)
                    .if_not_exists()
                    .col(pk_auto(VoiceSettings::Id))
                    .col(string_uniq(VoiceSettings::GuildId))
                    .col(boolean(VoiceSettings::MonitorAll).default(false))
                    .col(string_null(VoiceSettings::AfkChannelId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VoiceSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VoiceSettings {
    Table,
    Id,
    GuildId,
    MonitorAll,
    AfkChannelId,
}
