use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VoiceMonitoredChannel::Table)
                    .if_not_exists()
                    .col(pk_auto(VoiceMonitoredChannel::Id))
                    .col(string(VoiceMonitoredChannel::GuildId))
                    .col(string(VoiceMonitoredChannel::ChannelId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_voice_monitored_channel_unique")
                    .table(VoiceMonitoredChannel::Table)
                    .col(VoiceMonitoredChannel::GuildId)
                    .col(VoiceMonitoredChannel::ChannelId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_voice_monitored_channel_unique")
                    .table(VoiceMonitoredChannel::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VoiceMonitoredChannel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VoiceMonitoredChannel {
    Table,
    Id,
    GuildId,
    ChannelId,
}
