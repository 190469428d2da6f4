use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VoiceTime::Table)
                    .if_not_exists()
                    .col(pk_auto(VoiceTime::Id))
                    .col(string(VoiceTime::GuildId))
                    .col(string(VoiceTime::UserId))
                    .col(string(VoiceTime::ChannelId))
                    .col(big_integer(VoiceTime::TotalSeconds).default(0))
                    .to_owned(),
            )
            .await?;

        // One accumulator per member per channel
        manager
            .create_index(
                Index::create()
                    .name("idx_voice_time_unique")
                    .table(VoiceTime::Table)
                    .col(VoiceTime::GuildId)
                    .col(VoiceTime::UserId)
                    .col(VoiceTime::ChannelId)
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
                    .name("idx_voice_time_unique")
                    .table(VoiceTime::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VoiceTime::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VoiceTime {
    Table,
    Id,
    GuildId,
    UserId,
    ChannelId,
    TotalSeconds,
}
