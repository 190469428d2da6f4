use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VoiceSession::Table)
                    .if_not_exists()
                    .col(pk_auto(VoiceSession::Id))
                    .col(string(VoiceSession::GuildId))
                    .col(string(VoiceSession::UserId))
                    .col(string(VoiceSession::ChannelId))
                    .col(timestamp_with_time_zone(VoiceSession::JoinedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_voice_session_unique")
                    .table(VoiceSession::Table)
                    .col(VoiceSession::GuildId)
                    .col(VoiceSession::UserId)
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
                    .name("idx_voice_session_unique")
                    .table(VoiceSession::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VoiceSession::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VoiceSession {
    Table,
    Id,
    GuildId,
    UserId,
    ChannelId,
    JoinedAt,
}
