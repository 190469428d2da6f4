use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VoiceAllowedRole::Table)
                    .if_not_exists()
                    .col(pk_auto(VoiceAllowedRole::Id))
                    .col(string(VoiceAllowedRole::GuildId))
                    .col(string(VoiceAllowedRole::RoleId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_voice_allowed_role_unique")
                    .table(VoiceAllowedRole::Table)
                    .col(VoiceAllowedRole::GuildId)
                    .col(VoiceAllowedRole::RoleId)
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
                    .name("idx_voice_allowed_role_unique")
                    .table(VoiceAllowedRole::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(VoiceAllowedRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VoiceAllowedRole {
    Table,
    Id,
    GuildId,
    RoleId,
}
