use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionStat::Table)
                    .if_not_exists()
                    .col(pk_auto(ActionStat::Id))
                    .col(string(ActionStat::GuildId))
                    .col(string(ActionStat::UserId))
                    .col(integer(ActionStat::Participations).default(0))
                    .col(big_integer(ActionStat::TotalEarnedCents).default(0))
                    .to_owned(),
            )
            .await?;

        // One counter row per member
        manager
            .create_index(
                Index::create()
                    .name("idx_action_stat_unique")
                    .table(ActionStat::Table)
                    .col(ActionStat::GuildId)
                    .col(ActionStat::UserId)
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
                    .name("idx_action_stat_unique")
                    .table(ActionStat::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ActionStat::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActionStat {
    Table,
    Id,
    GuildId,
    UserId,
    Participations,
    TotalEarnedCents,
}
