use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionType::Table)
                    .if_not_exists()
                    .col(pk_auto(ActionType::Id))
                    .col(string(ActionType::GuildId))
                    .col(string(ActionType::Name))
                    .col(integer(ActionType::MinPlayers))
                    .col(integer(ActionType::MaxPlayers))
                    .col(big_integer(ActionType::TotalValueCents))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActionType {
    Table,
    Id,
    GuildId,
    Name,
    MinPlayers,
    MaxPlayers,
    TotalValueCents,
}
