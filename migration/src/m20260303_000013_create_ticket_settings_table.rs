use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketSettings::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketSettings::Id))
                    .col(string_uniq(TicketSettings::GuildId))
                    .col(string_null(TicketSettings::CategoryId))
                    .col(string_null(TicketSettings::LogChannelId))
                    .col(string_null(TicketSettings::StaffRoleId))
                    .col(integer(TicketSettings::MaxOpenPerUser).default(1))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TicketSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketSettings {
    Table,
    Id,
    GuildId,
    CategoryId,
    LogChannelId,
    StaffRoleId,
    MaxOpenPerUser,
}
