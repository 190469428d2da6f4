use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommandPermission::Table)
                    .if_not_exists()
                    .col(pk_auto(CommandPermission::Id))
                    .col(string(CommandPermission::GuildId))
                    .col(string(CommandPermission::CommandName))
                    .col(
                        timestamp_with_time_zone(CommandPermission::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One configuration row per command per guild
        manager
            .create_index(
                Index::create()
                    .name("idx_command_permission_unique")
                    .table(CommandPermission::Table)
                    .col(CommandPermission::GuildId)
                    .col(CommandPermission::CommandName)
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
                    .name("idx_command_permission_unique")
                    .table(CommandPermission::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CommandPermission::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CommandPermission {
    Table,
    Id,
    GuildId,
    CommandName,
    UpdatedAt,
}
