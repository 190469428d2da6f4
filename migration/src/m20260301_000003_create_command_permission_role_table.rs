use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000002_create_command_permission_table::CommandPermission;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommandPermissionRole::Table)
                    .if_not_exists()
                    .col(pk_auto(CommandPermissionRole::Id))
                    .col(integer(CommandPermissionRole::CommandPermissionId))
                    .col(string(CommandPermissionRole::RoleId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_command_permission_role_permission_id")
                            .from(
                                CommandPermissionRole::Table,
                                CommandPermissionRole::CommandPermissionId,
                            )
                            .to(CommandPermission::Table, CommandPermission::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CommandPermissionRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CommandPermissionRole {
    Table,
    Id,
    CommandPermissionId,
    RoleId,
}
