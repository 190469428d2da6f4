use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionResponsibleRole::Table)
                    .if_not_exists()
                    .col(pk_auto(ActionResponsibleRole::Id))
                    .col(string(ActionResponsibleRole::GuildId))
                    .col(string(ActionResponsibleRole::RoleId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_action_responsible_role_unique")
                    .table(ActionResponsibleRole::Table)
                    .col(ActionResponsibleRole::GuildId)
                    .col(ActionResponsibleRole::RoleId)
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
                    .name("idx_action_responsible_role_unique")
                    .table(ActionResponsibleRole::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ActionResponsibleRole::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActionResponsibleRole {
    Table,
    Id,
    GuildId,
    RoleId,
}
