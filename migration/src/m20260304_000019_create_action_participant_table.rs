use sea_orm_migration::{prelude::*, schema::*};

use super::m20260304_000018_create_action_table::Action;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionParticipant::Table)
                    .if_not_exists()
                    .col(pk_auto(ActionParticipant::Id))
                    .col(integer(ActionParticipant::ActionId))
                    .col(string(ActionParticipant::UserId))
                    .col(
                        timestamp_with_time_zone(ActionParticipant::JoinedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(string_null(ActionParticipant::RemovedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_action_participant_action_id")
                            .from(ActionParticipant::Table, ActionParticipant::ActionId)
                            .to(Action::Table, Action::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A member appears once per action
        manager
            .create_index(
                Index::create()
                    .name("idx_action_participant_unique")
                    .table(ActionParticipant::Table)
                    .col(ActionParticipant::ActionId)
                    .col(ActionParticipant::UserId)
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
                    .name("idx_action_participant_unique")
                    .table(ActionParticipant::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ActionParticipant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ActionParticipant {
    Table,
    Id,
    ActionId,
    UserId,
    JoinedAt,
    RemovedBy,
}
