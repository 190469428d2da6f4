use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WarningLog::Table)
                    .if_not_exists()
                    .col(pk_auto(WarningLog::Id))
                    .col(string(WarningLog::GuildId))
                    .col(string(WarningLog::UserId))
                    .col(string(WarningLog::ModeratorId))
                    .col(text(WarningLog::Reason))
                    .col(integer(WarningLog::Count))
                    .col(string(WarningLog::Action))
                    .col(
                        timestamp_with_time_zone(WarningLog::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_warning_log_member")
                    .table(WarningLog::Table)
                    .col(WarningLog::GuildId)
                    .col(WarningLog::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_warning_log_member")
                    .table(WarningLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WarningLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum WarningLog {
    Table,
    Id,
    GuildId,
    UserId,
    ModeratorId,
    Reason,
    Count,
    Action,
    CreatedAt,
}
