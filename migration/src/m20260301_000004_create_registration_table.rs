use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registration::Table)
                    .if_not_exists()
                    .col(pk_auto(Registration::Id))
                    .col(string(Registration::GuildId))
                    .col(string(Registration::UserId))
                    .col(string(Registration::DisplayName))
                    .col(string(Registration::AssignedId))
                    .col(string(Registration::RecruiterId))
                    .col(string(Registration::Status).default("pending"))
                    .col(string_null(Registration::ApprovalChannelId))
                    .col(string_null(Registration::ApprovalMessageId))
                    .col(string_null(Registration::ModeratorId))
                    .col(
                        timestamp_with_time_zone(Registration::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(timestamp_with_time_zone_null(Registration::DecidedAt))
                    .to_owned(),
            )
            .await?;

        // Pending reconciliation and record scans filter by guild and status
        manager
            .create_index(
                Index::create()
                    .name("idx_registration_guild_status")
                    .table(Registration::Table)
                    .col(Registration::GuildId)
                    .col(Registration::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_registration_guild_status")
                    .table(Registration::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Registration::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Registration {
    Table,
    Id,
    GuildId,
    UserId,
    DisplayName,
    AssignedId,
    RecruiterId,
    Status,
    ApprovalChannelId,
    ApprovalMessageId,
    ModeratorId,
    CreatedAt,
    DecidedAt,
}
