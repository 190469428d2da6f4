use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberWarning::Table)
                    .if_not_exists()
                    .col(pk_auto(MemberWarning::Id))
                    .col(string(MemberWarning::GuildId))
                    .col(string(MemberWarning::UserId))
                    .col(integer(MemberWarning::Count).default(0))
                    .col(text_null(MemberWarning::LastReason))
                    .col(
                        timestamp_with_time_zone(MemberWarning::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_warning_unique")
                    .table(MemberWarning::Table)
                    .col(MemberWarning::GuildId)
                    .col(MemberWarning::UserId)
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
                    .name("idx_member_warning_unique")
                    .table(MemberWarning::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MemberWarning::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MemberWarning {
    Table,
    Id,
    GuildId,
    UserId,
    Count,
    LastReason,
    UpdatedAt,
}
