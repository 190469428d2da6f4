use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MemberIndex::Table)
                    .if_not_exists()
                    .col(pk_auto(MemberIndex::Id))
                    .col(string(MemberIndex::GuildId))
                    .col(string(MemberIndex::AssignedId))
                    .col(string(MemberIndex::UserId))
                    .col(
                        timestamp_with_time_zone(MemberIndex::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_index_assigned_unique")
                    .table(MemberIndex::Table)
                    .col(MemberIndex::GuildId)
                    .col(MemberIndex::AssignedId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_member_index_user_unique")
                    .table(MemberIndex::Table)
                    .col(MemberIndex::GuildId)
                    .col(MemberIndex::UserId)
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
                    .name("idx_member_index_user_unique")
                    .table(MemberIndex::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_member_index_assigned_unique")
                    .table(MemberIndex::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MemberIndex::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MemberIndex {
    Table,
    Id,
    GuildId,
    AssignedId,
    UserId,
    UpdatedAt,
}
