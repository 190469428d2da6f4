use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GuildSettings::Table)
                    .if_not_exists()
                    .col(pk_auto(GuildSettings::Id))
                    .col(string_uniq(GuildSettings::GuildId))
                    .col(string_null(GuildSettings::RegistrationChannelId))
                    .col(string_null(GuildSettings::RegistrationMessageId))
                    .col(string_null(GuildSettings::ApprovalChannelId))
                    .col(string_null(GuildSettings::RecordsChannelId))
                    .col(string_null(GuildSettings::WelcomeChannelId))
                    .col(string_null(GuildSettings::ExitChannelId))
                    .col(string_null(GuildSettings::WarningsChannelId))
                    .col(string_null(GuildSettings::ProvisionalRoleId))
                    .col(string_null(GuildSettings::MemberRoleId))
                    .col(string_null(GuildSettings::Adv1RoleId))
                    .col(string_null(GuildSettings::Adv2RoleId))
                    .col(
                        timestamp_with_time_zone(GuildSettings::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(GuildSettings::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GuildSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GuildSettings {
    Table,
    Id,
    GuildId,
    RegistrationChannelId,
    RegistrationMessageId,
    ApprovalChannelId,
    RecordsChannelId,
    WelcomeChannelId,
    ExitChannelId,
    WarningsChannelId,
    ProvisionalRoleId,
    MemberRoleId,
    #[sea_orm(iden = "adv1_role_id")]
    Adv1RoleId,
    #[sea_orm(iden = "adv2_role_id")]
    Adv2RoleId,
    CreatedAt,
    UpdatedAt,
}
