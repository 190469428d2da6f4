use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "guild_settings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub guild_id: String,
    pub registration_channel_id: Option<String>,
    pub registration_message_id: Option<String>,
    pub approval_channel_id: Option<String>,
    pub records_channel_id: Option<String>,
    pub welcome_channel_id: Option<String>,
    pub exit_channel_id: Option<String>,
    pub warnings_channel_id: Option<String>,
    pub provisional_role_id: Option<String>,
    pub member_role_id: Option<String>,
    pub adv1_role_id: Option<String>,
    pub adv2_role_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
