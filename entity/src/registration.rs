use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "registration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub user_id: String,
    pub display_name: String,
    pub assigned_id: String,
    pub recruiter_id: String,
    /// One of `pending`, `approved`, `rejected`.
    pub status: String,
    pub approval_channel_id: Option<String>,
    pub approval_message_id: Option<String>,
    pub moderator_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub decided_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
