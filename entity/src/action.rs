use sea_orm::entity::prelude::*;

/// A running action. Type name, capacity and value are copied from the action type
/// when created, so editing or deleting the type leaves it untouched.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "action")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub type_id: i32,
    pub type_name: String,
    pub max_players: i32,
    pub total_value_cents: i64,
    pub creator_id: String,
    /// One of `open`, `finished`.
    pub status: String,
    pub registrations_open: bool,
    /// One of `victory`, `defeat` once finished.
    pub result: Option<String>,
    pub channel_id: String,
    pub message_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub closed_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::action_participant::Entity")]
    ActionParticipant,
}

impl Related<super::action_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActionParticipant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
