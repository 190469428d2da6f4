use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "command_permission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub command_name: String,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::command_permission_role::Entity")]
    CommandPermissionRole,
}

impl Related<super::command_permission_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommandPermissionRole.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
