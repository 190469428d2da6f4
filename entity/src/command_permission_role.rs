use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "command_permission_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub command_permission_id: i32,
    pub role_id: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::command_permission::Entity",
        from = "Column::CommandPermissionId",
        to = "super::command_permission::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    CommandPermission,
}

impl Related<super::command_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommandPermission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
