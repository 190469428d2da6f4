//! Per-command role permissions.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{model::permission::CommandPermission, util::parse::parse_snowflake};

pub struct CommandPermissionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommandPermissionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_roles<C: ConnectionTrait>(
        conn: &C,
        permission: entity::command_permission::Model,
    ) -> Result<CommandPermission, DbErr> {
        let roles = entity::prelude::CommandPermissionRole::find()
            .filter(entity::command_permission_role::Column::CommandPermissionId.eq(permission.id))
            .order_by_asc(entity::command_permission_role::Column::Id)
            .all(conn)
            .await?;

        Ok(CommandPermission {
            command_name: permission.command_name,
            role_ids: roles
                .iter()
                .map(|r| parse_snowflake(&r.role_id, "role_id"))
                .collect::<Result<_, _>>()?,
        })
    }

    /// Gets the configuration for one command.
    ///
    /// # Returns
    /// - `Ok(Some(CommandPermission))` - Command is configured (possibly with no roles)
    /// - `Ok(None)` - Command has never been configured
    /// - `Err(DbErr)` - Database error
    pub async fn get(
        &self,
        guild_id: u64,
        command_name: &str,
    ) -> Result<Option<CommandPermission>, DbErr> {
        let Some(permission) = entity::prelude::CommandPermission::find()
            .filter(entity::command_permission::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::command_permission::Column::CommandName.eq(command_name))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(Self::load_roles(self.db, permission).await?))
    }

    /// Gets every configured command for a guild, ordered by name.
    pub async fn get_all(&self, guild_id: u64) -> Result<Vec<CommandPermission>, DbErr> {
        let permissions = entity::prelude::CommandPermission::find()
            .filter(entity::command_permission::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::command_permission::Column::CommandName)
            .all(self.db)
            .await?;

        let mut result = Vec::with_capacity(permissions.len());
        for permission in permissions {
            result.push(Self::load_roles(self.db, permission).await?);
        }

        Ok(result)
    }

    /// Replaces the allowed roles for a command, marking it configured.
    ///
    /// An empty `role_ids` stores an explicit empty set, restricting the command to
    /// administrators.
    pub async fn set_roles(
        &self,
        guild_id: u64,
        command_name: &str,
        role_ids: &[u64],
    ) -> Result<CommandPermission, DbErr> {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::CommandPermission::find()
            .filter(entity::command_permission::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::command_permission::Column::CommandName.eq(command_name))
            .one(&txn)
            .await?;

        let permission = match existing {
            Some(existing) => {
                let mut active: entity::command_permission::ActiveModel = existing.into();
                active.updated_at = ActiveValue::Set(Utc::now());
                active.update(&txn).await?
            }
            None => {
                entity::command_permission::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    command_name: ActiveValue::Set(command_name.to_string()),
                    updated_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        entity::prelude::CommandPermissionRole::delete_many()
            .filter(entity::command_permission_role::Column::CommandPermissionId.eq(permission.id))
            .exec(&txn)
            .await?;

        for role_id in role_ids {
            entity::command_permission_role::ActiveModel {
                command_permission_id: ActiveValue::Set(permission.id),
                role_id: ActiveValue::Set(role_id.to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        let result = Self::load_roles(&txn, permission).await?;
        txn.commit().await?;

        Ok(result)
    }

    /// Removes a command's configuration so it is open to everyone again.
    ///
    /// # Returns
    /// - `Ok(true)` - Configuration existed and was removed
    /// - `Ok(false)` - Command was not configured
    pub async fn remove(&self, guild_id: u64, command_name: &str) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = entity::prelude::CommandPermission::find()
            .filter(entity::command_permission::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::command_permission::Column::CommandName.eq(command_name))
            .one(&txn)
            .await?
        else {
            return Ok(false);
        };

        entity::prelude::CommandPermissionRole::delete_many()
            .filter(entity::command_permission_role::Column::CommandPermissionId.eq(existing.id))
            .exec(&txn)
            .await?;
        entity::prelude::CommandPermission::delete_by_id(existing.id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(true)
    }
}
