//! Guild settings repository.
//!
//! Settings rows are created lazily on the first setup interaction and then mutated one
//! field at a time. Rows are never deleted.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::settings::{GuildSettings, SettingsField};

pub struct SettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_entity(
        &self,
        guild_id: u64,
    ) -> Result<Option<entity::guild_settings::Model>, DbErr> {
        entity::prelude::GuildSettings::find()
            .filter(entity::guild_settings::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await
    }

    async fn get_or_create_entity(
        &self,
        guild_id: u64,
    ) -> Result<entity::guild_settings::Model, DbErr> {
        if let Some(existing) = self.find_entity(guild_id).await? {
            return Ok(existing);
        }

        let now = Utc::now();
        entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets the settings for a guild.
    ///
    /// # Returns
    /// - `Ok(Some(GuildSettings))` - Guild has been configured at least once
    /// - `Ok(None)` - No settings row exists
    /// - `Err(DbErr)` - Database error or unparsable stored id
    pub async fn get(&self, guild_id: u64) -> Result<Option<GuildSettings>, DbErr> {
        self.find_entity(guild_id)
            .await?
            .map(GuildSettings::from_entity)
            .transpose()
    }

    /// Gets the settings for a guild, inserting an empty row if none exists.
    pub async fn get_or_create(&self, guild_id: u64) -> Result<GuildSettings, DbErr> {
        GuildSettings::from_entity(self.get_or_create_entity(guild_id).await?)
    }

    /// Stores a single channel or role field.
    ///
    /// Writing the same value twice leaves the row unchanged apart from `updated_at`.
    ///
    /// # Arguments
    /// - `guild_id` - Guild to update
    /// - `field` - Field to write
    /// - `value` - New id, or `None` to clear the field
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - Settings after the update
    /// - `Err(DbErr)` - Database error
    pub async fn set_field(
        &self,
        guild_id: u64,
        field: SettingsField,
        value: Option<u64>,
    ) -> Result<GuildSettings, DbErr> {
        let existing = self.get_or_create_entity(guild_id).await?;

        let mut active: entity::guild_settings::ActiveModel = existing.into();
        active.set(field.column(), value.map(|id| id.to_string()).into());
        active.updated_at = ActiveValue::Set(Utc::now());

        GuildSettings::from_entity(active.update(self.db).await?)
    }

    /// Records where the public registration panel was posted.
    pub async fn set_registration_panel(
        &self,
        guild_id: u64,
        channel_id: u64,
        message_id: u64,
    ) -> Result<GuildSettings, DbErr> {
        let existing = self.get_or_create_entity(guild_id).await?;

        let mut active: entity::guild_settings::ActiveModel = existing.into();
        active.registration_channel_id = ActiveValue::Set(Some(channel_id.to_string()));
        active.registration_message_id = ActiveValue::Set(Some(message_id.to_string()));
        active.updated_at = ActiveValue::Set(Utc::now());

        GuildSettings::from_entity(active.update(self.db).await?)
    }
}
