//! Guild settings factory for creating test settings rows.

use crate::factory::helpers::next_snowflake;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating guild settings with customizable fields.
///
/// Defaults to a fresh guild id with every channel and role unset; use the setters to
/// configure only what a test needs.
///
/// # Example
///
/// ```rust,ignore
/// let settings = GuildSettingsFactory::new(&db)
///     .guild_id(123)
///     .approval_channel_id(456)
///     .build()
///     .await?;
/// ```
pub struct GuildSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    registration_channel_id: Option<u64>,
    approval_channel_id: Option<u64>,
    records_channel_id: Option<u64>,
    welcome_channel_id: Option<u64>,
    exit_channel_id: Option<u64>,
    warnings_channel_id: Option<u64>,
    provisional_role_id: Option<u64>,
    member_role_id: Option<u64>,
    adv1_role_id: Option<u64>,
    adv2_role_id: Option<u64>,
}

impl<'a> GuildSettingsFactory<'a> {
    /// Creates a new factory for an unconfigured guild.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_snowflake(),
            registration_channel_id: None,
            approval_channel_id: None,
            records_channel_id: None,
            welcome_channel_id: None,
            exit_channel_id: None,
            warnings_channel_id: None,
            provisional_role_id: None,
            member_role_id: None,
            adv1_role_id: None,
            adv2_role_id: None,
        }
    }

    pub fn guild_id(mut self, guild_id: u64) -> Self {
        self.guild_id = guild_id;
        self
    }

    pub fn registration_channel_id(mut self, id: u64) -> Self {
        self.registration_channel_id = Some(id);
        self
    }

    pub fn approval_channel_id(mut self, id: u64) -> Self {
        self.approval_channel_id = Some(id);
        self
    }

    pub fn records_channel_id(mut self, id: u64) -> Self {
        self.records_channel_id = Some(id);
        self
    }

    pub fn welcome_channel_id(mut self, id: u64) -> Self {
        self.welcome_channel_id = Some(id);
        self
    }

    pub fn exit_channel_id(mut self, id: u64) -> Self {
        self.exit_channel_id = Some(id);
        self
    }

    pub fn warnings_channel_id(mut self, id: u64) -> Self {
        self.warnings_channel_id = Some(id);
        self
    }

    pub fn provisional_role_id(mut self, id: u64) -> Self {
        self.provisional_role_id = Some(id);
        self
    }

    pub fn member_role_id(mut self, id: u64) -> Self {
        self.member_role_id = Some(id);
        self
    }

    /// Sets both warning roles at once.
    pub fn adv_roles(mut self, adv1: u64, adv2: u64) -> Self {
        self.adv1_role_id = Some(adv1);
        self.adv2_role_id = Some(adv2);
        self
    }

    /// Configures every channel and role with fresh ids.
    pub fn fully_configured(self) -> Self {
        self.registration_channel_id(next_snowflake())
            .approval_channel_id(next_snowflake())
            .records_channel_id(next_snowflake())
            .welcome_channel_id(next_snowflake())
            .exit_channel_id(next_snowflake())
            .warnings_channel_id(next_snowflake())
            .provisional_role_id(next_snowflake())
            .member_role_id(next_snowflake())
            .adv_roles(next_snowflake(), next_snowflake())
    }

    /// Builds and inserts the settings row.
    ///
    /// # Returns
    /// - `Ok(entity::guild_settings::Model)` - Created settings row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild_settings::Model, DbErr> {
        let now = Utc::now();
        let text = |id: Option<u64>| id.map(|id| id.to_string());

        entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            registration_channel_id: ActiveValue::Set(text(self.registration_channel_id)),
            registration_message_id: ActiveValue::Set(None),
            approval_channel_id: ActiveValue::Set(text(self.approval_channel_id)),
            records_channel_id: ActiveValue::Set(text(self.records_channel_id)),
            welcome_channel_id: ActiveValue::Set(text(self.welcome_channel_id)),
            exit_channel_id: ActiveValue::Set(text(self.exit_channel_id)),
            warnings_channel_id: ActiveValue::Set(text(self.warnings_channel_id)),
            provisional_role_id: ActiveValue::Set(text(self.provisional_role_id)),
            member_role_id: ActiveValue::Set(text(self.member_role_id)),
            adv1_role_id: ActiveValue::Set(text(self.adv1_role_id)),
            adv2_role_id: ActiveValue::Set(text(self.adv2_role_id)),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates settings for a fresh guild with every channel and role configured.
pub async fn create_configured_settings(
    db: &DatabaseConnection,
) -> Result<entity::guild_settings::Model, DbErr> {
    GuildSettingsFactory::new(db).fully_configured().build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_unconfigured_settings_by_default() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(GuildSettings)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let settings = GuildSettingsFactory::new(db).build().await?;

        assert!(settings.guild_id.parse::<u64>().is_ok());
        assert!(settings.approval_channel_id.is_none());
        assert!(settings.member_role_id.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn configures_every_field() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(GuildSettings)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let settings = create_configured_settings(db).await?;

        assert!(settings.warnings_channel_id.is_some());
        assert!(settings.adv1_role_id.is_some());
        assert!(settings.adv2_role_id.is_some());
        assert_ne!(settings.adv1_role_id, settings.adv2_role_id);

        Ok(())
    }
}
