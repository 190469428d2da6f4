//! Guild settings service and the capability checks run before a wizard selection is
//! stored.
//!
//! The checks are pure functions over the bot's resolved permissions so they can be
//! exercised without a gateway. The bot layer resolves `Permissions` from the cache and
//! calls them before [`SettingsService::set_field`].

use sea_orm::DatabaseConnection;
use serenity::all::{Permissions, Role};

use crate::server::{
    data::settings::SettingsRepository,
    error::AppError,
    model::settings::{GuildSettings, SettingsField},
};

/// Channel capabilities the bot needs to post embeds.
const CHANNEL_CAPABILITIES: [(Permissions, &str); 3] = [
    (Permissions::VIEW_CHANNEL, "Ver canal"),
    (Permissions::SEND_MESSAGES, "Enviar mensagens"),
    (Permissions::EMBED_LINKS, "Inserir links"),
];

/// Verifies the bot can post embeds in a text channel.
///
/// # Arguments
/// - `channel_name` - Display name used in the error
/// - `bot_permissions` - Bot's effective permissions in the channel
///
/// # Returns
/// - `Ok(())` - Every capability is present
/// - `Err(AppError::MissingCapability)` - One entry per missing capability
pub fn check_channel_capabilities(
    channel_name: &str,
    bot_permissions: Permissions,
) -> Result<(), AppError> {
    if bot_permissions.administrator() {
        return Ok(());
    }

    let missing: Vec<String> = CHANNEL_CAPABILITIES
        .iter()
        .filter(|(permission, _)| !bot_permissions.contains(*permission))
        .map(|(_, label)| label.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingCapability {
            target: format!("#{}", channel_name),
            missing,
        })
    }
}

/// Verifies the bot can assign and remove a role.
///
/// # Arguments
/// - `role` - Role selected in the wizard
/// - `bot_top_position` - Position of the bot's highest role
/// - `bot_permissions` - Bot's guild-level permissions
///
/// # Returns
/// - `Ok(())` - Role is assignable
/// - `Err(AppError::MissingCapability)` - One entry per failed check
pub fn check_role_capabilities(
    role: &Role,
    bot_top_position: u16,
    bot_permissions: Permissions,
) -> Result<(), AppError> {
    let mut missing = Vec::new();

    if !bot_permissions.administrator() && !bot_permissions.manage_roles() {
        missing.push("Gerenciar cargos".to_string());
    }
    if role.position >= bot_top_position {
        missing.push("O cargo precisa estar abaixo do cargo do bot".to_string());
    }
    if role.managed {
        missing.push("Cargos gerenciados por integrações não podem ser atribuídos".to_string());
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::MissingCapability {
            target: format!("@{}", role.name),
            missing,
        })
    }
}

/// Result of the wizard's health check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsHealth {
    /// Configured fields whose channel or role no longer exists.
    pub stale: Vec<SettingsField>,
    /// Critical fields that are unset or stale.
    pub missing_critical: Vec<SettingsField>,
}

impl SettingsHealth {
    pub fn is_healthy(&self) -> bool {
        self.stale.is_empty() && self.missing_critical.is_empty()
    }
}

/// Checks stored settings against what currently exists in the guild.
///
/// # Arguments
/// - `settings` - Stored settings, `None` when the guild was never configured
/// - `exists` - Returns whether the channel or role id for a field still exists
pub fn check_health(
    settings: Option<&GuildSettings>,
    exists: impl Fn(SettingsField, u64) -> bool,
) -> SettingsHealth {
    let mut health = SettingsHealth::default();

    for field in SettingsField::ALL {
        let value = settings.and_then(|s| s.get(field));
        let usable = match value {
            Some(id) => {
                let alive = exists(field, id);
                if !alive {
                    health.stale.push(field);
                }
                alive
            }
            None => false,
        };

        if field.is_critical() && !usable {
            health.missing_critical.push(field);
        }
    }

    health
}

pub struct SettingsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get(&self, guild_id: u64) -> Result<Option<GuildSettings>, AppError> {
        Ok(SettingsRepository::new(self.db).get(guild_id).await?)
    }

    /// Gets settings, creating the row on the first setup interaction.
    pub async fn get_or_create(&self, guild_id: u64) -> Result<GuildSettings, AppError> {
        Ok(SettingsRepository::new(self.db)
            .get_or_create(guild_id)
            .await?)
    }

    /// Gets settings or fails with a message pointing at `!setup`.
    pub async fn require(&self, guild_id: u64) -> Result<GuildSettings, AppError> {
        self.get(guild_id).await?.ok_or_else(|| {
            AppError::NotFound("Servidor não configurado. Rode !setup primeiro.".to_string())
        })
    }

    /// Persists one wizard selection.
    ///
    /// Capability checks must already have passed; this only writes.
    pub async fn set_field(
        &self,
        guild_id: u64,
        field: SettingsField,
        value: Option<u64>,
    ) -> Result<GuildSettings, AppError> {
        Ok(SettingsRepository::new(self.db)
            .set_field(guild_id, field, value)
            .await?)
    }

    pub async fn set_registration_panel(
        &self,
        guild_id: u64,
        channel_id: u64,
        message_id: u64,
    ) -> Result<GuildSettings, AppError> {
        Ok(SettingsRepository::new(self.db)
            .set_registration_panel(guild_id, channel_id, message_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        builder::TestBuilder,
        factory::guild_settings::GuildSettingsFactory,
        serenity::{create_managed_role, create_test_role},
    };

    /// Tests that a channel the bot can fully use passes.
    ///
    /// Expected: Ok
    #[test]
    fn channel_with_all_capabilities_passes() {
        let permissions =
            Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES | Permissions::EMBED_LINKS;

        assert!(check_channel_capabilities("cadastro", permissions).is_ok());
        assert!(check_channel_capabilities("cadastro", Permissions::ADMINISTRATOR).is_ok());
    }

    /// Tests that each missing channel capability is itemized.
    ///
    /// Expected: Err(MissingCapability) listing send and embed
    #[test]
    fn channel_missing_capabilities_are_itemized() {
        let result = check_channel_capabilities("avisos", Permissions::VIEW_CHANNEL);

        match result {
            Err(AppError::MissingCapability { target, missing }) => {
                assert_eq!(target, "#avisos");
                assert_eq!(missing, vec!["Enviar mensagens", "Inserir links"]);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Tests an assignable role below the bot.
    ///
    /// Expected: Ok
    #[test]
    fn assignable_role_passes() {
        let role = create_test_role(10, "Membro", 3);

        assert!(check_role_capabilities(&role, 5, Permissions::MANAGE_ROLES).is_ok());
    }

    /// Tests a managed role above the bot without Manage Roles.
    ///
    /// Verifies that every failed check is reported, not just the first.
    ///
    /// Expected: Err(MissingCapability) with three entries
    #[test]
    fn role_failures_are_itemized() {
        let role = create_managed_role(10, "Booster", 8);

        match check_role_capabilities(&role, 5, Permissions::empty()) {
            Err(AppError::MissingCapability { target, missing }) => {
                assert_eq!(target, "@Booster");
                assert_eq!(missing.len(), 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    /// Tests that a role at the bot's own position is rejected.
    ///
    /// Expected: Err(MissingCapability)
    #[test]
    fn role_at_bot_position_is_rejected() {
        let role = create_test_role(10, "Staff", 5);

        assert!(check_role_capabilities(&role, 5, Permissions::ADMINISTRATOR).is_err());
    }

    /// Tests the health check on an unconfigured guild.
    ///
    /// Expected: every critical field flagged and nothing stale
    #[test]
    fn unconfigured_guild_misses_every_critical_field() {
        let health = check_health(None, |_, _| true);

        assert!(health.stale.is_empty());
        assert_eq!(health.missing_critical.len(), 4);
        assert!(!health.is_healthy());
    }

    /// Tests the health check with a deleted channel.
    ///
    /// Verifies that a stale critical field is reported both as stale and as missing.
    ///
    /// Expected: warnings channel in both lists
    #[tokio::test]
    async fn deleted_channel_is_stale() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildSettings)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        GuildSettingsFactory::new(db)
            .guild_id(1)
            .fully_configured()
            .build()
            .await?;
        let settings = SettingsService::new(db).require(1).await?;
        let deleted = settings.warnings_channel_id.unwrap();

        let health = check_health(Some(&settings), |_, id| id != deleted);

        assert_eq!(health.stale, vec![SettingsField::WarningsChannel]);
        assert_eq!(health.missing_critical, vec![SettingsField::WarningsChannel]);

        Ok(())
    }

    /// Tests that storing the same selection twice is idempotent.
    ///
    /// Expected: identical field values after both writes
    #[tokio::test]
    async fn repeated_selection_is_idempotent() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildSettings)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let service = SettingsService::new(db);
        let first = service
            .set_field(1, SettingsField::MemberRole, Some(42))
            .await?;
        let second = service
            .set_field(1, SettingsField::MemberRole, Some(42))
            .await?;

        for field in SettingsField::ALL {
            assert_eq!(first.get(field), second.get(field));
        }

        Ok(())
    }

    /// Tests requiring settings for a guild that never ran setup.
    ///
    /// Expected: Err(NotFound)
    #[tokio::test]
    async fn require_fails_without_settings() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(entity::prelude::GuildSettings)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let result = SettingsService::new(db).require(1).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }
}
