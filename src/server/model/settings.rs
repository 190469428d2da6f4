//! Guild settings and the individual fields the setup wizard writes.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::parse::{parse_optional_snowflake, parse_snowflake};

/// Per-guild configuration of channels and roles.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildSettings {
    pub guild_id: u64,
    /// Channel holding the public "Cadastrar" panel.
    pub registration_channel_id: Option<u64>,
    /// Message id of the posted panel, used to edit it in place on re-post.
    pub registration_message_id: Option<u64>,
    pub approval_channel_id: Option<u64>,
    pub records_channel_id: Option<u64>,
    pub welcome_channel_id: Option<u64>,
    pub exit_channel_id: Option<u64>,
    pub warnings_channel_id: Option<u64>,
    /// Granted on join, revoked on approval.
    pub provisional_role_id: Option<u64>,
    pub member_role_id: Option<u64>,
    pub adv1_role_id: Option<u64>,
    pub adv2_role_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GuildSettings {
    /// Converts an entity model to the domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(GuildSettings)` - Successfully converted settings
    /// - `Err(DbErr::Custom)` - A stored id failed to parse as u64
    pub fn from_entity(entity: entity::guild_settings::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            registration_channel_id: parse_optional_snowflake(
                entity.registration_channel_id.as_deref(),
                "registration_channel_id",
            )?,
            registration_message_id: parse_optional_snowflake(
                entity.registration_message_id.as_deref(),
                "registration_message_id",
            )?,
            approval_channel_id: parse_optional_snowflake(
                entity.approval_channel_id.as_deref(),
                "approval_channel_id",
            )?,
            records_channel_id: parse_optional_snowflake(
                entity.records_channel_id.as_deref(),
                "records_channel_id",
            )?,
            welcome_channel_id: parse_optional_snowflake(
                entity.welcome_channel_id.as_deref(),
                "welcome_channel_id",
            )?,
            exit_channel_id: parse_optional_snowflake(
                entity.exit_channel_id.as_deref(),
                "exit_channel_id",
            )?,
            warnings_channel_id: parse_optional_snowflake(
                entity.warnings_channel_id.as_deref(),
                "warnings_channel_id",
            )?,
            provisional_role_id: parse_optional_snowflake(
                entity.provisional_role_id.as_deref(),
                "provisional_role_id",
            )?,
            member_role_id: parse_optional_snowflake(
                entity.member_role_id.as_deref(),
                "member_role_id",
            )?,
            adv1_role_id: parse_optional_snowflake(entity.adv1_role_id.as_deref(), "adv1_role_id")?,
            adv2_role_id: parse_optional_snowflake(entity.adv2_role_id.as_deref(), "adv2_role_id")?,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Reads the value currently stored for `field`.
    pub fn get(&self, field: SettingsField) -> Option<u64> {
        match field {
            SettingsField::RegistrationChannel => self.registration_channel_id,
            SettingsField::ApprovalChannel => self.approval_channel_id,
            SettingsField::RecordsChannel => self.records_channel_id,
            SettingsField::WelcomeChannel => self.welcome_channel_id,
            SettingsField::ExitChannel => self.exit_channel_id,
            SettingsField::WarningsChannel => self.warnings_channel_id,
            SettingsField::ProvisionalRole => self.provisional_role_id,
            SettingsField::MemberRole => self.member_role_id,
            SettingsField::Adv1Role => self.adv1_role_id,
            SettingsField::Adv2Role => self.adv2_role_id,
        }
    }
}

/// Whether a settings field stores a channel or a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Channel,
    Role,
}

/// A single configurable channel or role in [`GuildSettings`].
///
/// Each wizard select persists exactly one field, identified in the select's custom id
/// by [`SettingsField::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    RegistrationChannel,
    ApprovalChannel,
    RecordsChannel,
    WelcomeChannel,
    ExitChannel,
    WarningsChannel,
    ProvisionalRole,
    MemberRole,
    Adv1Role,
    Adv2Role,
}

impl SettingsField {
    pub const ALL: [SettingsField; 10] = [
        SettingsField::RegistrationChannel,
        SettingsField::ApprovalChannel,
        SettingsField::RecordsChannel,
        SettingsField::WelcomeChannel,
        SettingsField::ExitChannel,
        SettingsField::WarningsChannel,
        SettingsField::ProvisionalRole,
        SettingsField::MemberRole,
        SettingsField::Adv1Role,
        SettingsField::Adv2Role,
    ];

    /// Stable identifier used inside component custom ids.
    pub fn key(&self) -> &'static str {
        match self {
            Self::RegistrationChannel => "registration",
            Self::ApprovalChannel => "approval",
            Self::RecordsChannel => "records",
            Self::WelcomeChannel => "welcome",
            Self::ExitChannel => "exit",
            Self::WarningsChannel => "warnings",
            Self::ProvisionalRole => "provisional",
            Self::MemberRole => "member",
            Self::Adv1Role => "adv1",
            Self::Adv2Role => "adv2",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Label shown in the wizard and health check.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RegistrationChannel => "Canal de cadastro",
            Self::ApprovalChannel => "Canal de aprovação",
            Self::RecordsChannel => "Canal de registros",
            Self::WelcomeChannel => "Canal de boas-vindas",
            Self::ExitChannel => "Canal de saídas",
            Self::WarningsChannel => "Canal de advertências",
            Self::ProvisionalRole => "Cargo SET (provisório)",
            Self::MemberRole => "Cargo de membro",
            Self::Adv1Role => "Cargo ADV 1",
            Self::Adv2Role => "Cargo ADV 2",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::ProvisionalRole | Self::MemberRole | Self::Adv1Role | Self::Adv2Role => {
                FieldKind::Role
            }
            _ => FieldKind::Channel,
        }
    }

    /// Fields whose absence breaks registration or discipline.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::RegistrationChannel
                | Self::WarningsChannel
                | Self::ProvisionalRole
                | Self::MemberRole
        )
    }

    pub fn column(&self) -> entity::guild_settings::Column {
        use entity::guild_settings::Column;

        match self {
            Self::RegistrationChannel => Column::RegistrationChannelId,
            Self::ApprovalChannel => Column::ApprovalChannelId,
            Self::RecordsChannel => Column::RecordsChannelId,
            Self::WelcomeChannel => Column::WelcomeChannelId,
            Self::ExitChannel => Column::ExitChannelId,
            Self::WarningsChannel => Column::WarningsChannelId,
            Self::ProvisionalRole => Column::ProvisionalRoleId,
            Self::MemberRole => Column::MemberRoleId,
            Self::Adv1Role => Column::Adv1RoleId,
            Self::Adv2Role => Column::Adv2RoleId,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_for_every_field() {
        for field in SettingsField::ALL {
            assert_eq!(SettingsField::from_key(field.key()), Some(field));
        }
        assert_eq!(SettingsField::from_key("unknown"), None);
    }

    #[test]
    fn critical_fields_are_the_registration_and_warning_essentials() {
        let critical: Vec<_> = SettingsField::ALL
            .into_iter()
            .filter(|f| f.is_critical())
            .collect();

        assert_eq!(
            critical,
            vec![
                SettingsField::RegistrationChannel,
                SettingsField::WarningsChannel,
                SettingsField::ProvisionalRole,
                SettingsField::MemberRole,
            ]
        );
    }
}
