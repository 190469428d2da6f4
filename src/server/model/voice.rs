//! Voice tracking settings, sessions and accumulated time.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::parse::{parse_optional_snowflake, parse_snowflake};

/// Channel id used for time credited by an adjustment when no channel history exists.
pub const ADJUSTMENT_CHANNEL_ID: u64 = 0;

/// Which members and channels count toward voice time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoiceSettings {
    /// Every voice channel except AFK is monitored.
    pub monitor_all: bool,
    pub afk_channel_id: Option<u64>,
    /// Members need one of these roles to accumulate time.
    pub allowed_role_ids: Vec<u64>,
    pub monitored_channel_ids: Vec<u64>,
}

impl VoiceSettings {
    pub fn is_afk(&self, channel_id: u64) -> bool {
        self.afk_channel_id == Some(channel_id)
    }

    /// A channel is monitored when listed (or `monitor_all`) and is not the AFK channel.
    pub fn is_monitored(&self, channel_id: u64) -> bool {
        !self.is_afk(channel_id)
            && (self.monitor_all || self.monitored_channel_ids.contains(&channel_id))
    }

    pub fn member_allowed(&self, member_roles: &[u64]) -> bool {
        member_roles
            .iter()
            .any(|role| self.allowed_role_ids.contains(role))
    }
}

/// An open voice session.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSession {
    pub guild_id: u64,
    pub user_id: u64,
    pub channel_id: u64,
    pub joined_at: DateTime<Utc>,
}

impl VoiceSession {
    pub fn from_entity(entity: entity::voice_session::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            user_id: parse_snowflake(&entity.user_id, "user_id")?,
            channel_id: parse_snowflake(&entity.channel_id, "channel_id")?,
            joined_at: entity.joined_at,
        })
    }
}

/// Accumulated seconds for one member in one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceTime {
    pub channel_id: u64,
    pub total_seconds: i64,
}

impl VoiceTime {
    pub fn from_entity(entity: entity::voice_time::Model) -> Result<Self, DbErr> {
        Ok(Self {
            channel_id: parse_snowflake(&entity.channel_id, "channel_id")?,
            total_seconds: entity.total_seconds,
        })
    }
}

/// A member's total across all channels, used for rankings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceTotal {
    pub user_id: u64,
    pub total_seconds: i64,
}

impl VoiceSettings {
    pub fn from_entities(
        settings: Option<entity::voice_settings::Model>,
        roles: Vec<entity::voice_allowed_role::Model>,
        channels: Vec<entity::voice_monitored_channel::Model>,
    ) -> Result<Self, DbErr> {
        let (monitor_all, afk_channel_id) = match settings {
            Some(s) => (
                s.monitor_all,
                parse_optional_snowflake(s.afk_channel_id.as_deref(), "afk_channel_id")?,
            ),
            None => (false, None),
        };

        Ok(Self {
            monitor_all,
            afk_channel_id,
            allowed_role_ids: roles
                .iter()
                .map(|r| parse_snowflake(&r.role_id, "role_id"))
                .collect::<Result<_, _>>()?,
            monitored_channel_ids: channels
                .iter()
                .map(|c| parse_snowflake(&c.channel_id, "channel_id"))
                .collect::<Result<_, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> VoiceSettings {
        VoiceSettings {
            monitor_all: false,
            afk_channel_id: Some(9),
            allowed_role_ids: vec![100],
            monitored_channel_ids: vec![1, 2, 9],
        }
    }

    #[test]
    fn afk_is_never_monitored() {
        let mut settings = settings();
        assert!(!settings.is_monitored(9));

        settings.monitor_all = true;
        assert!(!settings.is_monitored(9));
        assert!(settings.is_monitored(42));
    }

    #[test]
    fn listed_channels_are_monitored() {
        let settings = settings();

        assert!(settings.is_monitored(1));
        assert!(!settings.is_monitored(3));
    }

    #[test]
    fn member_needs_an_allowed_role() {
        let settings = settings();

        assert!(settings.member_allowed(&[5, 100]));
        assert!(!settings.member_allowed(&[5]));
        assert!(!settings.member_allowed(&[]));
    }
}
