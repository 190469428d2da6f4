//! Warning counters, escalation actions and the warning history.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::parse::parse_snowflake;

/// Warnings at which the member is banned.
pub const BAN_THRESHOLD: i32 = 3;

/// Action taken for a given warning count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningAction {
    AssignAdv1,
    AssignAdv2,
    Ban,
}

impl WarningAction {
    /// Maps a post-increment warning count to its action.
    ///
    /// Counts below 1 never reach here since the counter is incremented first; they are
    /// treated as a first warning.
    pub fn for_count(count: i32) -> Self {
        match count {
            c if c >= BAN_THRESHOLD => Self::Ban,
            2 => Self::AssignAdv2,
            _ => Self::AssignAdv1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AssignAdv1 => "adv1",
            Self::AssignAdv2 => "adv2",
            Self::Ban => "ban",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AssignAdv1 => "ADV 1",
            Self::AssignAdv2 => "ADV 2",
            Self::Ban => "Banimento",
        }
    }
}

/// Result of recording a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarningOutcome {
    pub count: i32,
    pub action: WarningAction,
}

/// Row appended to the warning history for every warning issued.
#[derive(Debug, Clone, PartialEq)]
pub struct WarningLogEntry {
    pub id: i32,
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub reason: String,
    pub count: i32,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

impl WarningLogEntry {
    pub fn from_entity(entity: entity::warning_log::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            user_id: parse_snowflake(&entity.user_id, "user_id")?,
            moderator_id: parse_snowflake(&entity.moderator_id, "moderator_id")?,
            reason: entity.reason,
            count: entity.count,
            action: entity.action,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for appending to the warning history.
#[derive(Debug, Clone)]
pub struct CreateWarningLogParam {
    pub guild_id: u64,
    pub user_id: u64,
    pub moderator_id: u64,
    pub reason: String,
    pub outcome: WarningOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalates_by_count() {
        assert_eq!(WarningAction::for_count(1), WarningAction::AssignAdv1);
        assert_eq!(WarningAction::for_count(2), WarningAction::AssignAdv2);
        assert_eq!(WarningAction::for_count(3), WarningAction::Ban);
        assert_eq!(WarningAction::for_count(7), WarningAction::Ban);
    }
}
