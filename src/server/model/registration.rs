//! Registration records and their lifecycle status.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::parse::{parse_optional_snowflake, parse_snowflake};

/// Discord's nickname length limit.
pub const MAX_NICKNAME_LENGTH: usize = 32;

const NICKNAME_SEPARATOR: &str = " | ";

/// Longest assigned id that still leaves one name character in the nickname.
pub const MAX_ASSIGNED_ID_LENGTH: usize = MAX_NICKNAME_LENGTH - NICKNAME_SEPARATOR.len() - 1;

/// Lifecycle of a registration: `Pending` moves once to a terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DbErr> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(DbErr::Custom(format!(
                "Unknown registration status: {}",
                other
            ))),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A member's registration request.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub id: i32,
    pub guild_id: u64,
    pub user_id: u64,
    pub display_name: String,
    /// Human-readable id chosen by the member, distinct from the Discord id.
    pub assigned_id: String,
    pub recruiter_id: String,
    pub status: RegistrationStatus,
    pub approval_channel_id: Option<u64>,
    pub approval_message_id: Option<u64>,
    pub moderator_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub decided_at: Option<DateTime<Utc>>,
}

impl Registration {
    /// Converts an entity model to the domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(Registration)` - Successfully converted registration
    /// - `Err(DbErr::Custom)` - An id failed to parse or the status is unknown
    pub fn from_entity(entity: entity::registration::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            user_id: parse_snowflake(&entity.user_id, "user_id")?,
            display_name: entity.display_name,
            assigned_id: entity.assigned_id,
            recruiter_id: entity.recruiter_id,
            status: RegistrationStatus::parse(&entity.status)?,
            approval_channel_id: parse_optional_snowflake(
                entity.approval_channel_id.as_deref(),
                "approval_channel_id",
            )?,
            approval_message_id: parse_optional_snowflake(
                entity.approval_message_id.as_deref(),
                "approval_message_id",
            )?,
            moderator_id: parse_optional_snowflake(entity.moderator_id.as_deref(), "moderator_id")?,
            created_at: entity.created_at,
            decided_at: entity.decided_at,
        })
    }

    /// Nickname applied on approval, `Name | AssignedId`.
    ///
    /// The name is shortened so the whole nickname fits Discord's 32 character limit
    /// while the assigned id stays intact.
    pub fn nickname(&self) -> String {
        let suffix = format!("{}{}", NICKNAME_SEPARATOR, self.assigned_id);
        let room = MAX_NICKNAME_LENGTH.saturating_sub(suffix.chars().count());
        let name: String = self.display_name.trim().chars().take(room).collect();

        format!("{}{}", name.trim_end(), suffix)
            .chars()
            .take(MAX_NICKNAME_LENGTH)
            .collect()
    }
}

/// Parameters for creating a pending registration.
#[derive(Debug, Clone)]
pub struct CreateRegistrationParam {
    pub guild_id: u64,
    pub user_id: u64,
    pub display_name: String,
    pub assigned_id: String,
    pub recruiter_id: String,
}

/// Parameters for moving a pending registration to a terminal status.
#[derive(Debug, Clone)]
pub struct DecideRegistrationParam {
    pub id: i32,
    pub status: RegistrationStatus,
    pub moderator_id: u64,
}
