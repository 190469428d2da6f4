//! Ticket settings and ticket records.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::parse::{parse_optional_snowflake, parse_snowflake};

pub const DEFAULT_MAX_OPEN_PER_USER: i32 = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct TicketSettings {
    /// Category new ticket channels are created under.
    pub category_id: Option<u64>,
    pub log_channel_id: Option<u64>,
    pub staff_role_id: Option<u64>,
    pub max_open_per_user: i32,
}

impl Default for TicketSettings {
    fn default() -> Self {
        Self {
            category_id: None,
            log_channel_id: None,
            staff_role_id: None,
            max_open_per_user: DEFAULT_MAX_OPEN_PER_USER,
        }
    }
}

impl TicketSettings {
    pub fn from_entity(entity: entity::ticket_settings::Model) -> Result<Self, DbErr> {
        Ok(Self {
            category_id: parse_optional_snowflake(entity.category_id.as_deref(), "category_id")?,
            log_channel_id: parse_optional_snowflake(
                entity.log_channel_id.as_deref(),
                "log_channel_id",
            )?,
            staff_role_id: parse_optional_snowflake(
                entity.staff_role_id.as_deref(),
                "staff_role_id",
            )?,
            max_open_per_user: entity.max_open_per_user,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DbErr> {
        match value {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(DbErr::Custom(format!("Unknown ticket status: {}", other))),
        }
    }
}

/// A support ticket backed by a private text channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub opener_id: u64,
    pub status: TicketStatus,
    pub claimed_by: Option<u64>,
    pub control_message_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Ticket {
    pub fn from_entity(entity: entity::ticket::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            channel_id: parse_snowflake(&entity.channel_id, "channel_id")?,
            opener_id: parse_snowflake(&entity.opener_id, "opener_id")?,
            status: TicketStatus::parse(&entity.status)?,
            claimed_by: parse_optional_snowflake(entity.claimed_by.as_deref(), "claimed_by")?,
            control_message_id: parse_optional_snowflake(
                entity.control_message_id.as_deref(),
                "control_message_id",
            )?,
            created_at: entity.created_at,
            closed_at: entity.closed_at,
        })
    }
}

/// Parameters for recording a newly opened ticket.
#[derive(Debug, Clone)]
pub struct CreateTicketParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub opener_id: u64,
}
