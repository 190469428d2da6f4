//! Member lookup index entries.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::parse::parse_snowflake;

/// Assigned-id to Discord-id mapping kept for fast member lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberIndexEntry {
    pub guild_id: u64,
    pub assigned_id: String,
    pub user_id: u64,
    pub updated_at: DateTime<Utc>,
}

impl MemberIndexEntry {
    pub fn from_entity(entity: entity::member_index::Model) -> Result<Self, DbErr> {
        Ok(Self {
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            assigned_id: entity.assigned_id,
            user_id: parse_snowflake(&entity.user_id, "user_id")?,
            updated_at: entity.updated_at,
        })
    }
}
