//! Ticket factory for creating test tickets.

use crate::factory::helpers::next_snowflake;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating tickets with customizable fields.
///
/// Defaults to an open, unclaimed ticket in a fresh channel.
pub struct TicketFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    channel_id: u64,
    opener_id: u64,
    status: String,
    control_message_id: Option<u64>,
}

impl<'a> TicketFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: u64, opener_id: u64) -> Self {
        Self {
            db,
            guild_id,
            channel_id: next_snowflake(),
            opener_id,
            status: "open".to_string(),
            control_message_id: None,
        }
    }

    pub fn channel_id(mut self, channel_id: u64) -> Self {
        self.channel_id = channel_id;
        self
    }

    pub fn closed(mut self) -> Self {
        self.status = "closed".to_string();
        self
    }

    pub fn control_message_id(mut self, message_id: u64) -> Self {
        self.control_message_id = Some(message_id);
        self
    }

    pub async fn build(self) -> Result<entity::ticket::Model, DbErr> {
        let now = Utc::now();
        let closed_at = (self.status == "closed").then_some(now);

        entity::ticket::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            channel_id: ActiveValue::Set(self.channel_id.to_string()),
            opener_id: ActiveValue::Set(self.opener_id.to_string()),
            status: ActiveValue::Set(self.status),
            claimed_by: ActiveValue::Set(None),
            control_message_id: ActiveValue::Set(self.control_message_id.map(|id| id.to_string())),
            created_at: ActiveValue::Set(now),
            closed_at: ActiveValue::Set(closed_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an open ticket for `opener_id`.
pub async fn create_ticket(
    db: &DatabaseConnection,
    guild_id: u64,
    opener_id: u64,
) -> Result<entity::ticket::Model, DbErr> {
    TicketFactory::new(db, guild_id, opener_id).build().await
}
