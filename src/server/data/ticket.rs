//! Ticket settings and ticket repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::ticket::{
    CreateTicketParam, Ticket, TicketSettings, TicketStatus, DEFAULT_MAX_OPEN_PER_USER,
};

/// A single ticket settings change written by the setup wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketSettingsUpdate {
    Category(Option<u64>),
    LogChannel(Option<u64>),
    StaffRole(Option<u64>),
    MaxOpenPerUser(i32),
}

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_settings(
        &self,
        guild_id: u64,
    ) -> Result<Option<entity::ticket_settings::Model>, DbErr> {
        entity::prelude::TicketSettings::find()
            .filter(entity::ticket_settings::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await
    }

    /// Gets the ticket settings for a guild, defaulting to unconfigured.
    pub async fn get_settings(&self, guild_id: u64) -> Result<TicketSettings, DbErr> {
        match self.find_settings(guild_id).await? {
            Some(entity) => TicketSettings::from_entity(entity),
            None => Ok(TicketSettings::default()),
        }
    }

    /// Applies one settings change, creating the row if needed.
    pub async fn update_settings(
        &self,
        guild_id: u64,
        update: TicketSettingsUpdate,
    ) -> Result<TicketSettings, DbErr> {
        let existing = match self.find_settings(guild_id).await? {
            Some(existing) => existing,
            None => {
                entity::ticket_settings::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    category_id: ActiveValue::Set(None),
                    log_channel_id: ActiveValue::Set(None),
                    staff_role_id: ActiveValue::Set(None),
                    max_open_per_user: ActiveValue::Set(DEFAULT_MAX_OPEN_PER_USER),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        let text = |id: Option<u64>| id.map(|id| id.to_string());
        let mut active: entity::ticket_settings::ActiveModel = existing.into();
        match update {
            TicketSettingsUpdate::Category(id) => active.category_id = ActiveValue::Set(text(id)),
            TicketSettingsUpdate::LogChannel(id) => {
                active.log_channel_id = ActiveValue::Set(text(id))
            }
            TicketSettingsUpdate::StaffRole(id) => active.staff_role_id = ActiveValue::Set(text(id)),
            TicketSettingsUpdate::MaxOpenPerUser(max) => {
                active.max_open_per_user = ActiveValue::Set(max)
            }
        }

        TicketSettings::from_entity(active.update(self.db).await?)
    }

    pub async fn create(&self, param: CreateTicketParam) -> Result<Ticket, DbErr> {
        let entity = entity::ticket::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            opener_id: ActiveValue::Set(param.opener_id.to_string()),
            status: ActiveValue::Set(TicketStatus::Open.as_str().to_string()),
            claimed_by: ActiveValue::Set(None),
            control_message_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            closed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ticket::from_entity(entity)
    }

    async fn find_by_channel(
        &self,
        channel_id: u64,
    ) -> Result<Option<entity::ticket::Model>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await
    }

    async fn require_by_channel(&self, channel_id: u64) -> Result<entity::ticket::Model, DbErr> {
        self.find_by_channel(channel_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("ticket in channel {}", channel_id)))
    }

    pub async fn get_by_channel(&self, channel_id: u64) -> Result<Option<Ticket>, DbErr> {
        self.find_by_channel(channel_id)
            .await?
            .map(Ticket::from_entity)
            .transpose()
    }

    /// Counts the opener's tickets that are still open.
    pub async fn count_open_by_opener(&self, guild_id: u64, opener_id: u64) -> Result<u64, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::ticket::Column::OpenerId.eq(opener_id.to_string()))
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Open.as_str()))
            .count(self.db)
            .await
    }

    pub async fn set_claimed(&self, channel_id: u64, claimed_by: u64) -> Result<Ticket, DbErr> {
        let mut active: entity::ticket::ActiveModel =
            self.require_by_channel(channel_id).await?.into();
        active.claimed_by = ActiveValue::Set(Some(claimed_by.to_string()));

        Ticket::from_entity(active.update(self.db).await?)
    }

    /// Sets the ticket status, stamping or clearing `closed_at` to match.
    pub async fn set_status(&self, channel_id: u64, status: TicketStatus) -> Result<Ticket, DbErr> {
        let mut active: entity::ticket::ActiveModel =
            self.require_by_channel(channel_id).await?.into();
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.closed_at = ActiveValue::Set(match status {
            TicketStatus::Closed => Some(Utc::now()),
            TicketStatus::Open => None,
        });

        Ticket::from_entity(active.update(self.db).await?)
    }

    pub async fn set_control_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Ticket, DbErr> {
        let mut active: entity::ticket::ActiveModel =
            self.require_by_channel(channel_id).await?.into();
        active.control_message_id = ActiveValue::Set(Some(message_id.to_string()));

        Ticket::from_entity(active.update(self.db).await?)
    }

    /// Gets every ticket that has not been closed, across all guilds.
    pub async fn get_open(&self) -> Result<Vec<Ticket>, DbErr> {
        entity::prelude::Ticket::find()
            .filter(entity::ticket::Column::Status.eq(TicketStatus::Open.as_str()))
            .order_by_asc(entity::ticket::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Ticket::from_entity)
            .collect()
    }
}
