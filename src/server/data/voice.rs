//! Voice tracking repository: settings, open sessions and accumulated time.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::{
    model::voice::{VoiceSession, VoiceSettings, VoiceTime, VoiceTotal},
    util::parse::parse_snowflake,
};

pub struct VoiceRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VoiceRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the voice settings for a guild, defaulting to nothing monitored.
    pub async fn get_settings(&self, guild_id: u64) -> Result<VoiceSettings, DbErr> {
        let guild = guild_id.to_string();

        let settings = entity::prelude::VoiceSettings::find()
            .filter(entity::voice_settings::Column::GuildId.eq(&guild))
            .one(self.db)
            .await?;
        let roles = entity::prelude::VoiceAllowedRole::find()
            .filter(entity::voice_allowed_role::Column::GuildId.eq(&guild))
            .all(self.db)
            .await?;
        let channels = entity::prelude::VoiceMonitoredChannel::find()
            .filter(entity::voice_monitored_channel::Column::GuildId.eq(&guild))
            .all(self.db)
            .await?;

        VoiceSettings::from_entities(settings, roles, channels)
    }

    async fn settings_row(&self, guild_id: u64) -> Result<entity::voice_settings::Model, DbErr> {
        let existing = entity::prelude::VoiceSettings::find()
            .filter(entity::voice_settings::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;

        match existing {
            Some(existing) => Ok(existing),
            None => {
                entity::voice_settings::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    monitor_all: ActiveValue::Set(false),
                    afk_channel_id: ActiveValue::Set(None),
                    ..Default::default()
                }
                .insert(self.db)
                .await
            }
        }
    }

    pub async fn set_afk_channel(&self, guild_id: u64, channel_id: Option<u64>) -> Result<(), DbErr> {
        let mut active: entity::voice_settings::ActiveModel =
            self.settings_row(guild_id).await?.into();
        active.afk_channel_id = ActiveValue::Set(channel_id.map(|id| id.to_string()));
        active.update(self.db).await?;

        Ok(())
    }

    pub async fn set_monitor_all(&self, guild_id: u64, monitor_all: bool) -> Result<(), DbErr> {
        let mut active: entity::voice_settings::ActiveModel =
            self.settings_row(guild_id).await?.into();
        active.monitor_all = ActiveValue::Set(monitor_all);
        active.update(self.db).await?;

        Ok(())
    }

    /// Replaces the set of roles that accumulate voice time.
    pub async fn set_allowed_roles(&self, guild_id: u64, role_ids: &[u64]) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::VoiceAllowedRole::delete_many()
            .filter(entity::voice_allowed_role::Column::GuildId.eq(guild_id.to_string()))
            .exec(&txn)
            .await?;

        for role_id in role_ids {
            entity::voice_allowed_role::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                role_id: ActiveValue::Set(role_id.to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await
    }

    /// Replaces the set of explicitly monitored channels.
    pub async fn set_monitored_channels(
        &self,
        guild_id: u64,
        channel_ids: &[u64],
    ) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::VoiceMonitoredChannel::delete_many()
            .filter(entity::voice_monitored_channel::Column::GuildId.eq(guild_id.to_string()))
            .exec(&txn)
            .await?;

        for channel_id in channel_ids {
            entity::voice_monitored_channel::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                channel_id: ActiveValue::Set(channel_id.to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await
    }

    /// Opens a session, replacing any stale one for the same member.
    pub async fn start_session(
        &self,
        guild_id: u64,
        user_id: u64,
        channel_id: u64,
        joined_at: DateTime<Utc>,
    ) -> Result<VoiceSession, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::VoiceSession::delete_many()
            .filter(entity::voice_session::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::voice_session::Column::UserId.eq(user_id.to_string()))
            .exec(&txn)
            .await?;

        let entity = entity::voice_session::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            channel_id: ActiveValue::Set(channel_id.to_string()),
            joined_at: ActiveValue::Set(joined_at),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        VoiceSession::from_entity(entity)
    }

    /// Removes and returns the member's open session, if any.
    pub async fn take_session(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<VoiceSession>, DbErr> {
        let Some(existing) = entity::prelude::VoiceSession::find()
            .filter(entity::voice_session::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::voice_session::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let result = entity::prelude::VoiceSession::delete_by_id(existing.id)
            .exec(self.db)
            .await?;

        // Another event already ended this session
        if result.rows_affected == 0 {
            return Ok(None);
        }

        VoiceSession::from_entity(existing).map(Some)
    }

    pub async fn get_session(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<VoiceSession>, DbErr> {
        entity::prelude::VoiceSession::find()
            .filter(entity::voice_session::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::voice_session::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?
            .map(VoiceSession::from_entity)
            .transpose()
    }

    /// Adds seconds to the member's accumulator for a channel.
    pub async fn add_time(
        &self,
        guild_id: u64,
        user_id: u64,
        channel_id: u64,
        seconds: i64,
    ) -> Result<(), DbErr> {
        let existing = entity::prelude::VoiceTime::find()
            .filter(entity::voice_time::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::voice_time::Column::UserId.eq(user_id.to_string()))
            .filter(entity::voice_time::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await?;

        match existing {
            Some(existing) => {
                let total = existing.total_seconds.saturating_add(seconds);
                let mut active: entity::voice_time::ActiveModel = existing.into();
                active.total_seconds = ActiveValue::Set(total);
                active.update(self.db).await?;
            }
            None => {
                entity::voice_time::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    user_id: ActiveValue::Set(user_id.to_string()),
                    channel_id: ActiveValue::Set(channel_id.to_string()),
                    total_seconds: ActiveValue::Set(seconds),
                    ..Default::default()
                }
                .insert(self.db)
                .await?;
            }
        }

        Ok(())
    }

    /// Gets the member's per-channel totals, largest first.
    pub async fn get_times(&self, guild_id: u64, user_id: u64) -> Result<Vec<VoiceTime>, DbErr> {
        entity::prelude::VoiceTime::find()
            .filter(entity::voice_time::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::voice_time::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(entity::voice_time::Column::TotalSeconds)
            .all(self.db)
            .await?
            .into_iter()
            .map(VoiceTime::from_entity)
            .collect()
    }

    /// Replaces every accumulator for the member. Zero rows are not stored.
    pub async fn replace_times(
        &self,
        guild_id: u64,
        user_id: u64,
        times: &[VoiceTime],
    ) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::VoiceTime::delete_many()
            .filter(entity::voice_time::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::voice_time::Column::UserId.eq(user_id.to_string()))
            .exec(&txn)
            .await?;

        for time in times.iter().filter(|t| t.total_seconds > 0) {
            entity::voice_time::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                user_id: ActiveValue::Set(user_id.to_string()),
                channel_id: ActiveValue::Set(time.channel_id.to_string()),
                total_seconds: ActiveValue::Set(time.total_seconds),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await
    }

    /// Gets members ranked by total voice time.
    ///
    /// Ties are broken by user id so the order is stable.
    pub async fn ranking(&self, guild_id: u64, limit: usize) -> Result<Vec<VoiceTotal>, DbErr> {
        let rows = entity::prelude::VoiceTime::find()
            .filter(entity::voice_time::Column::GuildId.eq(guild_id.to_string()))
            .all(self.db)
            .await?;

        let mut totals: HashMap<u64, i64> = HashMap::new();
        for row in rows {
            let user_id = parse_snowflake(&row.user_id, "user_id")?;
            *totals.entry(user_id).or_default() += row.total_seconds;
        }

        let mut ranking: Vec<VoiceTotal> = totals
            .into_iter()
            .map(|(user_id, total_seconds)| VoiceTotal {
                user_id,
                total_seconds,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.total_seconds
                .cmp(&a.total_seconds)
                .then(a.user_id.cmp(&b.user_id))
        });
        ranking.truncate(limit);

        Ok(ranking)
    }
}
