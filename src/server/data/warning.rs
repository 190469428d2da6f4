//! Warning counter and warning history repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use crate::server::model::warning::{CreateWarningLogParam, WarningLogEntry};

pub struct WarningRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WarningRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Increments the member's warning count and records the reason.
    ///
    /// # Returns
    /// - `Ok(i32)` - Count after the increment
    /// - `Err(DbErr)` - Database error
    pub async fn increment(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<i32, DbErr> {
        let txn = self.db.begin().await?;

        let existing = entity::prelude::MemberWarning::find()
            .filter(entity::member_warning::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::member_warning::Column::UserId.eq(user_id.to_string()))
            .one(&txn)
            .await?;

        let updated = match existing {
            Some(existing) => {
                let count = existing.count + 1;
                let mut active: entity::member_warning::ActiveModel = existing.into();
                active.count = ActiveValue::Set(count);
                active.last_reason = ActiveValue::Set(Some(reason.to_string()));
                active.updated_at = ActiveValue::Set(Utc::now());
                active.update(&txn).await?
            }
            None => {
                entity::member_warning::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    user_id: ActiveValue::Set(user_id.to_string()),
                    count: ActiveValue::Set(1),
                    last_reason: ActiveValue::Set(Some(reason.to_string())),
                    updated_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;

        Ok(updated.count)
    }

    /// Gets the member's current warning count, 0 if never warned.
    pub async fn get_count(&self, guild_id: u64, user_id: u64) -> Result<i32, DbErr> {
        let existing = entity::prelude::MemberWarning::find()
            .filter(entity::member_warning::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::member_warning::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?;

        Ok(existing.map(|w| w.count).unwrap_or(0))
    }

    /// Resets the member's counter to zero.
    pub async fn reset(&self, guild_id: u64, user_id: u64) -> Result<(), DbErr> {
        let Some(existing) = entity::prelude::MemberWarning::find()
            .filter(entity::member_warning::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::member_warning::Column::UserId.eq(user_id.to_string()))
            .one(self.db)
            .await?
        else {
            return Ok(());
        };

        let mut active: entity::member_warning::ActiveModel = existing.into();
        active.count = ActiveValue::Set(0);
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(())
    }

    /// Appends a warning to the history.
    pub async fn append_log(&self, param: CreateWarningLogParam) -> Result<WarningLogEntry, DbErr> {
        let entity = entity::warning_log::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            moderator_id: ActiveValue::Set(param.moderator_id.to_string()),
            reason: ActiveValue::Set(param.reason),
            count: ActiveValue::Set(param.outcome.count),
            action: ActiveValue::Set(param.outcome.action.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        WarningLogEntry::from_entity(entity)
    }

    /// Gets the member's warning history, newest first.
    pub async fn get_logs(&self, guild_id: u64, user_id: u64) -> Result<Vec<WarningLogEntry>, DbErr> {
        entity::prelude::WarningLog::find()
            .filter(entity::warning_log::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::warning_log::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(entity::warning_log::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(WarningLogEntry::from_entity)
            .collect()
    }
}
