//! Voice tracking factories.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a voice time accumulator for one member in one channel.
pub async fn create_voice_time(
    db: &DatabaseConnection,
    guild_id: u64,
    user_id: u64,
    channel_id: u64,
    total_seconds: i64,
) -> Result<entity::voice_time::Model, DbErr> {
    entity::voice_time::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        channel_id: ActiveValue::Set(channel_id.to_string()),
        total_seconds: ActiveValue::Set(total_seconds),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Creates an open voice session that started at `joined_at`.
pub async fn create_voice_session(
    db: &DatabaseConnection,
    guild_id: u64,
    user_id: u64,
    channel_id: u64,
    joined_at: DateTime<Utc>,
) -> Result<entity::voice_session::Model, DbErr> {
    entity::voice_session::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        channel_id: ActiveValue::Set(channel_id.to_string()),
        joined_at: ActiveValue::Set(joined_at),
        ..Default::default()
    }
    .insert(db)
    .await
}
