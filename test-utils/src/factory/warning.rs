//! Warning counter factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a warning counter row with the given count.
///
/// Useful for starting a discipline test part-way up the escalation ladder.
pub async fn create_member_warning(
    db: &DatabaseConnection,
    guild_id: u64,
    user_id: u64,
    count: i32,
) -> Result<entity::member_warning::Model, DbErr> {
    entity::member_warning::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        count: ActiveValue::Set(count),
        last_reason: ActiveValue::Set(Some("seeded".to_string())),
        updated_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
