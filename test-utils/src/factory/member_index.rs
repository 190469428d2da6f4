//! Member index factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a member index entry mapping `assigned_id` to `user_id`.
pub async fn create_member_index(
    db: &DatabaseConnection,
    guild_id: u64,
    assigned_id: &str,
    user_id: u64,
) -> Result<entity::member_index::Model, DbErr> {
    entity::member_index::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        assigned_id: ActiveValue::Set(assigned_id.to_string()),
        user_id: ActiveValue::Set(user_id.to_string()),
        updated_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
