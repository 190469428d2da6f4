//! Command permission factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a configured command with the given allowed roles.
///
/// An empty `role_ids` slice produces an admin-only configuration.
pub async fn create_command_permission(
    db: &DatabaseConnection,
    guild_id: u64,
    command_name: &str,
    role_ids: &[u64],
) -> Result<entity::command_permission::Model, DbErr> {
    let permission = entity::command_permission::ActiveModel {
        guild_id: ActiveValue::Set(guild_id.to_string()),
        command_name: ActiveValue::Set(command_name.to_string()),
        updated_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    for role_id in role_ids {
        entity::command_permission_role::ActiveModel {
            command_permission_id: ActiveValue::Set(permission.id),
            role_id: ActiveValue::Set(role_id.to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(permission)
}
