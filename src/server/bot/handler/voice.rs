use chrono::Utc;
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{Context, VoiceState};

use crate::server::service::voice::VoiceService;

/// Tracks voice time as members join, leave and move between channels.
pub async fn handle_voice_state_update(
    db: &DatabaseConnection,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(guild_id) = new.guild_id else {
        return;
    };
    let user_id = new.user_id;

    let member = match new.member {
        Some(member) => member,
        None => match guild_id.member(&ctx, user_id).await {
            Ok(member) => member,
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch member {} for voice update in guild {}: {}",
                    user_id,
                    guild_id,
                    e
                );
                return;
            }
        },
    };

    if member.user.bot {
        return;
    }

    let roles: Vec<u64> = member.roles.iter().map(|r| r.get()).collect();
    let before = old.and_then(|state| state.channel_id).map(|c| c.get());
    let after = new.channel_id.map(|c| c.get());

    match VoiceService::new(db)
        .handle_state_change(
            guild_id.get(),
            user_id.get(),
            &roles,
            before,
            after,
            Utc::now(),
        )
        .await
    {
        Ok(Some(seconds)) => tracing::debug!(
            "Credited {}s of voice time to {} in guild {}",
            seconds,
            user_id,
            guild_id
        ),
        Ok(None) => {}
        Err(e) => tracing::error!("Failed to track voice state for {}: {}", user_id, e),
    }
}
