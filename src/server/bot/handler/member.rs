use chrono::Utc;
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{Context, CreateMessage, GuildId, Member, User};

use crate::server::{
    bot::{
        embed::{exit_embed, welcome_embed},
        util::{channel_id, role_id},
    },
    service::{
        discipline::DisciplineService, lookup::LookupService, registration::RegistrationService,
        settings::SettingsService, voice::VoiceService,
    },
};

/// Handles the guild_member_addition event when a member joins a guild
///
/// Grants the provisional role, strips a leftover member role and posts the welcome
/// embed. Each step is independent; failures are logged and the rest still runs.
pub async fn handle_guild_member_addition(
    db: &DatabaseConnection,
    ctx: Context,
    new_member: Member,
) {
    if new_member.user.bot {
        return;
    }

    let guild_id = new_member.guild_id;
    let user_id = new_member.user.id;

    let settings = match SettingsService::new(db).get(guild_id.get()).await {
        Ok(Some(settings)) => settings,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to load settings for guild {}: {}", guild_id, e);
            return;
        }
    };

    if let Some(role) = settings.provisional_role_id.and_then(role_id) {
        if let Err(e) = ctx
            .http
            .add_member_role(guild_id, user_id, role, Some("Entrada no servidor"))
            .await
        {
            tracing::warn!("Failed to grant provisional role to {}: {}", user_id, e);
        }
    }

    if let Some(role) = settings.member_role_id.and_then(role_id) {
        if new_member.roles.contains(&role) {
            if let Err(e) = ctx
                .http
                .remove_member_role(guild_id, user_id, role, Some("Cadastro pendente"))
                .await
            {
                tracing::warn!("Failed to remove member role from {}: {}", user_id, e);
            }
        }
    }

    if let Some(channel) = settings.welcome_channel_id.and_then(channel_id) {
        let embed = welcome_embed(user_id.get(), &new_member.user.name);
        if let Err(e) = channel
            .send_message(&ctx.http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::warn!("Failed to post welcome for {}: {}", user_id, e);
        }
    }

    tracing::info!("Member {} joined guild {}", user_id, guild_id);
}

/// Handles the guild_member_removal event when a member leaves a guild
///
/// Prunes the lookup index, closes any open voice session and posts the exit report.
pub async fn handle_guild_member_removal(
    db: &DatabaseConnection,
    ctx: Context,
    guild_id: GuildId,
    user: User,
    _member_data_if_available: Option<Member>,
) {
    if user.bot {
        return;
    }

    let guild = guild_id.get();
    let user_id = user.id.get();

    if let Err(e) = LookupService::new(db).remove_member(guild, user_id).await {
        tracing::error!("Failed to prune member index for {}: {}", user_id, e);
    }

    if let Err(e) = VoiceService::new(db)
        .end_session(guild, user_id, Utc::now())
        .await
    {
        tracing::error!("Failed to end voice session for {}: {}", user_id, e);
    }

    let exit_channel = match SettingsService::new(db).get(guild).await {
        Ok(settings) => settings.and_then(|s| s.exit_channel_id).and_then(channel_id),
        Err(e) => {
            tracing::error!("Failed to load settings for guild {}: {}", guild, e);
            None
        }
    };
    let Some(channel) = exit_channel else {
        return;
    };

    let registration = RegistrationService::new(db)
        .latest_for_member(guild, user_id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to load registration for {}: {}", user_id, e);
            None
        });
    let warning_count = DisciplineService::new(db)
        .warning_count(guild, user_id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to load warnings for {}: {}", user_id, e);
            0
        });
    let voice_seconds = VoiceService::new(db)
        .total_seconds(guild, user_id)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to load voice time for {}: {}", user_id, e);
            0
        });

    let embed = exit_embed(
        user_id,
        &user.name,
        registration.as_ref(),
        warning_count,
        voice_seconds,
    );
    if let Err(e) = channel
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
    {
        tracing::warn!("Failed to post exit report for {}: {}", user_id, e);
    }

    tracing::info!("Member {} left guild {}", user_id, guild);
}
