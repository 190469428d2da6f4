use sea_orm::DatabaseConnection;
use serenity::all::{Context, CreateMessage, EditMessage, GuildId, Message};

use crate::server::{
    bot::{
        command::resolve_member,
        embed::{member_card_embed, registration_panel},
        util::{channel_id, message_id, reply},
    },
    error::AppError,
    service::{
        discipline::DisciplineService, registration::RegistrationService,
        settings::SettingsService, voice::VoiceService,
    },
};

/// `!set`: posts the registration panel in the configured registration channel, or
/// refreshes the panel already posted there.
pub async fn set(
    db: &DatabaseConnection,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
) -> Result<(), AppError> {
    let settings_service = SettingsService::new(db);
    let settings = settings_service.require(guild_id.get()).await?;

    let channel = settings
        .registration_channel_id
        .and_then(channel_id)
        .ok_or_else(|| {
            AppError::NotFound(
                "Canal de cadastro não configurado. Rode !setup primeiro.".to_string(),
            )
        })?;
    let (embed, components) = registration_panel();

    let existing = settings.registration_message_id.and_then(message_id);
    let edited = match existing {
        Some(panel) => channel
            .edit_message(
                ctx,
                panel,
                EditMessage::new()
                    .embed(embed.clone())
                    .components(components.clone()),
            )
            .await
            .ok(),
        None => None,
    };

    let panel = match edited {
        Some(panel) => panel,
        None => {
            channel
                .send_message(
                    &ctx.http,
                    CreateMessage::new().embed(embed).components(components),
                )
                .await?
        }
    };

    settings_service
        .set_registration_panel(guild_id.get(), channel.get(), panel.id.get())
        .await?;

    reply(
        ctx,
        message,
        format!(
            "✅ Painel de cadastro configurado com sucesso em <#{}>!",
            channel
        ),
    )
    .await;

    Ok(())
}

/// `!ficha <id|@membro>`: registration, warnings and voice time of a member.
pub async fn ficha(
    db: &DatabaseConnection,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
    args: &str,
) -> Result<(), AppError> {
    if args.trim().is_empty() {
        return Err(AppError::Validation("Uso: !ficha <id|@membro>".to_string()));
    }

    let user_id = resolve_member(db, ctx, guild_id, args).await?;
    let guild = guild_id.get();

    let registration = RegistrationService::new(db)
        .latest_for_member(guild, user_id)
        .await?;
    let warning_count = DisciplineService::new(db)
        .warning_count(guild, user_id)
        .await?;
    let voice_seconds = VoiceService::new(db).total_seconds(guild, user_id).await?;

    let embed = member_card_embed(user_id, registration.as_ref(), warning_count, voice_seconds);
    message
        .channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;

    Ok(())
}
