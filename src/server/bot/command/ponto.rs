use sea_orm::DatabaseConnection;
use serenity::all::{Context, CreateMessage, GuildId, Message};

use crate::server::{
    bot::{
        command::{resolve_member, split_target},
        embed::{voice_ranking_embed, voice_report_embed},
        util::{reply, Actor},
    },
    error::AppError,
    service::voice::{format_duration, parse_minutes_delta, VoiceService},
};

/// `!ponto [id|@membro]`: per-channel voice time of a member, the invoker by default.
pub async fn ponto(
    db: &DatabaseConnection,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
    actor: &Actor,
    args: &str,
) -> Result<(), AppError> {
    let user_id = if args.trim().is_empty() {
        actor.user_id
    } else {
        resolve_member(db, ctx, guild_id, args).await?
    };

    let report = VoiceService::new(db)
        .member_report(guild_id.get(), user_id)
        .await?;

    message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(voice_report_embed(user_id, &report)),
        )
        .await?;

    Ok(())
}

/// `!ponto_relatorio`: top members by voice time.
pub async fn ranking(
    db: &DatabaseConnection,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
) -> Result<(), AppError> {
    let ranking = VoiceService::new(db).ranking(guild_id.get()).await?;

    message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(voice_ranking_embed(&ranking)),
        )
        .await?;

    Ok(())
}

/// `!ponto_ajustar <id|@membro> <±minutos>`: adds or removes voice time.
pub async fn adjust(
    db: &DatabaseConnection,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
    args: &str,
) -> Result<(), AppError> {
    let usage =
        || AppError::Validation("Uso: !ponto_ajustar <id|@membro> <±minutos>".to_string());
    let (target, delta) = split_target(args).ok_or_else(usage)?;
    if delta.is_empty() {
        return Err(usage());
    }

    let delta_seconds = parse_minutes_delta(delta)?;
    let user_id = resolve_member(db, ctx, guild_id, target).await?;

    let new_total = VoiceService::new(db)
        .adjust(guild_id.get(), user_id, delta_seconds)
        .await?;

    reply(
        ctx,
        message,
        format!(
            "✅ Tempo de <@{}> ajustado em {:+} min. Novo total: {}",
            user_id,
            delta_seconds / 60,
            format_duration(new_total)
        ),
    )
    .await;

    Ok(())
}
