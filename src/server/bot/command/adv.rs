use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{Context, CreateMessage, GuildId, Message};

use crate::server::{
    bot::{
        command::{resolve_member, split_target},
        embed::warning_embed,
        util::{channel_id, guild_name, reply, role_id, try_dm, user_id, Actor, Warnings},
    },
    error::AppError,
    model::warning::{CreateWarningLogParam, WarningAction, WarningOutcome},
    service::discipline::{DisciplineService, WarningLocks},
};

/// Discord rejects audit log reasons longer than this.
const MAX_AUDIT_REASON: usize = 512;

/// `!adv <id|@membro> <motivo>`: records a warning and escalates.
///
/// The whole flow runs under the member's warning lock, so concurrent invocations for
/// the same member escalate one step each. The DM goes out before the role or ban,
/// while the member can still receive it.
pub async fn adv(
    db: &DatabaseConnection,
    locks: &WarningLocks,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
    actor: &Actor,
    args: &str,
) -> Result<(), AppError> {
    let usage = || AppError::Validation("Uso: !adv <id|@membro> <motivo>".to_string());
    let (target, reason) = split_target(args).ok_or_else(usage)?;
    if reason.is_empty() {
        return Err(usage());
    }

    let guild = guild_id.get();
    let target_id = resolve_member(db, ctx, guild_id, target).await?;
    let member = user_id(target_id)
        .ok_or_else(|| AppError::Validation("Membro inválido.".to_string()))?;

    let service = DisciplineService::new(db);
    let config = service.require_config(guild).await?;

    let _guard = locks.acquire(guild, target_id).await;
    let outcome = service.record_warning(guild, target_id, reason).await?;
    let mut warnings = Warnings::new();

    try_dm(
        ctx,
        target_id,
        CreateMessage::new().content(format!(
            "⚠️ Você recebeu uma advertência em **{}**.\nMotivo: {}\nAdvertências: {}",
            guild_name(ctx, guild_id),
            reason,
            outcome.count
        )),
    )
    .await;

    let audit_reason: String = reason.chars().take(MAX_AUDIT_REASON).collect();
    let mut banned = false;
    match outcome.action {
        WarningAction::Ban => {
            match guild_id
                .ban_with_reason(&ctx.http, member, 0, &audit_reason)
                .await
            {
                Ok(()) => {
                    banned = true;
                    service.reset_after_ban(guild, target_id).await?;
                }
                Err(e) => warnings.push_err("Não consegui banir o membro", e),
            }
        }
        action => {
            if let Some(role) = config.role_for(action).and_then(role_id) {
                if let Err(e) = ctx
                    .http
                    .add_member_role(guild_id, member, role, Some(audit_reason.as_str()))
                    .await
                {
                    warnings.push_err("Não consegui aplicar o cargo de advertência", e);
                }
            }
        }
    }

    service
        .append_log(CreateWarningLogParam {
            guild_id: guild,
            user_id: target_id,
            moderator_id: actor.user_id,
            reason: reason.to_string(),
            outcome,
        })
        .await?;

    if let Some(channel) = channel_id(config.warnings_channel_id) {
        let embed = warning_embed(target_id, actor.user_id, reason, outcome);
        if let Err(e) = channel
            .send_message(&ctx.http, CreateMessage::new().embed(embed))
            .await
        {
            warnings.push_err("Não consegui publicar no canal de advertências", e);
        }
    }

    tracing::info!(
        "Warning {} for {} in guild {} by {}: {}",
        outcome.count,
        target_id,
        guild,
        actor.user_id,
        outcome.action.as_str()
    );

    let summary = summary(target_id, outcome, banned);
    reply(ctx, message, warnings.render(&summary)).await;

    Ok(())
}

/// Moderator-facing result line.
///
/// A failed ban keeps the counter at the threshold, so the next `!adv` tries again.
fn summary(target_id: u64, outcome: WarningOutcome, banned: bool) -> String {
    match outcome.action {
        WarningAction::Ban if banned => format!(
            "🚫 <@{}> atingiu {} advertências e foi banido.",
            target_id, outcome.count
        ),
        WarningAction::Ban => format!(
            "⚠️ <@{}> atingiu {} advertências, mas o banimento falhou. \
             A próxima advertência tentará banir novamente.",
            target_id, outcome.count
        ),
        _ => format!(
            "✅ Advertência {} aplicada a <@{}> ({}).",
            outcome.count,
            target_id,
            outcome.action.label()
        ),
    }
}
