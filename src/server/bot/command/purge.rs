use std::time::Duration;

use chrono::Utc;
use dioxus_logger::tracing;
use serenity::all::{Context, GetMessages, Message, MessageId};

use crate::server::{
    bot::util::{bot_member, send_temporary},
    error::AppError,
};

/// Messages fetched and bulk deleted per request.
const BATCH_SIZE: u64 = 100;
/// Discord refuses to bulk delete messages older than two weeks.
const BULK_DELETE_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;

/// Parses the optional amount; no amount means the whole channel.
pub fn parse_amount(args: &str) -> Result<Option<u64>, AppError> {
    let args = args.trim();
    if args.is_empty() {
        return Ok(None);
    }

    match args.parse::<u64>() {
        Ok(amount) if amount > 0 => Ok(Some(amount)),
        _ => Err(AppError::Validation(
            "Uso: !purge [quantidade], com quantidade maior que zero.".to_string(),
        )),
    }
}

/// `!purge [quantidade]`: deletes recent messages in batches of 100.
///
/// Stops at the first message older than two weeks, since everything after it is
/// older too.
pub async fn purge(ctx: &Context, message: &Message, args: &str) -> Result<(), AppError> {
    let limit = parse_amount(args)?;
    let channel = message.channel_id;
    let guild_id = message
        .guild_id
        .ok_or_else(|| AppError::Validation("Use este comando em um servidor.".to_string()))?;

    let bot = bot_member(ctx, guild_id).await?;
    let can_manage = ctx
        .cache
        .guild(guild_id)
        .and_then(|guild| {
            guild
                .channels
                .get(&channel)
                .map(|c| guild.user_permissions_in(c, &bot).manage_messages())
        })
        .unwrap_or(true);
    if !can_manage {
        return Err(AppError::MissingCapability {
            target: format!("<#{}>", channel),
            missing: vec!["Gerenciar mensagens".to_string()],
        });
    }

    if let Err(e) = channel.delete_message(&ctx.http, message.id).await {
        tracing::debug!("Failed to delete !purge invocation: {}", e);
    }

    let cutoff = Utc::now().timestamp() - BULK_DELETE_MAX_AGE_SECS;
    let mut remaining = limit.unwrap_or(u64::MAX);
    let mut before = message.id;
    let mut deleted = 0usize;

    while remaining > 0 {
        let want = remaining.min(BATCH_SIZE);
        let batch = channel
            .messages(&ctx.http, GetMessages::new().before(before).limit(want as u8))
            .await?;
        let Some(last) = batch.last() else {
            break;
        };
        before = last.id;

        let ids: Vec<MessageId> = batch
            .iter()
            .filter(|m| m.timestamp.unix_timestamp() > cutoff)
            .map(|m| m.id)
            .collect();

        match ids.as_slice() {
            [] => {}
            [single] => channel.delete_message(&ctx.http, *single).await?,
            _ => channel.delete_messages(&ctx.http, &ids).await?,
        }
        deleted += ids.len();
        remaining = remaining.saturating_sub(batch.len() as u64);

        if (batch.len() as u64) < want || ids.len() < batch.len() {
            break;
        }
    }

    tracing::info!("Purged {} messages in channel {}", deleted, channel);

    send_temporary(
        ctx,
        channel,
        format!("✅ Canal limpo. Mensagens removidas: {}", deleted),
        Duration::from_secs(8),
    )
    .await;

    Ok(())
}
