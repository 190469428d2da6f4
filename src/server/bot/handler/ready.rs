//! Ready event handler.
//!
//! Besides logging the connection, `ready` reconciles in-flight workflow state: every
//! pending registration's review message, every open ticket's control message and every
//! unfinished action is edited so it carries current components, or reposted when it
//! no longer exists.
//! Failures are logged per record and never stop the bot.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{ActivityData, Context, CreateMessage, EditMessage, Ready};

use crate::server::{
    bot::{
        embed::{review_components, review_embed, ticket_control},
        interaction::action::{edit_action, post_action},
        util::{channel_id, message_id},
    },
    error::AppError,
    model::{action::ActionRoster, registration::Registration, ticket::Ticket},
    service::{
        reconcile::{ReconcileService, ReviewAction},
        ticket::TicketService,
    },
};

/// Handles the ready event when the bot connects to Discord.
pub async fn handle_ready(db: &DatabaseConnection, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::custom("Cuidando da comunidade")));

    let plan = match ReconcileService::new(db).plan().await {
        Ok(plan) => plan,
        Err(e) => {
            tracing::error!("Failed to plan startup reconciliation: {}", e);
            return;
        }
    };

    let mut failed = 0;
    for (registration, action) in &plan.registrations {
        if let Err(e) = reconcile_registration(db, &ctx, registration, *action).await {
            failed += 1;
            tracing::warn!(
                "Failed to reconcile registration {}: {}",
                registration.id,
                e
            );
        }
    }
    for ticket in &plan.tickets {
        if let Err(e) = reconcile_ticket(db, &ctx, ticket).await {
            failed += 1;
            tracing::warn!("Failed to reconcile ticket {}: {}", ticket.id, e);
        }
    }

    for roster in &plan.actions {
        if let Err(e) = reconcile_action(db, &ctx, roster).await {
            failed += 1;
            tracing::warn!("Failed to reconcile action {}: {}", roster.action.id, e);
        }
    }

    tracing::info!(
        "Reconciled {} pending registrations, {} open tickets and {} unfinished actions ({} failed)",
        plan.registrations.len(),
        plan.tickets.len(),
        plan.actions.len(),
        failed
    );
}

async fn post_review(
    db: &DatabaseConnection,
    ctx: &Context,
    registration: &Registration,
    channel: u64,
) -> Result<(), AppError> {
    let channel = channel_id(channel)
        .ok_or_else(|| AppError::InternalError("approval channel id is zero".to_string()))?;

    let message = channel
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .embed(review_embed(registration))
                .components(review_components(registration.id)),
        )
        .await?;

    ReconcileService::new(db)
        .record_reposted(registration.id, channel.get(), message.id.get())
        .await?;

    Ok(())
}

async fn reconcile_registration(
    db: &DatabaseConnection,
    ctx: &Context,
    registration: &Registration,
    action: ReviewAction,
) -> Result<(), AppError> {
    match action {
        ReviewAction::Edit {
            channel_id: channel,
            message_id: message,
            fallback_channel_id,
        } => {
            let edited = match (channel_id(channel), message_id(message)) {
                (Some(channel), Some(message)) => channel
                    .edit_message(
                        ctx,
                        message,
                        EditMessage::new()
                            .embed(review_embed(registration))
                            .components(review_components(registration.id)),
                    )
                    .await
                    .is_ok(),
                _ => false,
            };

            if !edited {
                tracing::debug!(
                    "Review message for registration {} is gone, reposting",
                    registration.id
                );
                post_review(db, ctx, registration, fallback_channel_id).await?;
            }

            Ok(())
        }
        ReviewAction::Post { channel_id } => post_review(db, ctx, registration, channel_id).await,
        ReviewAction::Skip => {
            tracing::warn!(
                "Registration {} has no approval channel to post to",
                registration.id
            );
            Ok(())
        }
    }
}

async fn reconcile_ticket(
    db: &DatabaseConnection,
    ctx: &Context,
    ticket: &Ticket,
) -> Result<(), AppError> {
    let channel = channel_id(ticket.channel_id)
        .ok_or_else(|| AppError::InternalError("ticket channel id is zero".to_string()))?;
    let (embed, components) = ticket_control(ticket);

    if let Some(message) = ticket.control_message_id.and_then(message_id) {
        let edited = channel
            .edit_message(
                ctx,
                message,
                EditMessage::new()
                    .embed(embed.clone())
                    .components(components.clone()),
            )
            .await;
        if edited.is_ok() {
            return Ok(());
        }
    }

    let message = channel
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).components(components),
        )
        .await?;
    TicketService::new(db)
        .set_control_message(ticket.channel_id, message.id.get())
        .await?;

    Ok(())
}

async fn reconcile_action(
    db: &DatabaseConnection,
    ctx: &Context,
    roster: &ActionRoster,
) -> Result<(), AppError> {
    if let Ok(true) = edit_action(ctx, roster).await {
        return Ok(());
    }

    tracing::debug!("Action {} message is gone, reposting", roster.action.id);
    let channel = channel_id(roster.action.channel_id)
        .ok_or_else(|| AppError::InternalError("action channel id is zero".to_string()))?;
    post_action(db, ctx, channel, roster).await?;

    Ok(())
}
