use serenity::all::{Context, CreateMessage, Message};

use crate::server::{bot::embed::ticket_panel, error::AppError};

/// `!ticket`: posts the panel with the "Abrir Ticket" button in the current channel.
///
/// The ticket category is checked when a ticket is opened, so the panel can be posted
/// before `!setup` page 4 is done.
pub async fn ticket(ctx: &Context, message: &Message) -> Result<(), AppError> {
    let (embed, components) = ticket_panel();

    message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).components(components),
        )
        .await?;

    Ok(())
}
