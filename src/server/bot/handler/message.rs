use serenity::all::{Context, Message};

use crate::server::bot::{
    command::{self, Invocation},
    handler::Handler,
    util::reply,
};

/// Handles prefixed chat commands.
///
/// Bots and DMs are ignored. Any error is answered in the channel with its user-facing
/// message; internal failures are logged by [`AppError::user_message`].
///
/// [`AppError::user_message`]: crate::server::error::AppError::user_message
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    if message.author.bot || message.guild_id.is_none() {
        return;
    }

    let Some(invocation) = Invocation::parse(&handler.prefix, &message.content) else {
        return;
    };

    if let Err(e) = command::dispatch(handler, &ctx, &message, invocation).await {
        reply(&ctx, &message, e.user_message()).await;
    }
}
