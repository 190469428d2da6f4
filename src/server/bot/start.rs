use std::time::Duration;

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::server::{bot::handler::Handler, config::Config, error::AppError};

/// Gateway events the bot subscribes to.
///
/// `GUILD_MEMBERS` and `MESSAGE_CONTENT` are privileged and must be enabled for the
/// application in the Discord Developer Portal.
pub fn intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Starts the Discord bot and runs until the gateway connection ends.
///
/// Meant to be spawned on its own task.
///
/// # Arguments
/// - `config` - Token, command prefix and cooldown
/// - `db` - Database connection shared by every handler
///
/// # Returns
/// - `Ok(())` - The client shut down cleanly
/// - `Err(AppError)` - The client could not be built or the connection failed
pub async fn start_bot(config: &Config, db: DatabaseConnection) -> Result<(), AppError> {
    let handler = Handler::new(
        db,
        config.command_prefix.clone(),
        Duration::from_secs(config.command_cooldown_seconds),
    );

    let mut client = Client::builder(&config.discord_bot_token, intents())
        .event_handler(handler)
        .await?;

    tracing::info!(
        "Starting Discord bot with prefix {}",
        config.command_prefix
    );

    client.start().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribes_to_voice_and_message_content() {
        let intents = intents();

        assert!(intents.contains(GatewayIntents::GUILD_VOICE_STATES));
        assert!(intents.contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(intents.contains(GatewayIntents::GUILD_MEMBERS));
    }
}
