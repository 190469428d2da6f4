use dioxus_logger::tracing;
use serenity::all::{Context, CreateMessage, Message};
use url::Url;

use crate::server::{bot::embed::invite_message, error::AppError};

const AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";

/// Administrator permission bit requested for the bot.
const BOT_PERMISSIONS: &str = "8";

/// Link that adds the bot with its slash command scope.
pub fn invite_url(client_id: u64) -> Result<Url, AppError> {
    Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", client_id.to_string().as_str()),
            ("permissions", BOT_PERMISSIONS),
            ("scope", "bot applications.commands"),
        ],
    )
    .map_err(|e| AppError::InternalError(format!("invalid invite url: {}", e)))
}

/// `!convite`: posts the invite card and removes the invoking message.
pub async fn convite(ctx: &Context, message: &Message) -> Result<(), AppError> {
    let bot_id = ctx.cache.current_user().id.get();
    let (embed, components) = invite_message(invite_url(bot_id)?.as_str());

    message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).components(components),
        )
        .await?;

    if let Err(e) = message.delete(&ctx.http).await {
        tracing::debug!("Failed to delete !convite message: {}", e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invite_carries_client_and_scopes() {
        let url = invite_url(123456789012345678).unwrap();
        let query: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(url.as_str().starts_with(AUTHORIZE_URL));
        assert!(query.contains(&("client_id".to_string(), "123456789012345678".to_string())));
        assert!(query.contains(&("permissions".to_string(), "8".to_string())));
        assert!(query.contains(&("scope".to_string(), "bot applications.commands".to_string())));
    }
}
