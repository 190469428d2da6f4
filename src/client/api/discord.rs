use crate::{
    client::{
        api::helper::{get, parse_response, send_request},
        model::error::ApiError,
    },
    model::discord::{DiscordGuildDto, DiscordUserDto},
};

pub async fn get_current_user(token: &str) -> Result<DiscordUserDto, ApiError> {
    let response = send_request(get("/users/@me", token)).await?;
    parse_response(response).await
}

pub async fn get_user_guilds(token: &str) -> Result<Vec<DiscordGuildDto>, ApiError> {
    let response = send_request(get("/users/@me/guilds", token)).await?;
    parse_response(response).await
}
