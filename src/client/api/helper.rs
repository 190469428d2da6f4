use reqwasm::http::{Request, Response};
use serde::{de::DeserializeOwned, Deserialize};

use crate::client::{constant::DISCORD_API, model::error::ApiError};

/// Error body returned by the Discord REST API.
#[derive(Deserialize)]
struct DiscordErrorDto {
    message: String,
}

/// Parses a Discord response, keeping the HTTP status of failures
pub async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if (200..300).contains(&status) {
        response.json::<T>().await.map_err(|e| ApiError {
            status: 500,
            message: format!("Failed to parse response: {}", e),
        })
    } else {
        let message = match response.json::<DiscordErrorDto>().await {
            Ok(error) => error.message,
            Err(_) => format!("Discord respondeu com status {}", status),
        };

        Err(ApiError { status, message })
    }
}

/// GET against the Discord API on behalf of the token holder
pub fn get(path: &str, token: &str) -> Request {
    Request::get(&format!("{}{}", DISCORD_API, path))
        .header("Authorization", &format!("Bearer {}", token))
}

pub async fn send_request(request: Request) -> Result<Response, ApiError> {
    request.send().await.map_err(|e| ApiError {
        status: 500,
        message: format!("Failed to send request: {}", e),
    })
}
