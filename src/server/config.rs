use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_COMMAND_COOLDOWN_SECONDS: u64 = 3;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    /// Prefix for chat commands, `!` unless overridden.
    pub command_prefix: String,
    /// Per user, per command cooldown.
    pub command_cooldown_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let command_cooldown_seconds = match std::env::var("COMMAND_COOLDOWN_SECONDS") {
            Ok(value) => value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvVar {
                name: "COMMAND_COOLDOWN_SECONDS".to_string(),
                value,
            })?,
            Err(_) => DEFAULT_COMMAND_COOLDOWN_SECONDS,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            command_prefix: std::env::var("COMMAND_PREFIX")
                .ok()
                .filter(|prefix| !prefix.is_empty())
                .unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string()),
            command_cooldown_seconds,
        })
    }
}
