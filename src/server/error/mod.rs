//! Error types and user-facing message mapping.
//!
//! `AppError` is the single error type returned by services and repositories wrappers.
//! Command and interaction handlers never surface raw errors to Discord: they convert
//! them with `AppError::user_message()`, which logs internal failures and returns a
//! short Portuguese message safe to show in a channel.

pub mod config;

use dioxus_logger::tracing;
use thiserror::Error;

use crate::server::error::config::ConfigError;

/// Generic reply used for every failure the user cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "❌ Ocorreu um erro interno. Tente novamente mais tarde.";

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Invalid user input, such as a malformed registration form or a decision on an
    /// already processed record.
    #[error("{0}")]
    Validation(String),

    /// The invoking member lacks the administrator bit or a configured role.
    #[error("{0}")]
    Permission(String),

    /// Missing settings, record or member.
    #[error("{0}")]
    NotFound(String),

    /// The bot lacks Discord permissions needed to use a channel or role.
    ///
    /// # Fields
    /// - `target` - Human readable name of the channel or role
    /// - `missing` - One entry per missing capability
    #[error("missing capabilities on {target}: {}", missing.join(", "))]
    MissingCapability { target: String, missing: Vec<String> },

    /// The same user invoked the same command again before the cooldown elapsed.
    #[error("rate limited for {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Unexpected condition indicating a bug. The message is logged, never shown.
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to keep `AppError` small.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Converts the error into the message replied to the invoking member.
    ///
    /// User-correctable variants echo their message. Storage, Discord, configuration
    /// and internal failures are logged with full detail and replaced by
    /// [`INTERNAL_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => format!("⚠️ {}", msg),
            Self::Permission(msg) => format!("🚫 {}", msg),
            Self::NotFound(msg) => format!("🔍 {}", msg),
            Self::MissingCapability { target, missing } => {
                let items = missing
                    .iter()
                    .map(|m| format!("• {}", m))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("❌ Não tenho permissões suficientes em **{}**:\n{}", target, items)
            }
            Self::RateLimited { retry_after_secs } => format!(
                "⏳ Aguarde {}s antes de usar este comando novamente.",
                retry_after_secs
            ),
            err => {
                tracing::error!("{}", err);
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}
