//! Shared bot helpers: id conversion, actor resolution and replies.

use std::{num::NonZeroU64, time::Duration};

use dioxus_logger::tracing;
use serenity::all::{
    ChannelId, Context, CreateMessage, GuildId, Member, Message, MessageId, RoleId, UserId,
};

use crate::server::error::AppError;

pub const COLOR_INFO: u32 = 0x3498db;
pub const COLOR_SUCCESS: u32 = 0x2ecc71;
pub const COLOR_WARNING: u32 = 0xf39c12;
pub const COLOR_DANGER: u32 = 0xe74c3c;
pub const COLOR_NEUTRAL: u32 = 0x95a5a6;
pub const COLOR_PANEL: u32 = 0x9b59b6;

// Serenity ids panic on zero; stored ids never are, but channel 0 marks manual voice
// adjustments.
pub fn channel_id(id: u64) -> Option<ChannelId> {
    NonZeroU64::new(id).map(ChannelId::from)
}

pub fn role_id(id: u64) -> Option<RoleId> {
    NonZeroU64::new(id).map(RoleId::from)
}

pub fn user_id(id: u64) -> Option<UserId> {
    NonZeroU64::new(id).map(UserId::from)
}

pub fn message_id(id: u64) -> Option<MessageId> {
    NonZeroU64::new(id).map(MessageId::from)
}

pub fn guild_id(id: u64) -> Option<GuildId> {
    NonZeroU64::new(id).map(GuildId::from)
}

/// Guild member invoking a command or pressing a component.
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: u64,
    pub role_ids: Vec<u64>,
    pub is_admin: bool,
}

impl Actor {
    /// Builds the actor from an interaction member, whose permissions Discord resolves.
    pub fn from_interaction_member(member: &Member) -> Self {
        Self {
            user_id: member.user.id.get(),
            role_ids: member.roles.iter().map(|r| r.get()).collect(),
            is_admin: member.permissions.is_some_and(|p| p.administrator()),
        }
    }

    /// Resolves the author of a guild message, computing permissions from the cache.
    pub async fn from_message(ctx: &Context, message: &Message) -> Result<Self, AppError> {
        let guild_id = message
            .guild_id
            .ok_or_else(|| AppError::Validation("Use este comando em um servidor.".to_string()))?;

        let member = guild_id.member(ctx, message.author.id).await?;
        let is_admin = ctx
            .cache
            .guild(guild_id)
            .map(|guild| guild.member_permissions(&member).administrator())
            .unwrap_or(false);

        Ok(Self {
            user_id: member.user.id.get(),
            role_ids: member.roles.iter().map(|r| r.get()).collect(),
            is_admin,
        })
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Permission(
                "Apenas administradores podem fazer isso.".to_string(),
            ))
        }
    }
}

/// The bot's own member in a guild, from the cache when possible.
pub async fn bot_member(ctx: &Context, guild_id: GuildId) -> Result<Member, AppError> {
    let bot_id = ctx.cache.current_user().id;
    let cached = ctx
        .cache
        .guild(guild_id)
        .and_then(|guild| guild.members.get(&bot_id).cloned());

    match cached {
        Some(member) => Ok(member),
        None => Ok(guild_id.member(ctx, bot_id).await?),
    }
}

/// Replies to a command message, logging delivery failures.
pub async fn reply(ctx: &Context, message: &Message, content: impl Into<String>) {
    if let Err(e) = message.reply(&ctx.http, content).await {
        tracing::warn!("Failed to reply in channel {}: {}", message.channel_id, e);
    }
}

/// Sends a direct message, ignoring failures such as closed DMs.
pub async fn try_dm(ctx: &Context, user: u64, message: CreateMessage) {
    let Some(user) = user_id(user) else {
        return;
    };

    if let Err(e) = user.direct_message(ctx, message).await {
        tracing::debug!("Could not DM user {}: {}", user, e);
    }
}

/// Posts a message that deletes itself after `ttl`.
pub async fn send_temporary(ctx: &Context, channel: ChannelId, content: String, ttl: Duration) {
    let message = match channel.say(&ctx.http, content).await {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Failed to send message in channel {}: {}", channel, e);
            return;
        }
    };

    let http = ctx.http.clone();
    tokio::spawn(async move {
        tokio::time::sleep(ttl).await;
        if let Err(e) = message.channel_id.delete_message(&http, message.id).await {
            tracing::debug!("Temporary message {} already gone: {}", message.id, e);
        }
    });
}

/// Cached guild name, or a generic label when the guild is not cached.
pub fn guild_name(ctx: &Context, guild_id: GuildId) -> String {
    ctx.cache
        .guild(guild_id)
        .map(|guild| guild.name.clone())
        .unwrap_or_else(|| "servidor".to_string())
}

/// Formats a `<#id>` mention, or a label for the manual adjustment channel.
pub fn channel_mention(id: u64) -> String {
    if id == 0 {
        "Ajuste manual".to_string()
    } else {
        format!("<#{}>", id)
    }
}

/// Collects itemized warnings for effects that may fail independently.
#[derive(Debug, Default)]
pub struct Warnings(Vec<String>);

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failed effect, logging the underlying error.
    pub fn push_err(&mut self, what: &str, err: impl std::fmt::Display) {
        tracing::warn!("{}: {}", what, err);
        self.0.push(what.to_string());
    }

    pub fn push(&mut self, what: impl Into<String>) {
        self.0.push(what.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders the warnings as a bullet list appended to a summary.
    pub fn render(&self, summary: &str) -> String {
        if self.0.is_empty() {
            return summary.to_string();
        }

        let items = self
            .0
            .iter()
            .map(|w| format!("• {}", w))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n⚠️ Avisos:\n{}", summary, items)
    }
}
