//! Discord side of Golias: gateway events, prefix commands and component
//! interactions.
//!
//! Handlers translate Discord events into service calls and then apply the resulting
//! Discord effects. Each effect may fail on its own; failures are collected into
//! itemized warnings instead of undoing what was already stored.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, channel and role cache used for capability checks
//! - `GUILD_MESSAGES` and `MESSAGE_CONTENT` - Prefix commands
//! - `GUILD_MEMBERS` - Join and leave events (privileged intent)
//! - `GUILD_VOICE_STATES` - Voice time tracking

pub mod command;
pub mod custom_id;
pub mod embed;
pub mod handler;
pub mod interaction;
pub mod layout;
pub mod start;
pub mod util;
