//! SeaORM entity models for the Golias bot store.
//!
//! Discord snowflakes are persisted as `TEXT`; repositories in the main crate
//! parse them into `u64` at the boundary.

pub mod prelude;

pub mod action;
pub mod action_participant;
pub mod action_responsible_role;
pub mod action_settings;
pub mod action_stat;
pub mod action_type;
pub mod command_permission;
pub mod command_permission_role;
pub mod guild_settings;
pub mod member_index;
pub mod member_warning;
pub mod registration;
pub mod ticket;
pub mod ticket_settings;
pub mod voice_allowed_role;
pub mod voice_monitored_channel;
pub mod voice_session;
pub mod voice_settings;
pub mod voice_time;
pub mod warning_log;
