//! Factory methods for creating test data.
//!
//! Each entity has either a `Factory` builder for customization or a `create_*`
//! convenience function for quick default creation. Discord ids default to unique
//! snowflake-shaped numbers so repositories can parse them.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let settings = factory::create_configured_settings(&db).await?;
//! let guild_id: u64 = settings.guild_id.parse().unwrap();
//! let registration = factory::create_pending_registration(&db, guild_id).await?;
//! ```
//!
//! # Customization
//!
//! ```rust,ignore
//! let registration = factory::registration::RegistrationFactory::new(&db, guild_id)
//!     .assigned_id("777")
//!     .status("approved")
//!     .build()
//!     .await?;
//! ```

pub mod action;
pub mod command_permission;
pub mod guild_settings;
pub mod helpers;
pub mod member_index;
pub mod registration;
pub mod ticket;
pub mod voice;
pub mod warning;

pub use action::{create_action, create_action_type};
pub use command_permission::create_command_permission;
pub use guild_settings::create_configured_settings;
pub use member_index::create_member_index;
pub use registration::create_pending_registration;
pub use ticket::create_ticket;
pub use voice::{create_voice_session, create_voice_time};
pub use warning::create_member_warning;
