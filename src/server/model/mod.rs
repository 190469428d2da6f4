//! Server-side domain models and parameter types.
//!
//! Entity models are converted into these types at the repository boundary, parsing
//! stored snowflakes into `u64` so services never handle raw `TEXT` ids.

pub mod action;
pub mod member_index;
pub mod permission;
pub mod registration;
pub mod settings;
pub mod ticket;
pub mod voice;
pub mod warning;
