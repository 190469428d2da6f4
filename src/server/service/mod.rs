//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot layer (commands, interactions, event handlers) and the
//! data layer. They apply the community's rules, return domain models and plans, and
//! leave every Discord side effect to the caller. Each service borrows the
//! `DatabaseConnection` for its lifetime and returns `Result<_, AppError>`.

pub mod action;
pub mod cooldown;
pub mod discipline;
pub mod lookup;
pub mod permission;
pub mod reconcile;
pub mod registration;
pub mod settings;
pub mod ticket;
pub mod voice;
