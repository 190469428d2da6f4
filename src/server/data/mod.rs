//! Database repository layer.
//!
//! Repositories hold a borrowed `DatabaseConnection`, use SeaORM entity models
//! internally and return domain models from `server::model`, parsing stored snowflakes
//! at this boundary.

pub mod action;
pub mod command_permission;
pub mod member_index;
pub mod registration;
pub mod settings;
pub mod ticket;
pub mod voice;
pub mod warning;

#[cfg(test)]
mod test;
