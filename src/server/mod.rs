//! Server-side bot backend.
//!
//! # Architecture
//!
//! - **Bot Layer** (`bot/`) - Gateway events, prefix commands and component interactions
//! - **Service Layer** (`service/`) - Community rules, returning plans the bot layer applies
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and user-facing messages
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Startup** (`startup`) - Database connection and migrations
//!
//! # Event Flow
//!
//! 1. **Bot** receives a gateway event, command message or interaction
//! 2. **Service** validates it and records the outcome
//! 3. **Data** persists the change and returns domain models
//! 4. **Bot** applies the Discord effects, collecting failures as warnings
//!
//! # Feature Gates
//!
//! This module is only available with the `server` feature flag enabled.

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod service;
pub mod startup;
pub mod util;
