//! Golias Test Utils
//!
//! Shared testing utilities for the Golias bot. This crate offers a builder for creating
//! test contexts backed by in-memory SQLite databases, factories for seeding rows, and
//! helpers for constructing Serenity objects without a gateway connection.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Registration;
//!
//! #[tokio::test]
//! async fn test_registration() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Registration)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
