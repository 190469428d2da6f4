//! Test factories for creating Serenity API objects.
//!
//! These build valid Serenity structs by deserializing JSON, simulating what Discord's
//! API would return, so capability checks can be tested without a gateway.
//!
//! # Available Factories
//!
//! - `role::create_test_role` - Create Serenity Role objects
//! - `role::create_managed_role` - Create integration-managed roles

pub mod role;

pub use role::{create_managed_role, create_test_role};
