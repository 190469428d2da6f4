#[cfg(feature = "web")]
pub mod discord;

#[cfg(feature = "web")]
pub mod helper;
