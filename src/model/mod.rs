pub mod dashboard;
pub mod discord;
