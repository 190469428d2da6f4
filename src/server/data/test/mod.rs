mod action;
mod command_permission;
mod member_index;
mod registration;
mod settings;
mod ticket;
mod voice;
mod warning;
