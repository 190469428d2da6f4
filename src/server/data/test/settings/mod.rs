use crate::server::{
    data::settings::SettingsRepository, error::AppError, model::settings::SettingsField,
};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::builder::TestBuilder;

mod get_or_create;
mod set_field;
mod set_registration_panel;
