use crate::server::{data::command_permission::CommandPermissionRepository, error::AppError};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod get;
mod remove;
mod set_roles;
