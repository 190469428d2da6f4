use crate::server::{data::member_index::MemberIndexRepository, error::AppError};
use sea_orm::{EntityTrait, PaginatorTrait};
use test_utils::{builder::TestBuilder, factory};

mod remove_user;
mod upsert;
