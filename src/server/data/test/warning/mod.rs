use crate::server::{
    data::warning::WarningRepository,
    error::AppError,
    model::warning::{CreateWarningLogParam, WarningAction, WarningOutcome},
};
use test_utils::{builder::TestBuilder, factory};

mod increment;
mod logs;
mod reset;
