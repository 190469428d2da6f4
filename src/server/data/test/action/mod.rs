use crate::server::{
    data::action::{ActionRepository, ActionSettingsUpdate},
    error::AppError,
    model::action::{ActionResult, ActionStatus, ActionTypeParam, CreateActionParam},
};
use test_utils::{
    builder::TestBuilder,
    factory,
    factory::action::{ActionFactory, ActionTypeFactory},
};

mod participants;
mod settings;
mod stats;
mod types;
