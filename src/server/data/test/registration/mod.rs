use crate::server::{
    data::registration::RegistrationRepository,
    error::AppError,
    model::registration::{CreateRegistrationParam, DecideRegistrationParam, RegistrationStatus},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory, factory::registration::RegistrationFactory};

mod create;
mod decide;
mod find_latest_approved_by_assigned_id;
mod get_pending;
mod set_approval_message;
