use crate::server::{
    data::ticket::{TicketRepository, TicketSettingsUpdate},
    error::AppError,
    model::ticket::{CreateTicketParam, TicketStatus, DEFAULT_MAX_OPEN_PER_USER},
};
use test_utils::{builder::TestBuilder, factory, factory::ticket::TicketFactory};

mod create;
mod settings;
mod status;
