use crate::server::{
    data::voice::VoiceRepository,
    error::AppError,
    model::voice::{VoiceTime, VoiceTotal, ADJUSTMENT_CHANNEL_ID},
};
use chrono::{Duration, Utc};
use test_utils::{builder::TestBuilder, factory};

mod add_time;
mod ranking;
mod replace_times;
mod session;
mod settings;
