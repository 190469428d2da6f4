//! Per-user, per-command cooldown.

use std::time::Duration;

use governor::{
    clock::{Clock, DefaultClock},
    middleware::NoOpMiddleware,
    state::keyed::DefaultKeyedStateStore,
    Quota, RateLimiter,
};

use crate::server::error::AppError;

/// Tracked keys past which idle entries are swept.
const SWEEP_THRESHOLD: usize = 1024;

type CommandKey = (u64, String);
type KeyedLimiter<C> =
    RateLimiter<CommandKey, DefaultKeyedStateStore<CommandKey>, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// One invocation per window for each (user, command), with a burst of one.
pub struct CooldownTracker<C: Clock = DefaultClock> {
    clock: C,
    /// `None` when the window is zero.
    limiter: Option<KeyedLimiter<C>>,
}

impl CooldownTracker {
    pub fn new(window: Duration) -> Self {
        Self::with_clock(window, DefaultClock::default())
    }
}

impl<C: Clock + Clone> CooldownTracker<C> {
    pub fn with_clock(window: Duration, clock: C) -> Self {
        let limiter = Quota::with_period(window)
            .map(|quota| RateLimiter::new(quota, DefaultKeyedStateStore::default(), clock.clone()));

        Self { clock, limiter }
    }

    /// Records an invocation, or fails if the previous one is too recent.
    ///
    /// A rejected invocation does not restart the window.
    pub fn check(&self, user_id: u64, command: &str) -> Result<(), AppError> {
        let Some(limiter) = &self.limiter else {
            return Ok(());
        };

        if let Err(not_until) = limiter.check_key(&(user_id, command.to_string())) {
            let remaining = not_until.wait_time_from(self.clock.now());
            let retry_after_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
            return Err(AppError::RateLimited { retry_after_secs });
        }

        if limiter.len() > SWEEP_THRESHOLD {
            limiter.retain_recent();
        }

        Ok(())
    }
}
