//! Voice-time tracking: session transitions, accumulation, adjustment and reports.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::voice::VoiceRepository,
    error::AppError,
    model::voice::{VoiceSettings, VoiceTime, VoiceTotal, ADJUSTMENT_CHANNEL_ID},
};

/// Entries shown in `!ponto` and `!ponto_relatorio`.
pub const REPORT_LIMIT: usize = 10;

/// What a voice state update means for the member's session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTransition {
    None,
    Start(u64),
    End,
    EndAndStart(u64),
}

impl VoiceTransition {
    /// Classifies a move from `before` to `after` (`None` meaning disconnected).
    pub fn classify(
        settings: &VoiceSettings,
        has_allowed_role: bool,
        before: Option<u64>,
        after: Option<u64>,
    ) -> Self {
        if !has_allowed_role {
            return Self::End;
        }

        match (before, after) {
            (None, None) => Self::None,
            (None, Some(to)) => {
                if settings.is_monitored(to) {
                    Self::Start(to)
                } else {
                    Self::None
                }
            }
            (Some(_), None) => Self::End,
            (Some(from), Some(to)) if from == to => Self::None,
            (Some(_), Some(to)) if settings.is_afk(to) => Self::End,
            (Some(from), Some(to)) => {
                match (settings.is_monitored(from), settings.is_monitored(to)) {
                    (true, true) => Self::EndAndStart(to),
                    (true, false) => Self::End,
                    (false, true) => Self::Start(to),
                    (false, false) => Self::None,
                }
            }
        }
    }
}

/// Formats seconds as `Xh Ymin Zseg`. Negative values show as zero.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!(
        "{}h {}min {}seg",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}

/// Parses a signed minute delta such as `+30`, `-15` or `45`, returning seconds.
pub fn parse_minutes_delta(input: &str) -> Result<i64, AppError> {
    let invalid = || {
        AppError::Validation(format!(
            "Valor inválido `{}`. Use minutos, por exemplo `+30` ou `-15`.",
            input
        ))
    };

    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let minutes: i64 = digits.parse().map_err(|_| invalid())?;

    minutes.checked_mul(60).ok_or_else(invalid)
}

/// Applies a delta to per-channel totals, keeping their proportions.
///
/// The result sums to `max(total + delta, 0)` exactly; the rounding remainder goes to the
/// largest channel and zero rows are dropped. Fails when the new total does not fit in `i64`.
pub fn distribute(rows: &[VoiceTime], delta: i64) -> Result<Vec<VoiceTime>, AppError> {
    let too_large =
        || AppError::Validation("O ajuste excede o tempo máximo registrável.".to_string());

    let total = rows
        .iter()
        .try_fold(0i64, |sum, r| sum.checked_add(r.total_seconds))
        .ok_or_else(too_large)?;

    if rows.is_empty() || total <= 0 {
        return Ok(if delta > 0 {
            vec![VoiceTime {
                channel_id: ADJUSTMENT_CHANNEL_ID,
                total_seconds: delta,
            }]
        } else {
            Vec::new()
        });
    }

    if delta < 0 && delta.unsigned_abs() >= total.unsigned_abs() {
        return Ok(Vec::new());
    }

    let new_total = total.checked_add(delta).ok_or_else(too_large)?;
    let mut scaled: Vec<VoiceTime> = rows
        .iter()
        .map(|row| VoiceTime {
            channel_id: row.channel_id,
            total_seconds: (new_total as i128 * row.total_seconds as i128 / total as i128) as i64,
        })
        .collect();

    let assigned: i64 = scaled.iter().map(|r| r.total_seconds).sum();
    let largest = rows
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.total_seconds.cmp(&b.total_seconds).then(ib.cmp(ia)))
        .map(|(index, _)| index);

    if let Some(index) = largest {
        scaled[index].total_seconds += new_total - assigned;
    }

    scaled.retain(|r| r.total_seconds > 0);
    Ok(scaled)
}

/// A member's `!ponto` report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberVoiceReport {
    /// Largest channels first, at most [`REPORT_LIMIT`].
    pub channels: Vec<VoiceTime>,
    /// Channels left out of `channels`.
    pub extra_channels: usize,
    pub total_seconds: i64,
}

pub struct VoiceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> VoiceService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn settings(&self, guild_id: u64) -> Result<VoiceSettings, AppError> {
        Ok(VoiceRepository::new(self.db).get_settings(guild_id).await?)
    }

    pub async fn set_afk_channel(
        &self,
        guild_id: u64,
        channel_id: Option<u64>,
    ) -> Result<(), AppError> {
        Ok(VoiceRepository::new(self.db)
            .set_afk_channel(guild_id, channel_id)
            .await?)
    }

    pub async fn set_monitor_all(&self, guild_id: u64, monitor_all: bool) -> Result<(), AppError> {
        Ok(VoiceRepository::new(self.db)
            .set_monitor_all(guild_id, monitor_all)
            .await?)
    }

    pub async fn set_allowed_roles(&self, guild_id: u64, role_ids: &[u64]) -> Result<(), AppError> {
        Ok(VoiceRepository::new(self.db)
            .set_allowed_roles(guild_id, role_ids)
            .await?)
    }

    pub async fn set_monitored_channels(
        &self,
        guild_id: u64,
        channel_ids: &[u64],
    ) -> Result<(), AppError> {
        Ok(VoiceRepository::new(self.db)
            .set_monitored_channels(guild_id, channel_ids)
            .await?)
    }

    /// Applies a classified transition.
    ///
    /// # Returns
    /// - `Ok(Some(seconds))` - A session ended and was credited
    /// - `Ok(None)` - No session ended
    pub async fn apply_transition(
        &self,
        guild_id: u64,
        user_id: u64,
        transition: VoiceTransition,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError> {
        match transition {
            VoiceTransition::None => Ok(None),
            VoiceTransition::End => self.end_session(guild_id, user_id, now).await,
            VoiceTransition::Start(channel_id) => {
                VoiceRepository::new(self.db)
                    .start_session(guild_id, user_id, channel_id, now)
                    .await?;
                Ok(None)
            }
            VoiceTransition::EndAndStart(channel_id) => {
                let credited = self.end_session(guild_id, user_id, now).await?;
                VoiceRepository::new(self.db)
                    .start_session(guild_id, user_id, channel_id, now)
                    .await?;
                Ok(credited)
            }
        }
    }

    /// Classifies and applies a voice state update in one step.
    pub async fn handle_state_change(
        &self,
        guild_id: u64,
        user_id: u64,
        member_roles: &[u64],
        before: Option<u64>,
        after: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError> {
        let settings = self.settings(guild_id).await?;
        let transition = VoiceTransition::classify(
            &settings,
            settings.member_allowed(member_roles),
            before,
            after,
        );

        self.apply_transition(guild_id, user_id, transition, now)
            .await
    }

    /// Ends the member's open session and credits its channel.
    pub async fn end_session(
        &self,
        guild_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<i64>, AppError> {
        let repo = VoiceRepository::new(self.db);

        let Some(session) = repo.take_session(guild_id, user_id).await? else {
            return Ok(None);
        };

        let elapsed = (now - session.joined_at).num_seconds().max(0);
        if elapsed > 0 {
            repo.add_time(guild_id, user_id, session.channel_id, elapsed)
                .await?;
        }

        Ok(Some(elapsed))
    }

    /// Adds `delta_seconds` to the member's total, spread across their channels.
    ///
    /// # Returns
    /// - `Ok(i64)` - The member's new total
    pub async fn adjust(
        &self,
        guild_id: u64,
        user_id: u64,
        delta_seconds: i64,
    ) -> Result<i64, AppError> {
        let repo = VoiceRepository::new(self.db);
        let current = repo.get_times(guild_id, user_id).await?;

        if delta_seconds == 0 {
            return Ok(current.iter().map(|r| r.total_seconds).sum());
        }

        let adjusted = distribute(&current, delta_seconds)?;
        repo.replace_times(guild_id, user_id, &adjusted).await?;

        Ok(adjusted.iter().map(|r| r.total_seconds).sum())
    }

    pub async fn total_seconds(&self, guild_id: u64, user_id: u64) -> Result<i64, AppError> {
        let times = VoiceRepository::new(self.db)
            .get_times(guild_id, user_id)
            .await?;

        Ok(times.iter().map(|r| r.total_seconds).sum())
    }

    pub async fn member_report(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<MemberVoiceReport, AppError> {
        let mut channels = VoiceRepository::new(self.db)
            .get_times(guild_id, user_id)
            .await?;

        let total_seconds = channels.iter().map(|r| r.total_seconds).sum();
        let extra_channels = channels.len().saturating_sub(REPORT_LIMIT);
        channels.truncate(REPORT_LIMIT);

        Ok(MemberVoiceReport {
            channels,
            extra_channels,
            total_seconds,
        })
    }

    pub async fn ranking(&self, guild_id: u64) -> Result<Vec<VoiceTotal>, AppError> {
        Ok(VoiceRepository::new(self.db)
            .ranking(guild_id, REPORT_LIMIT)
            .await?)
    }
}
