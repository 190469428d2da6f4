//! Progressive discipline: warning counter, escalation and per-member serialization.
//!
//! A warning flow holds the member's [`WarningLocks`] guard from the increment until
//! the history row is written, so two moderators warning the same member at once
//! escalate one step each instead of racing on the role assignment.

use std::{collections::HashMap, sync::Arc};

use sea_orm::DatabaseConnection;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::server::{
    data::{settings::SettingsRepository, warning::WarningRepository},
    error::AppError,
    model::warning::{CreateWarningLogParam, WarningAction, WarningLogEntry, WarningOutcome},
};

/// Registry of one async mutex per (guild, member).
#[derive(Default)]
pub struct WarningLocks {
    locks: Mutex<HashMap<(u64, u64), Arc<Mutex<()>>>>,
}

impl WarningLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to a member's warning flow.
    ///
    /// Entries nobody holds or waits on are dropped first, so the registry only keeps
    /// members with a flow in progress.
    pub async fn acquire(&self, guild_id: u64, user_id: u64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry((guild_id, user_id))
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

/// Channels and roles discipline needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisciplineConfig {
    pub warnings_channel_id: u64,
    pub adv1_role_id: u64,
    pub adv2_role_id: u64,
}

impl DisciplineConfig {
    /// Role granted for an action, `None` for a ban.
    pub fn role_for(&self, action: WarningAction) -> Option<u64> {
        match action {
            WarningAction::AssignAdv1 => Some(self.adv1_role_id),
            WarningAction::AssignAdv2 => Some(self.adv2_role_id),
            WarningAction::Ban => None,
        }
    }
}

pub struct DisciplineService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DisciplineService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads the warnings channel and both ADV roles.
    ///
    /// # Returns
    /// - `Ok(DisciplineConfig)` - Everything is configured
    /// - `Err(AppError::NotFound)` - Any of the three is missing
    pub async fn require_config(&self, guild_id: u64) -> Result<DisciplineConfig, AppError> {
        let settings = SettingsRepository::new(self.db).get(guild_id).await?;

        let config = settings.and_then(|s| {
            Some(DisciplineConfig {
                warnings_channel_id: s.warnings_channel_id?,
                adv1_role_id: s.adv1_role_id?,
                adv2_role_id: s.adv2_role_id?,
            })
        });

        config.ok_or_else(|| {
            AppError::NotFound(
                "Canal/cargos de advertência não configurados. Rode !setup.".to_string(),
            )
        })
    }

    /// Increments the member's counter and maps the new count to its action.
    ///
    /// Callers must hold the member's [`WarningLocks`] guard.
    pub async fn record_warning(
        &self,
        guild_id: u64,
        user_id: u64,
        reason: &str,
    ) -> Result<WarningOutcome, AppError> {
        let count = WarningRepository::new(self.db)
            .increment(guild_id, user_id, reason)
            .await?;

        Ok(WarningOutcome {
            count,
            action: WarningAction::for_count(count),
        })
    }

    /// Resets the counter once a ban has gone through.
    pub async fn reset_after_ban(&self, guild_id: u64, user_id: u64) -> Result<(), AppError> {
        Ok(WarningRepository::new(self.db).reset(guild_id, user_id).await?)
    }

    pub async fn append_log(
        &self,
        param: CreateWarningLogParam,
    ) -> Result<WarningLogEntry, AppError> {
        Ok(WarningRepository::new(self.db).append_log(param).await?)
    }

    pub async fn warning_count(&self, guild_id: u64, user_id: u64) -> Result<i32, AppError> {
        Ok(WarningRepository::new(self.db)
            .get_count(guild_id, user_id)
            .await?)
    }

    pub async fn history(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Vec<WarningLogEntry>, AppError> {
        Ok(WarningRepository::new(self.db)
            .get_logs(guild_id, user_id)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory, factory::guild_settings::GuildSettingsFactory};

    async fn warn(
        locks: &WarningLocks,
        service: &DisciplineService<'_>,
        reason: &str,
    ) -> Result<WarningOutcome, AppError> {
        let _guard = locks.acquire(1, 2).await;
        let outcome = service.record_warning(1, 2, reason).await?;
        tokio::task::yield_now().await;
        service
            .append_log(CreateWarningLogParam {
                guild_id: 1,
                user_id: 2,
                moderator_id: 9,
                reason: reason.to_string(),
                outcome,
            })
            .await?;
        Ok(outcome)
    }

    /// Tests the escalation ladder.
    ///
    /// Verifies that the reason has no influence and the third warning bans.
    ///
    /// Expected: ADV 1, ADV 2, Ban
    #[tokio::test]
    async fn escalates_one_step_per_warning() -> Result<(), AppError> {
        let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = DisciplineService::new(db);
        let actions = [
            service.record_warning(1, 2, "a").await?.action,
            service.record_warning(1, 2, "completely different").await?.action,
            service.record_warning(1, 2, "").await?.action,
        ];

        assert_eq!(
            actions,
            [
                WarningAction::AssignAdv1,
                WarningAction::AssignAdv2,
                WarningAction::Ban
            ]
        );

        Ok(())
    }

    /// Tests concurrent warnings for the same member.
    ///
    /// Verifies that three interleaved flows under the lock produce each count exactly
    /// once and a single ban.
    ///
    /// Expected: counts 1, 2 and 3 with one Ban
    #[tokio::test]
    async fn concurrent_warnings_escalate_once_per_step() -> Result<(), AppError> {
        let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let locks = WarningLocks::new();
        let service = DisciplineService::new(db);

        let (a, b, c) = tokio::join!(
            warn(&locks, &service, "a"),
            warn(&locks, &service, "b"),
            warn(&locks, &service, "c"),
        );

        let mut counts = vec![a?.count, b?.count, c?.count];
        counts.sort();
        assert_eq!(counts, vec![1, 2, 3]);

        let history = service.history(1, 2).await?;
        let bans = history.iter().filter(|l| l.action == "ban").count();
        assert_eq!(history.len(), 3);
        assert_eq!(bans, 1);

        Ok(())
    }

    /// Tests that a successful ban starts the ladder over.
    ///
    /// Expected: next warning after reset is ADV 1
    #[tokio::test]
    async fn reset_after_ban_restarts_ladder() -> Result<(), AppError> {
        let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        factory::create_member_warning(db, 1, 2, 2).await?;

        let service = DisciplineService::new(db);
        assert_eq!(
            service.record_warning(1, 2, "x").await?.action,
            WarningAction::Ban
        );

        service.reset_after_ban(1, 2).await?;

        assert_eq!(service.warning_count(1, 2).await?, 0);
        assert_eq!(
            service.record_warning(1, 2, "y").await?.action,
            WarningAction::AssignAdv1
        );

        Ok(())
    }

    /// Tests discipline without the ADV roles configured.
    ///
    /// Expected: Err(NotFound)
    #[tokio::test]
    async fn requires_channel_and_both_roles() -> Result<(), AppError> {
        let test = TestBuilder::new().with_discipline_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        GuildSettingsFactory::new(db)
            .guild_id(1)
            .warnings_channel_id(10)
            .build()
            .await?;
        GuildSettingsFactory::new(db)
            .guild_id(2)
            .warnings_channel_id(10)
            .adv_roles(11, 12)
            .build()
            .await?;

        let service = DisciplineService::new(db);

        assert!(matches!(
            service.require_config(1).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.require_config(3).await,
            Err(AppError::NotFound(_))
        ));

        let config = service.require_config(2).await?;
        assert_eq!(config.role_for(WarningAction::AssignAdv1), Some(11));
        assert_eq!(config.role_for(WarningAction::AssignAdv2), Some(12));
        assert_eq!(config.role_for(WarningAction::Ban), None);

        Ok(())
    }

    /// Tests that locks for different members do not block each other.
    ///
    /// Expected: second member's guard is acquired while the first is held
    #[tokio::test]
    async fn locks_are_per_member() {
        let locks = WarningLocks::new();

        let _first = locks.acquire(1, 2).await;
        let second = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            locks.acquire(1, 3),
        )
        .await;

        assert!(second.is_ok());
    }

    /// Tests that released member locks do not accumulate.
    ///
    /// Verifies that entries for finished flows are dropped while a held one survives.
    ///
    /// Expected: only the held member and the newly acquired one remain tracked
    #[tokio::test]
    async fn released_locks_are_dropped() {
        let locks = WarningLocks::new();

        for user_id in 10..20 {
            drop(locks.acquire(1, user_id).await);
        }
        let _held = locks.acquire(1, 2).await;
        assert_eq!(locks.tracked().await, 1);

        let _other = locks.acquire(1, 3).await;
        assert_eq!(locks.tracked().await, 2);
    }
}
