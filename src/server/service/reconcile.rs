//! Startup reconciliation of in-flight workflow state.
//!
//! Component custom ids carry record ids, so after a restart the bot only needs to make
//! sure every pending review message, open ticket control message and unfinished action
//! still exists and carries current components. The service decides what to do per record; the ready
//! handler performs the Discord calls and logs failures per record.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        registration::RegistrationRepository, settings::SettingsRepository,
        ticket::TicketRepository,
    },
    error::AppError,
    model::{action::ActionRoster, registration::Registration, ticket::Ticket},
    service::action::ActionService,
};

/// What to do with a pending registration's review message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
    /// Edit the stored message, posting to `fallback_channel_id` if it is gone.
    Edit {
        channel_id: u64,
        message_id: u64,
        fallback_channel_id: u64,
    },
    /// No stored message; post a fresh one.
    Post { channel_id: u64 },
    /// Nowhere to post.
    Skip,
}

impl ReviewAction {
    /// Picks the action for a record given the guild's current approval channel.
    ///
    /// A fresh message goes to the configured approval channel when there is one, else
    /// back to the channel the record was first posted in.
    pub fn for_registration(registration: &Registration, approval_channel_id: Option<u64>) -> Self {
        let fallback = approval_channel_id.or(registration.approval_channel_id);

        match (
            registration.approval_channel_id,
            registration.approval_message_id,
            fallback,
        ) {
            (Some(channel_id), Some(message_id), Some(fallback_channel_id)) => Self::Edit {
                channel_id,
                message_id,
                fallback_channel_id,
            },
            (_, _, Some(channel_id)) => Self::Post { channel_id },
            _ => Self::Skip,
        }
    }
}

/// Pending registrations, open tickets and unfinished actions to bring up to date.
#[derive(Debug, Clone, Default)]
pub struct ReconcilePlan {
    pub registrations: Vec<(Registration, ReviewAction)>,
    pub tickets: Vec<Ticket>,
    pub actions: Vec<ActionRoster>,
}

pub struct ReconcileService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReconcileService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn plan(&self) -> Result<ReconcilePlan, AppError> {
        let settings_repo = SettingsRepository::new(self.db);
        let pending = RegistrationRepository::new(self.db).get_pending().await?;

        let mut registrations = Vec::with_capacity(pending.len());
        for registration in pending {
            let approval_channel_id = settings_repo
                .get(registration.guild_id)
                .await?
                .and_then(|s| s.approval_channel_id);
            let action = ReviewAction::for_registration(&registration, approval_channel_id);
            registrations.push((registration, action));
        }

        let tickets = TicketRepository::new(self.db).get_open().await?;
        let actions = ActionService::new(self.db).get_unfinished().await?;

        Ok(ReconcilePlan {
            registrations,
            tickets,
            actions,
        })
    }

    /// Stores the location of a review message posted during reconciliation.
    pub async fn record_reposted(
        &self,
        registration_id: i32,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Registration, AppError> {
        Ok(RegistrationRepository::new(self.db)
            .set_approval_message(registration_id, channel_id, message_id)
            .await?)
    }
}
