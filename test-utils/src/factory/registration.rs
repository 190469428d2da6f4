//! Registration factory for creating test registration records.

use crate::factory::helpers::{next_id, next_snowflake};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating registration records with customizable fields.
///
/// Defaults to a pending registration with a unique display name and assigned id.
///
/// # Example
///
/// ```rust,ignore
/// let registration = RegistrationFactory::new(&db, guild_id)
///     .assigned_id("4242")
///     .status("approved")
///     .build()
///     .await?;
/// ```
pub struct RegistrationFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    user_id: u64,
    display_name: String,
    assigned_id: String,
    recruiter_id: String,
    status: String,
    approval_channel_id: Option<u64>,
    approval_message_id: Option<u64>,
    created_at: DateTime<Utc>,
}

impl<'a> RegistrationFactory<'a> {
    /// Creates a new factory for a pending registration in `guild_id`.
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id,
            user_id: next_snowflake(),
            display_name: format!("Member {}", id),
            assigned_id: (1000 + id).to_string(),
            recruiter_id: "1".to_string(),
            status: "pending".to_string(),
            approval_channel_id: None,
            approval_message_id: None,
            created_at: Utc::now(),
        }
    }

    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn assigned_id(mut self, assigned_id: impl Into<String>) -> Self {
        self.assigned_id = assigned_id.into();
        self
    }

    /// Sets the raw status string (`pending`, `approved` or `rejected`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the review message location.
    pub fn approval_message(mut self, channel_id: u64, message_id: u64) -> Self {
        self.approval_channel_id = Some(channel_id);
        self.approval_message_id = Some(message_id);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the registration record.
    ///
    /// Terminal statuses get `decided_at` set to the creation time.
    pub async fn build(self) -> Result<entity::registration::Model, DbErr> {
        let decided_at = (self.status != "pending").then_some(self.created_at);

        entity::registration::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            user_id: ActiveValue::Set(self.user_id.to_string()),
            display_name: ActiveValue::Set(self.display_name),
            assigned_id: ActiveValue::Set(self.assigned_id),
            recruiter_id: ActiveValue::Set(self.recruiter_id),
            status: ActiveValue::Set(self.status),
            approval_channel_id: ActiveValue::Set(self.approval_channel_id.map(|id| id.to_string())),
            approval_message_id: ActiveValue::Set(self.approval_message_id.map(|id| id.to_string())),
            moderator_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            decided_at: ActiveValue::Set(decided_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending registration with default values.
pub async fn create_pending_registration(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::registration::Model, DbErr> {
    RegistrationFactory::new(db, guild_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_pending_registration() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(Registration)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let registration = create_pending_registration(db, 1).await?;

        assert_eq!(registration.status, "pending");
        assert!(registration.decided_at.is_none());
        assert!(registration.assigned_id.parse::<u64>().is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn terminal_status_sets_decided_at() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(Registration)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let registration = RegistrationFactory::new(db, 1)
            .status("approved")
            .build()
            .await?;

        assert!(registration.decided_at.is_some());

        Ok(())
    }
}
