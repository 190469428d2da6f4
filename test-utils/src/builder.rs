use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Add entity tables with `with_table()` or one of the grouped helpers, then call
/// `build()` to create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{GuildSettings, Registration};
///
/// let test = TestBuilder::new()
///     .with_table(GuildSettings)
///     .with_table(Registration)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Tables with foreign keys should be added after the tables they reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity to create the table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the tables touched by the registration workflow.
    ///
    /// - GuildSettings
    /// - Registration
    /// - MemberIndex
    pub fn with_registration_tables(self) -> Self {
        self.with_table(GuildSettings)
            .with_table(Registration)
            .with_table(MemberIndex)
    }

    /// Adds the tables touched by progressive discipline.
    ///
    /// - GuildSettings
    /// - MemberWarning
    /// - WarningLog
    pub fn with_discipline_tables(self) -> Self {
        self.with_table(GuildSettings)
            .with_table(MemberWarning)
            .with_table(WarningLog)
    }

    /// Adds the command permission table and its role children.
    pub fn with_permission_tables(self) -> Self {
        self.with_table(CommandPermission)
            .with_table(CommandPermissionRole)
    }

    /// Adds every voice tracking table.
    ///
    /// - VoiceSettings
    /// - VoiceAllowedRole
    /// - VoiceMonitoredChannel
    /// - VoiceSession
    /// - VoiceTime
    pub fn with_voice_tables(self) -> Self {
        self.with_table(VoiceSettings)
            .with_table(VoiceAllowedRole)
            .with_table(VoiceMonitoredChannel)
            .with_table(VoiceSession)
            .with_table(VoiceTime)
    }

    /// Adds the ticket settings and ticket tables.
    pub fn with_ticket_tables(self) -> Self {
        self.with_table(TicketSettings).with_table(Ticket)
    }

    /// Adds every action table, parents before children.
    ///
    /// - ActionType
    /// - ActionSettings
    /// - ActionResponsibleRole
    /// - Action
    /// - ActionParticipant
    /// - ActionStat
    pub fn with_action_tables(self) -> Self {
        self.with_table(ActionType)
            .with_table(ActionSettings)
            .with_table(ActionResponsibleRole)
            .with_table(Action)
            .with_table(ActionParticipant)
            .with_table(ActionStat)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.create_tables(self.tables).await?;

        Ok(setup)
    }
}
