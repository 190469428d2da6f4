//! Action type and action factories.

use crate::factory::helpers::{next_id, next_snowflake};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for action types. Defaults to 1 to 4 players sharing R$ 1.000,00.
pub struct ActionTypeFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: u64,
    name: String,
    min_players: i32,
    max_players: i32,
    total_value_cents: i64,
}

impl<'a> ActionTypeFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, guild_id: u64) -> Self {
        Self {
            db,
            guild_id,
            name: format!("Ação {}", next_id()),
            min_players: 1,
            max_players: 4,
            total_value_cents: 100_000,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn players(mut self, min: i32, max: i32) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }

    pub fn value_cents(mut self, cents: i64) -> Self {
        self.total_value_cents = cents;
        self
    }

    pub async fn build(self) -> Result<entity::action_type::Model, DbErr> {
        entity::action_type::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id.to_string()),
            name: ActiveValue::Set(self.name),
            min_players: ActiveValue::Set(self.min_players),
            max_players: ActiveValue::Set(self.max_players),
            total_value_cents: ActiveValue::Set(self.total_value_cents),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Factory for actions copied from a type.
///
/// Defaults to an unfinished action with registrations closed and no message.
pub struct ActionFactory<'a> {
    db: &'a DatabaseConnection,
    action_type: entity::action_type::Model,
    creator_id: u64,
    channel_id: u64,
    registrations_open: bool,
    message_id: Option<u64>,
    finished: bool,
}

impl<'a> ActionFactory<'a> {
    pub fn new(db: &'a DatabaseConnection, action_type: entity::action_type::Model) -> Self {
        Self {
            db,
            action_type,
            creator_id: next_snowflake(),
            channel_id: next_snowflake(),
            registrations_open: false,
            message_id: None,
            finished: false,
        }
    }

    pub fn creator_id(mut self, creator_id: u64) -> Self {
        self.creator_id = creator_id;
        self
    }

    pub fn registrations_open(mut self) -> Self {
        self.registrations_open = true;
        self
    }

    pub fn message_id(mut self, message_id: u64) -> Self {
        self.message_id = Some(message_id);
        self
    }

    pub fn finished(mut self) -> Self {
        self.finished = true;
        self
    }

    pub async fn build(self) -> Result<entity::action::Model, DbErr> {
        let now = Utc::now();
        let (status, result, closed_at) = if self.finished {
            ("finished", Some("defeat".to_string()), Some(now))
        } else {
            ("open", None, None)
        };

        entity::action::ActiveModel {
            guild_id: ActiveValue::Set(self.action_type.guild_id),
            type_id: ActiveValue::Set(self.action_type.id),
            type_name: ActiveValue::Set(self.action_type.name),
            max_players: ActiveValue::Set(self.action_type.max_players),
            total_value_cents: ActiveValue::Set(self.action_type.total_value_cents),
            creator_id: ActiveValue::Set(self.creator_id.to_string()),
            status: ActiveValue::Set(status.to_string()),
            registrations_open: ActiveValue::Set(self.registrations_open),
            result: ActiveValue::Set(result),
            channel_id: ActiveValue::Set(self.channel_id.to_string()),
            message_id: ActiveValue::Set(self.message_id.map(|id| id.to_string())),
            created_at: ActiveValue::Set(now),
            closed_at: ActiveValue::Set(closed_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default action type for the guild.
pub async fn create_action_type(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::action_type::Model, DbErr> {
    ActionTypeFactory::new(db, guild_id).build().await
}

/// Creates an unfinished action from a fresh default type.
pub async fn create_action(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<entity::action::Model, DbErr> {
    let action_type = create_action_type(db, guild_id).await?;
    ActionFactory::new(db, action_type).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn action_copies_its_type() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_action_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let action_type = ActionTypeFactory::new(db, 1)
            .name("Banco")
            .players(2, 6)
            .build()
            .await?;
        let action = ActionFactory::new(db, action_type.clone()).build().await?;

        assert_eq!(action.type_id, action_type.id);
        assert_eq!(action.type_name, "Banco");
        assert_eq!(action.max_players, 6);
        assert_eq!(action.status, "open");
        assert!(!action.registrations_open);

        Ok(())
    }
}
