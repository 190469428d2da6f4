//! Action types, running actions, their participants and per-member stats.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::parse::{parse_optional_snowflake, parse_snowflake};

/// Template managers create actions from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionType {
    pub id: i32,
    pub guild_id: u64,
    pub name: String,
    pub min_players: i32,
    pub max_players: i32,
    pub total_value_cents: i64,
}

impl ActionType {
    pub fn from_entity(entity: entity::action_type::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            name: entity.name,
            min_players: entity.min_players,
            max_players: entity.max_players,
            total_value_cents: entity.total_value_cents,
        })
    }
}

/// Validated fields of an action type, for create and edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTypeParam {
    pub name: String,
    pub min_players: i32,
    pub max_players: i32,
    pub total_value_cents: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionSettings {
    /// Where new actions are posted; the invoking channel when unset.
    pub action_channel_id: Option<u64>,
    pub ranking_channel_id: Option<u64>,
    pub ranking_message_id: Option<u64>,
    /// Members with one of these roles manage actions without being administrators.
    pub responsible_role_ids: Vec<u64>,
}

impl ActionSettings {
    pub fn from_entities(
        settings: Option<entity::action_settings::Model>,
        roles: Vec<entity::action_responsible_role::Model>,
    ) -> Result<Self, DbErr> {
        let responsible_role_ids = roles
            .iter()
            .map(|r| parse_snowflake(&r.role_id, "role_id"))
            .collect::<Result<Vec<_>, _>>()?;

        let Some(settings) = settings else {
            return Ok(Self {
                responsible_role_ids,
                ..Default::default()
            });
        };

        Ok(Self {
            action_channel_id: parse_optional_snowflake(
                settings.action_channel_id.as_deref(),
                "action_channel_id",
            )?,
            ranking_channel_id: parse_optional_snowflake(
                settings.ranking_channel_id.as_deref(),
                "ranking_channel_id",
            )?,
            ranking_message_id: parse_optional_snowflake(
                settings.ranking_message_id.as_deref(),
                "ranking_message_id",
            )?,
            responsible_role_ids,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Open,
    Finished,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Finished => "finished",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DbErr> {
        match value {
            "open" => Ok(Self::Open),
            "finished" => Ok(Self::Finished),
            other => Err(DbErr::Custom(format!("Unknown action status: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Victory,
    Defeat,
}

impl ActionResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Victory => "victory",
            Self::Defeat => "defeat",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DbErr> {
        match value {
            "victory" => Ok(Self::Victory),
            "defeat" => Ok(Self::Defeat),
            other => Err(DbErr::Custom(format!("Unknown action result: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub id: i32,
    pub guild_id: u64,
    pub type_id: i32,
    pub type_name: String,
    pub max_players: i32,
    pub total_value_cents: i64,
    pub creator_id: u64,
    pub status: ActionStatus,
    pub registrations_open: bool,
    pub result: Option<ActionResult>,
    pub channel_id: u64,
    pub message_id: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Action {
    pub fn from_entity(entity: entity::action::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_snowflake(&entity.guild_id, "guild_id")?,
            type_id: entity.type_id,
            type_name: entity.type_name,
            max_players: entity.max_players,
            total_value_cents: entity.total_value_cents,
            creator_id: parse_snowflake(&entity.creator_id, "creator_id")?,
            status: ActionStatus::parse(&entity.status)?,
            registrations_open: entity.registrations_open,
            result: entity.result.as_deref().map(ActionResult::parse).transpose()?,
            channel_id: parse_snowflake(&entity.channel_id, "channel_id")?,
            message_id: parse_optional_snowflake(entity.message_id.as_deref(), "message_id")?,
            created_at: entity.created_at,
            closed_at: entity.closed_at,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.status == ActionStatus::Finished
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub user_id: u64,
    pub joined_at: DateTime<Utc>,
    pub removed_by: Option<u64>,
}

impl Participant {
    pub fn from_entity(entity: entity::action_participant::Model) -> Result<Self, DbErr> {
        Ok(Self {
            user_id: parse_snowflake(&entity.user_id, "user_id")?,
            joined_at: entity.joined_at,
            removed_by: parse_optional_snowflake(entity.removed_by.as_deref(), "removed_by")?,
        })
    }
}

/// An action with its active and removed participants, earliest joiner first.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRoster {
    pub action: Action,
    pub participants: Vec<Participant>,
    pub removed: Vec<Participant>,
}

impl ActionRoster {
    pub fn new(action: Action, all: Vec<Participant>) -> Self {
        let (removed, participants) = all.into_iter().partition(|p| p.removed_by.is_some());

        Self {
            action,
            participants,
            removed,
        }
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.action.max_players.max(0) as usize
    }

    pub fn is_participant(&self, user_id: u64) -> bool {
        self.participants.iter().any(|p| p.user_id == user_id)
    }
}

/// A member's lifetime action record, used for the ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionStat {
    pub user_id: u64,
    pub participations: i32,
    pub total_earned_cents: i64,
}

impl ActionStat {
    pub fn from_entity(entity: entity::action_stat::Model) -> Result<Self, DbErr> {
        Ok(Self {
            user_id: parse_snowflake(&entity.user_id, "user_id")?,
            participations: entity.participations,
            total_earned_cents: entity.total_earned_cents,
        })
    }
}

/// Parameters for posting a new action from a type.
#[derive(Debug, Clone)]
pub struct CreateActionParam {
    pub guild_id: u64,
    pub creator_id: u64,
    pub channel_id: u64,
    pub action_type: ActionType,
}
