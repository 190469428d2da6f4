//! Action repository: types, settings, running actions, participants and stats.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait,
};

use crate::server::model::action::{
    Action, ActionResult, ActionRoster, ActionSettings, ActionStat, ActionStatus, ActionType,
    ActionTypeParam, CreateActionParam, Participant,
};

/// A single action settings change written from `!acao_setup`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSettingsUpdate {
    ActionChannel(Option<u64>),
    RankingChannel(Option<u64>),
    RankingMessage(Option<u64>),
}

pub struct ActionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActionRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_settings(&self, guild_id: u64) -> Result<ActionSettings, DbErr> {
        let guild = guild_id.to_string();

        let settings = entity::prelude::ActionSettings::find()
            .filter(entity::action_settings::Column::GuildId.eq(&guild))
            .one(self.db)
            .await?;
        let roles = entity::prelude::ActionResponsibleRole::find()
            .filter(entity::action_responsible_role::Column::GuildId.eq(&guild))
            .order_by_asc(entity::action_responsible_role::Column::Id)
            .all(self.db)
            .await?;

        ActionSettings::from_entities(settings, roles)
    }

    /// Applies one settings change, creating the row if needed.
    pub async fn update_settings(
        &self,
        guild_id: u64,
        update: ActionSettingsUpdate,
    ) -> Result<ActionSettings, DbErr> {
        let existing = entity::prelude::ActionSettings::find()
            .filter(entity::action_settings::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;
        let existing = match existing {
            Some(existing) => existing,
            None => {
                entity::action_settings::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    action_channel_id: ActiveValue::Set(None),
                    ranking_channel_id: ActiveValue::Set(None),
                    ranking_message_id: ActiveValue::Set(None),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        let text = |id: Option<u64>| id.map(|id| id.to_string());
        let mut active: entity::action_settings::ActiveModel = existing.into();
        match update {
            ActionSettingsUpdate::ActionChannel(id) => {
                active.action_channel_id = ActiveValue::Set(text(id))
            }
            ActionSettingsUpdate::RankingChannel(id) => {
                // A new channel means a new ranking message.
                active.ranking_channel_id = ActiveValue::Set(text(id));
                active.ranking_message_id = ActiveValue::Set(None);
            }
            ActionSettingsUpdate::RankingMessage(id) => {
                active.ranking_message_id = ActiveValue::Set(text(id))
            }
        }
        active.update(self.db).await?;

        self.get_settings(guild_id).await
    }

    /// Replaces the set of roles allowed to manage actions.
    pub async fn set_responsible_roles(&self, guild_id: u64, role_ids: &[u64]) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::ActionResponsibleRole::delete_many()
            .filter(entity::action_responsible_role::Column::GuildId.eq(guild_id.to_string()))
            .exec(&txn)
            .await?;

        for role_id in role_ids {
            entity::action_responsible_role::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                role_id: ActiveValue::Set(role_id.to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await
    }

    pub async fn get_types(&self, guild_id: u64) -> Result<Vec<ActionType>, DbErr> {
        entity::prelude::ActionType::find()
            .filter(entity::action_type::Column::GuildId.eq(guild_id.to_string()))
            .order_by_asc(entity::action_type::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(ActionType::from_entity)
            .collect()
    }

    pub async fn get_type(&self, type_id: i32) -> Result<Option<ActionType>, DbErr> {
        entity::prelude::ActionType::find_by_id(type_id)
            .one(self.db)
            .await?
            .map(ActionType::from_entity)
            .transpose()
    }

    pub async fn create_type(
        &self,
        guild_id: u64,
        param: ActionTypeParam,
    ) -> Result<ActionType, DbErr> {
        let entity = entity::action_type::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            name: ActiveValue::Set(param.name),
            min_players: ActiveValue::Set(param.min_players),
            max_players: ActiveValue::Set(param.max_players),
            total_value_cents: ActiveValue::Set(param.total_value_cents),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        ActionType::from_entity(entity)
    }

    pub async fn update_type(
        &self,
        type_id: i32,
        param: ActionTypeParam,
    ) -> Result<ActionType, DbErr> {
        let existing = entity::prelude::ActionType::find_by_id(type_id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("action type {}", type_id)))?;

        let mut active: entity::action_type::ActiveModel = existing.into();
        active.name = ActiveValue::Set(param.name);
        active.min_players = ActiveValue::Set(param.min_players);
        active.max_players = ActiveValue::Set(param.max_players);
        active.total_value_cents = ActiveValue::Set(param.total_value_cents);

        ActionType::from_entity(active.update(self.db).await?)
    }

    /// Deletes a type. Actions already created from it keep their copy.
    ///
    /// # Returns
    /// - `Ok(true)` - Type deleted
    /// - `Ok(false)` - No such type
    pub async fn delete_type(&self, type_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::ActionType::delete_by_id(type_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn create(&self, param: CreateActionParam) -> Result<Action, DbErr> {
        let entity = entity::action::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            type_id: ActiveValue::Set(param.action_type.id),
            type_name: ActiveValue::Set(param.action_type.name),
            max_players: ActiveValue::Set(param.action_type.max_players),
            total_value_cents: ActiveValue::Set(param.action_type.total_value_cents),
            creator_id: ActiveValue::Set(param.creator_id.to_string()),
            status: ActiveValue::Set(ActionStatus::Open.as_str().to_string()),
            registrations_open: ActiveValue::Set(false),
            result: ActiveValue::Set(None),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            message_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            closed_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Action::from_entity(entity)
    }

    async fn require(&self, action_id: i32) -> Result<entity::action::Model, DbErr> {
        entity::prelude::Action::find_by_id(action_id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("action {}", action_id)))
    }

    pub async fn get(&self, action_id: i32) -> Result<Option<Action>, DbErr> {
        entity::prelude::Action::find_by_id(action_id)
            .one(self.db)
            .await?
            .map(Action::from_entity)
            .transpose()
    }

    /// Gets an action with its participants, earliest joiner first.
    pub async fn get_roster(&self, action_id: i32) -> Result<Option<ActionRoster>, DbErr> {
        let Some(action) = self.get(action_id).await? else {
            return Ok(None);
        };

        let participants = entity::prelude::ActionParticipant::find()
            .filter(entity::action_participant::Column::ActionId.eq(action_id))
            .order_by_asc(entity::action_participant::Column::JoinedAt)
            .order_by_asc(entity::action_participant::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Participant::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(ActionRoster::new(action, participants)))
    }

    pub async fn set_message(&self, action_id: i32, message_id: u64) -> Result<Action, DbErr> {
        let mut active: entity::action::ActiveModel = self.require(action_id).await?.into();
        active.message_id = ActiveValue::Set(Some(message_id.to_string()));

        Action::from_entity(active.update(self.db).await?)
    }

    pub async fn set_registrations_open(
        &self,
        action_id: i32,
        open: bool,
    ) -> Result<Action, DbErr> {
        let mut active: entity::action::ActiveModel = self.require(action_id).await?.into();
        active.registrations_open = ActiveValue::Set(open);

        Action::from_entity(active.update(self.db).await?)
    }

    pub async fn add_participant(&self, action_id: i32, user_id: u64) -> Result<Participant, DbErr> {
        let entity = entity::action_participant::ActiveModel {
            action_id: ActiveValue::Set(action_id),
            user_id: ActiveValue::Set(user_id.to_string()),
            joined_at: ActiveValue::Set(Utc::now()),
            removed_by: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Participant::from_entity(entity)
    }

    /// Deletes a member's participation row.
    pub async fn delete_participant(&self, action_id: i32, user_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::ActionParticipant::delete_many()
            .filter(entity::action_participant::Column::ActionId.eq(action_id))
            .filter(entity::action_participant::Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks a participant removed by `removed_by`, or restores them with `None`.
    pub async fn set_removed(
        &self,
        action_id: i32,
        user_id: u64,
        removed_by: Option<u64>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::ActionParticipant::update_many()
            .col_expr(
                entity::action_participant::Column::RemovedBy,
                Expr::value(removed_by.map(|id| id.to_string())),
            )
            .filter(entity::action_participant::Column::ActionId.eq(action_id))
            .filter(entity::action_participant::Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Finishes an open action and credits every listed member in one transaction.
    ///
    /// # Returns
    /// - `Ok(Some(Action))` - Action finished by this call
    /// - `Ok(None)` - Action was already finished; nothing credited
    pub async fn finish(
        &self,
        action_id: i32,
        result: ActionResult,
        credits: &[(u64, i64)],
    ) -> Result<Option<Action>, DbErr> {
        let txn = self.db.begin().await?;

        let updated = entity::prelude::Action::update_many()
            .col_expr(
                entity::action::Column::Status,
                Expr::value(ActionStatus::Finished.as_str()),
            )
            .col_expr(entity::action::Column::Result, Expr::value(result.as_str()))
            .col_expr(entity::action::Column::RegistrationsOpen, Expr::value(false))
            .col_expr(entity::action::Column::ClosedAt, Expr::value(Utc::now()))
            .filter(entity::action::Column::Id.eq(action_id))
            .filter(entity::action::Column::Status.eq(ActionStatus::Open.as_str()))
            .exec(&txn)
            .await?;

        // Another manager finished it first
        if updated.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(None);
        }

        let action = entity::prelude::Action::find_by_id(action_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("action {}", action_id)))?;

        for (user_id, earned) in credits {
            credit(&txn, &action.guild_id, *user_id, *earned).await?;
        }

        txn.commit().await?;

        Action::from_entity(action).map(Some)
    }

    /// Deletes an action and its participants.
    pub async fn delete(&self, action_id: i32) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::ActionParticipant::delete_many()
            .filter(entity::action_participant::Column::ActionId.eq(action_id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::Action::delete_by_id(action_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets every action not yet finished, across all guilds.
    pub async fn get_unfinished(&self) -> Result<Vec<Action>, DbErr> {
        entity::prelude::Action::find()
            .filter(entity::action::Column::Status.eq(ActionStatus::Open.as_str()))
            .order_by_asc(entity::action::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Action::from_entity)
            .collect()
    }

    /// Deletes every action of the guild and zeroes its stats, keeping types and settings.
    ///
    /// # Returns
    /// - `Ok(Vec<Action>)` - The deleted actions, so their messages can be removed
    pub async fn reset(&self, guild_id: u64) -> Result<Vec<Action>, DbErr> {
        let guild = guild_id.to_string();
        let txn = self.db.begin().await?;

        let actions = entity::prelude::Action::find()
            .filter(entity::action::Column::GuildId.eq(&guild))
            .all(&txn)
            .await?;
        let ids: Vec<i32> = actions.iter().map(|a| a.id).collect();

        entity::prelude::ActionParticipant::delete_many()
            .filter(entity::action_participant::Column::ActionId.is_in(ids))
            .exec(&txn)
            .await?;
        entity::prelude::Action::delete_many()
            .filter(entity::action::Column::GuildId.eq(&guild))
            .exec(&txn)
            .await?;
        entity::prelude::ActionStat::delete_many()
            .filter(entity::action_stat::Column::GuildId.eq(&guild))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        actions.into_iter().map(Action::from_entity).collect()
    }

    /// Most participations first, then most earned.
    pub async fn ranking(&self, guild_id: u64, limit: u64) -> Result<Vec<ActionStat>, DbErr> {
        entity::prelude::ActionStat::find()
            .filter(entity::action_stat::Column::GuildId.eq(guild_id.to_string()))
            .order_by_desc(entity::action_stat::Column::Participations)
            .order_by_desc(entity::action_stat::Column::TotalEarnedCents)
            .order_by_asc(entity::action_stat::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(ActionStat::from_entity)
            .collect()
    }
}

/// Adds one participation and `earned` centavos to a member's stats.
async fn credit<C: ConnectionTrait>(
    conn: &C,
    guild_id: &str,
    user_id: u64,
    earned: i64,
) -> Result<(), DbErr> {
    let existing = entity::prelude::ActionStat::find()
        .filter(entity::action_stat::Column::GuildId.eq(guild_id))
        .filter(entity::action_stat::Column::UserId.eq(user_id.to_string()))
        .one(conn)
        .await?;

    match existing {
        Some(existing) => {
            let participations = existing.participations.saturating_add(1);
            let total = existing.total_earned_cents.saturating_add(earned);
            let mut active: entity::action_stat::ActiveModel = existing.into();
            active.participations = ActiveValue::Set(participations);
            active.total_earned_cents = ActiveValue::Set(total);
            active.update(conn).await?;
        }
        None => {
            entity::action_stat::ActiveModel {
                guild_id: ActiveValue::Set(guild_id.to_string()),
                user_id: ActiveValue::Set(user_id.to_string()),
                participations: ActiveValue::Set(1),
                total_earned_cents: ActiveValue::Set(earned),
                ..Default::default()
            }
            .insert(conn)
            .await?;
        }
    }

    Ok(())
}
