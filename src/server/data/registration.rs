//! Registration record repository.
//!
//! The only status mutation is `decide`, which is a conditional update on
//! `status = 'pending'` so a record leaves the pending state at most once even when two
//! moderators click at the same time.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::server::model::registration::{
    CreateRegistrationParam, DecideRegistrationParam, Registration, RegistrationStatus,
};

pub struct RegistrationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending registration.
    ///
    /// # Returns
    /// - `Ok(Registration)` - The created record
    /// - `Err(DbErr)` - Database error
    pub async fn create(&self, param: CreateRegistrationParam) -> Result<Registration, DbErr> {
        let entity = entity::registration::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            user_id: ActiveValue::Set(param.user_id.to_string()),
            display_name: ActiveValue::Set(param.display_name),
            assigned_id: ActiveValue::Set(param.assigned_id),
            recruiter_id: ActiveValue::Set(param.recruiter_id),
            status: ActiveValue::Set(RegistrationStatus::Pending.as_str().to_string()),
            approval_channel_id: ActiveValue::Set(None),
            approval_message_id: ActiveValue::Set(None),
            moderator_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            decided_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Registration::from_entity(entity)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Registration>, DbErr> {
        entity::prelude::Registration::find_by_id(id)
            .one(self.db)
            .await?
            .map(Registration::from_entity)
            .transpose()
    }

    /// Stores the location of the review message posted to the approval channel.
    pub async fn set_approval_message(
        &self,
        id: i32,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Registration, DbErr> {
        let existing = entity::prelude::Registration::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("registration {}", id)))?;

        let mut active: entity::registration::ActiveModel = existing.into();
        active.approval_channel_id = ActiveValue::Set(Some(channel_id.to_string()));
        active.approval_message_id = ActiveValue::Set(Some(message_id.to_string()));

        Registration::from_entity(active.update(self.db).await?)
    }

    /// Moves a pending registration to a terminal status.
    ///
    /// # Returns
    /// - `Ok(Some(Registration))` - Record was pending and is now decided
    /// - `Ok(None)` - Record does not exist or was already decided
    /// - `Err(DbErr)` - Database error
    pub async fn decide(
        &self,
        param: DecideRegistrationParam,
    ) -> Result<Option<Registration>, DbErr> {
        let result = entity::prelude::Registration::update_many()
            .col_expr(
                entity::registration::Column::Status,
                Expr::value(param.status.as_str()),
            )
            .col_expr(
                entity::registration::Column::ModeratorId,
                Expr::value(param.moderator_id.to_string()),
            )
            .col_expr(
                entity::registration::Column::DecidedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::registration::Column::Id.eq(param.id))
            .filter(
                entity::registration::Column::Status.eq(RegistrationStatus::Pending.as_str()),
            )
            .exec(self.db)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_by_id(param.id).await
    }

    /// Gets every pending registration across all guilds, oldest first.
    pub async fn get_pending(&self) -> Result<Vec<Registration>, DbErr> {
        entity::prelude::Registration::find()
            .filter(
                entity::registration::Column::Status.eq(RegistrationStatus::Pending.as_str()),
            )
            .order_by_asc(entity::registration::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Registration::from_entity)
            .collect()
    }

    /// Finds the newest approved registration with the given assigned id.
    pub async fn find_latest_approved_by_assigned_id(
        &self,
        guild_id: u64,
        assigned_id: &str,
    ) -> Result<Option<Registration>, DbErr> {
        entity::prelude::Registration::find()
            .filter(entity::registration::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::registration::Column::AssignedId.eq(assigned_id))
            .filter(
                entity::registration::Column::Status.eq(RegistrationStatus::Approved.as_str()),
            )
            .order_by_desc(entity::registration::Column::CreatedAt)
            .order_by_desc(entity::registration::Column::Id)
            .one(self.db)
            .await?
            .map(Registration::from_entity)
            .transpose()
    }

    /// Finds a member's newest registration regardless of status.
    pub async fn find_latest_by_user(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<Registration>, DbErr> {
        entity::prelude::Registration::find()
            .filter(entity::registration::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::registration::Column::UserId.eq(user_id.to_string()))
            .order_by_desc(entity::registration::Column::CreatedAt)
            .order_by_desc(entity::registration::Column::Id)
            .one(self.db)
            .await?
            .map(Registration::from_entity)
            .transpose()
    }
}
