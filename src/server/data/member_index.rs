//! Member lookup index repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, TransactionTrait,
};

use crate::server::model::member_index::MemberIndexEntry;

pub struct MemberIndexRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MemberIndexRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Maps `assigned_id` to `user_id`, replacing any prior mapping for either side.
    ///
    /// # Returns
    /// - `Ok(MemberIndexEntry)` - The stored mapping
    /// - `Err(DbErr)` - Database error
    pub async fn upsert(
        &self,
        guild_id: u64,
        assigned_id: &str,
        user_id: u64,
    ) -> Result<MemberIndexEntry, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::MemberIndex::delete_many()
            .filter(entity::member_index::Column::GuildId.eq(guild_id.to_string()))
            .filter(
                Condition::any()
                    .add(entity::member_index::Column::AssignedId.eq(assigned_id))
                    .add(entity::member_index::Column::UserId.eq(user_id.to_string())),
            )
            .exec(&txn)
            .await?;

        let entity = entity::member_index::ActiveModel {
            guild_id: ActiveValue::Set(guild_id.to_string()),
            assigned_id: ActiveValue::Set(assigned_id.to_string()),
            user_id: ActiveValue::Set(user_id.to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        MemberIndexEntry::from_entity(entity)
    }

    pub async fn find_by_assigned_id(
        &self,
        guild_id: u64,
        assigned_id: &str,
    ) -> Result<Option<MemberIndexEntry>, DbErr> {
        entity::prelude::MemberIndex::find()
            .filter(entity::member_index::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::member_index::Column::AssignedId.eq(assigned_id))
            .one(self.db)
            .await?
            .map(MemberIndexEntry::from_entity)
            .transpose()
    }

    /// Removes the mapping for a member who left the guild.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of entries removed (0 or 1)
    pub async fn remove_user(&self, guild_id: u64, user_id: u64) -> Result<u64, DbErr> {
        let result = entity::prelude::MemberIndex::delete_many()
            .filter(entity::member_index::Column::GuildId.eq(guild_id.to_string()))
            .filter(entity::member_index::Column::UserId.eq(user_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
