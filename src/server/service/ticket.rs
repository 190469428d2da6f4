//! Support tickets: open limits and the claim/close/reopen lifecycle.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::ticket::{TicketRepository, TicketSettingsUpdate},
    error::AppError,
    model::ticket::{CreateTicketParam, Ticket, TicketSettings, TicketStatus},
};

/// Member pressing a ticket button.
#[derive(Debug, Clone)]
pub struct TicketActor {
    pub user_id: u64,
    pub is_admin: bool,
    pub role_ids: Vec<u64>,
}

impl TicketActor {
    pub fn is_staff(&self, settings: &TicketSettings) -> bool {
        self.is_admin
            || settings
                .staff_role_id
                .is_some_and(|role| self.role_ids.contains(&role))
    }
}

fn staff_only() -> AppError {
    AppError::Permission("Apenas a equipe pode fazer isso.".to_string())
}

pub struct TicketService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn settings(&self, guild_id: u64) -> Result<TicketSettings, AppError> {
        Ok(TicketRepository::new(self.db).get_settings(guild_id).await?)
    }

    /// Applies one wizard change. The open limit must be at least one.
    pub async fn update_settings(
        &self,
        guild_id: u64,
        update: TicketSettingsUpdate,
    ) -> Result<TicketSettings, AppError> {
        if let TicketSettingsUpdate::MaxOpenPerUser(max) = update {
            if max < 1 {
                return Err(AppError::Validation(
                    "O limite de tickets por membro deve ser pelo menos 1.".to_string(),
                ));
            }
        }

        Ok(TicketRepository::new(self.db)
            .update_settings(guild_id, update)
            .await?)
    }

    /// Checks that a member may open another ticket.
    ///
    /// # Returns
    /// - `Ok(TicketSettings)` - Settings to create the channel with
    /// - `Err(AppError::NotFound)` - No ticket category configured
    /// - `Err(AppError::Validation)` - Member is at the open limit
    pub async fn check_can_open(
        &self,
        guild_id: u64,
        opener_id: u64,
    ) -> Result<TicketSettings, AppError> {
        let repo = TicketRepository::new(self.db);
        let settings = repo.get_settings(guild_id).await?;

        if settings.category_id.is_none() {
            return Err(AppError::NotFound(
                "Categoria de tickets não configurada. Rode !setup.".to_string(),
            ));
        }

        let open = repo.count_open_by_opener(guild_id, opener_id).await?;
        if open >= settings.max_open_per_user.max(1) as u64 {
            return Err(AppError::Validation(format!(
                "Você já possui {} ticket(s) aberto(s).",
                open
            )));
        }

        Ok(settings)
    }

    pub async fn record_opened(
        &self,
        guild_id: u64,
        channel_id: u64,
        opener_id: u64,
    ) -> Result<Ticket, AppError> {
        Ok(TicketRepository::new(self.db)
            .create(CreateTicketParam {
                guild_id,
                channel_id,
                opener_id,
            })
            .await?)
    }

    pub async fn set_control_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Ticket, AppError> {
        Ok(TicketRepository::new(self.db)
            .set_control_message(channel_id, message_id)
            .await?)
    }

    /// Gets the ticket backed by a channel or fails with NotFound.
    pub async fn require(&self, channel_id: u64) -> Result<Ticket, AppError> {
        TicketRepository::new(self.db)
            .get_by_channel(channel_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Este canal não é um ticket.".to_string()))
    }

    pub async fn claim(&self, channel_id: u64, actor: &TicketActor) -> Result<Ticket, AppError> {
        let ticket = self.require(channel_id).await?;
        let settings = self.settings(ticket.guild_id).await?;

        if !actor.is_staff(&settings) {
            return Err(staff_only());
        }
        if ticket.status == TicketStatus::Closed {
            return Err(AppError::Validation("Este ticket está fechado.".to_string()));
        }
        if let Some(claimed_by) = ticket.claimed_by {
            return Err(AppError::Validation(format!(
                "Ticket já assumido por <@{}>.",
                claimed_by
            )));
        }

        Ok(TicketRepository::new(self.db)
            .set_claimed(channel_id, actor.user_id)
            .await?)
    }

    /// Closes a ticket. The opener may close their own ticket.
    pub async fn close(&self, channel_id: u64, actor: &TicketActor) -> Result<Ticket, AppError> {
        let ticket = self.require(channel_id).await?;
        let settings = self.settings(ticket.guild_id).await?;

        if ticket.opener_id != actor.user_id && !actor.is_staff(&settings) {
            return Err(AppError::Permission(
                "Apenas quem abriu o ticket ou a equipe pode fechá-lo.".to_string(),
            ));
        }
        if ticket.status == TicketStatus::Closed {
            return Err(AppError::Validation("Este ticket já está fechado.".to_string()));
        }

        Ok(TicketRepository::new(self.db)
            .set_status(channel_id, TicketStatus::Closed)
            .await?)
    }

    pub async fn reopen(&self, channel_id: u64, actor: &TicketActor) -> Result<Ticket, AppError> {
        let ticket = self.require(channel_id).await?;
        let settings = self.settings(ticket.guild_id).await?;

        if !actor.is_staff(&settings) {
            return Err(staff_only());
        }
        if ticket.status == TicketStatus::Open {
            return Err(AppError::Validation("Este ticket já está aberto.".to_string()));
        }

        Ok(TicketRepository::new(self.db)
            .set_status(channel_id, TicketStatus::Open)
            .await?)
    }

    pub async fn get_open(&self) -> Result<Vec<Ticket>, AppError> {
        Ok(TicketRepository::new(self.db).get_open().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{builder::TestBuilder, factory, factory::ticket::TicketFactory};

    const STAFF_ROLE: u64 = 500;

    fn actor(user_id: u64, role_ids: Vec<u64>) -> TicketActor {
        TicketActor {
            user_id,
            is_admin: false,
            role_ids,
        }
    }

    async fn configure(service: &TicketService<'_>, guild_id: u64) -> Result<(), AppError> {
        service
            .update_settings(guild_id, TicketSettingsUpdate::Category(Some(77)))
            .await?;
        service
            .update_settings(guild_id, TicketSettingsUpdate::StaffRole(Some(STAFF_ROLE)))
            .await?;
        Ok(())
    }

    /// Tests opening without a configured category.
    ///
    /// Expected: Err(NotFound)
    #[tokio::test]
    async fn opening_requires_category() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let result = TicketService::new(db).check_can_open(1, 2).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }

    /// Tests the per-member open limit.
    ///
    /// Verifies that closed tickets do not count toward the limit.
    ///
    /// Expected: Err(Validation) with one open ticket, Ok once it is closed
    #[tokio::test]
    async fn enforces_open_limit() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = TicketService::new(db);
        configure(&service, 1).await?;

        let ticket = factory::create_ticket(db, 1, 2).await?;
        assert!(matches!(
            service.check_can_open(1, 2).await,
            Err(AppError::Validation(_))
        ));

        let channel_id: u64 = ticket.channel_id.parse().unwrap();
        service.close(channel_id, &actor(2, vec![])).await?;

        assert!(service.check_can_open(1, 2).await.is_ok());

        Ok(())
    }

    /// Tests a zero open limit from the wizard.
    ///
    /// Expected: Err(Validation)
    #[tokio::test]
    async fn rejects_zero_limit() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let result = TicketService::new(db)
            .update_settings(1, TicketSettingsUpdate::MaxOpenPerUser(0))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));

        Ok(())
    }

    /// Tests claim authorization and the single-claim rule.
    ///
    /// Expected: opener denied, staff succeeds, second claim rejected
    #[tokio::test]
    async fn claim_is_staff_only_and_single() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = TicketService::new(db);
        configure(&service, 1).await?;
        TicketFactory::new(db, 1, 2).channel_id(300).build().await?;

        assert!(matches!(
            service.claim(300, &actor(2, vec![])).await,
            Err(AppError::Permission(_))
        ));

        let claimed = service.claim(300, &actor(3, vec![STAFF_ROLE])).await?;
        assert_eq!(claimed.claimed_by, Some(3));

        assert!(matches!(
            service.claim(300, &actor(4, vec![STAFF_ROLE])).await,
            Err(AppError::Validation(_))
        ));

        Ok(())
    }

    /// Tests close and reopen authorization.
    ///
    /// Verifies that an unrelated member cannot close and the opener cannot reopen.
    ///
    /// Expected: status toggles only for authorized actors
    #[tokio::test]
    async fn close_and_reopen_authorization() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = TicketService::new(db);
        configure(&service, 1).await?;
        TicketFactory::new(db, 1, 2).channel_id(300).build().await?;

        assert!(matches!(
            service.close(300, &actor(9, vec![])).await,
            Err(AppError::Permission(_))
        ));

        let closed = service.close(300, &actor(2, vec![])).await?;
        assert_eq!(closed.status, TicketStatus::Closed);
        assert!(closed.closed_at.is_some());

        assert!(matches!(
            service.reopen(300, &actor(2, vec![])).await,
            Err(AppError::Permission(_))
        ));

        let admin = TicketActor {
            user_id: 8,
            is_admin: true,
            role_ids: vec![],
        };
        let reopened = service.reopen(300, &admin).await?;
        assert_eq!(reopened.status, TicketStatus::Open);
        assert!(reopened.closed_at.is_none());

        Ok(())
    }

    /// Tests button presses in a channel that is not a ticket.
    ///
    /// Expected: Err(NotFound)
    #[tokio::test]
    async fn unknown_channel_is_not_found() -> Result<(), AppError> {
        let test = TestBuilder::new().with_ticket_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let result = TicketService::new(db).close(999, &actor(1, vec![])).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }
}
