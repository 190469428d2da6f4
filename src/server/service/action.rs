//! Actions: type templates, participant rosters and the prize split.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::action::{ActionRepository, ActionSettingsUpdate},
    error::AppError,
    model::action::{
        Action, ActionResult, ActionRoster, ActionSettings, ActionStat, ActionType,
        ActionTypeParam, CreateActionParam,
    },
};

pub const MAX_TYPE_NAME_LENGTH: usize = 100;

/// Members shown in the ranking embed.
pub const RANKING_LIMIT: u64 = 20;

/// Member pressing an action button or running an action command.
#[derive(Debug, Clone)]
pub struct ActionActor {
    pub user_id: u64,
    pub is_admin: bool,
    pub role_ids: Vec<u64>,
}

impl ActionActor {
    /// Administrators and holders of a responsible role.
    pub fn is_responsible(&self, settings: &ActionSettings) -> bool {
        self.is_admin
            || settings
                .responsible_role_ids
                .iter()
                .any(|role| self.role_ids.contains(role))
    }

    /// Responsible members, plus whoever created the action.
    pub fn can_manage(&self, settings: &ActionSettings, action: &Action) -> bool {
        action.creator_id == self.user_id || self.is_responsible(settings)
    }
}

fn invalid_numbers() -> AppError {
    AppError::Validation("Valores inválidos. Use números válidos.".to_string())
}

/// Parses a value in reais into centavos.
///
/// Accepts an optional `R$` prefix and either `,` or `.` as the decimal separator,
/// with at most two decimal places.
pub fn parse_brl_cents(input: &str) -> Result<i64, AppError> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix("R$").unwrap_or(trimmed).trim();
    let normalized = trimmed.replace(',', ".");

    let (reais, fraction) = match normalized.split_once('.') {
        Some((reais, fraction)) => (reais, fraction),
        None => (normalized.as_str(), ""),
    };

    let digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if reais.is_empty() || !digits(reais) || !digits(fraction) || fraction.len() > 2 {
        return Err(invalid_numbers());
    }

    let reais: i64 = reais.parse().map_err(|_| invalid_numbers())?;
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().map_err(|_| invalid_numbers())? * 10,
        _ => fraction.parse().map_err(|_| invalid_numbers())?,
    };

    reais
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(fraction))
        .ok_or_else(invalid_numbers)
}

/// Validates the action type modal fields.
pub fn validate_type(
    name: &str,
    min_players: &str,
    max_players: &str,
    total_value: &str,
) -> Result<ActionTypeParam, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(
            "O nome da ação é obrigatório.".to_string(),
        ));
    }
    if name.chars().count() > MAX_TYPE_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "O nome da ação pode ter no máximo {} caracteres.",
            MAX_TYPE_NAME_LENGTH
        )));
    }

    let min_players: i32 = min_players.trim().parse().map_err(|_| invalid_numbers())?;
    let max_players: i32 = max_players.trim().parse().map_err(|_| invalid_numbers())?;
    let total_value_cents = parse_brl_cents(total_value)?;

    if min_players < 1 {
        return Err(AppError::Validation(
            "O mínimo de players deve ser pelo menos 1.".to_string(),
        ));
    }
    if max_players < min_players {
        return Err(AppError::Validation(
            "O máximo de players deve ser maior ou igual ao mínimo.".to_string(),
        ));
    }
    if total_value_cents <= 0 {
        return Err(AppError::Validation(
            "O valor total deve ser maior que zero.".to_string(),
        ));
    }

    Ok(ActionTypeParam {
        name: name.to_string(),
        min_players,
        max_players,
        total_value_cents,
    })
}

/// Splits a prize in centavos between `participants`.
///
/// The leftover centavos go one each to the earliest joiners, so the shares always
/// add up to `total`.
pub fn split_prize(total: i64, participants: usize) -> Vec<i64> {
    let Ok(count) = i64::try_from(participants) else {
        return Vec::new();
    };
    if count == 0 {
        return Vec::new();
    }

    let base = total / count;
    let remainder = total % count;

    (0..count)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

pub struct ActionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn settings(&self, guild_id: u64) -> Result<ActionSettings, AppError> {
        Ok(ActionRepository::new(self.db).get_settings(guild_id).await?)
    }

    /// Gets the settings if the actor is responsible for actions in the guild.
    pub async fn require_responsible(
        &self,
        guild_id: u64,
        actor: &ActionActor,
    ) -> Result<ActionSettings, AppError> {
        let settings = self.settings(guild_id).await?;

        if !actor.is_responsible(&settings) {
            return Err(AppError::Permission(
                "Apenas administradores ou responsáveis podem gerenciar ações.".to_string(),
            ));
        }

        Ok(settings)
    }

    pub async fn update_settings(
        &self,
        guild_id: u64,
        update: ActionSettingsUpdate,
    ) -> Result<ActionSettings, AppError> {
        Ok(ActionRepository::new(self.db)
            .update_settings(guild_id, update)
            .await?)
    }

    pub async fn set_responsible_roles(
        &self,
        guild_id: u64,
        role_ids: &[u64],
    ) -> Result<ActionSettings, AppError> {
        let repo = ActionRepository::new(self.db);
        repo.set_responsible_roles(guild_id, role_ids).await?;

        Ok(repo.get_settings(guild_id).await?)
    }

    pub async fn types(&self, guild_id: u64) -> Result<Vec<ActionType>, AppError> {
        Ok(ActionRepository::new(self.db).get_types(guild_id).await?)
    }

    /// Gets a type of this guild or fails with NotFound.
    pub async fn require_type(&self, guild_id: u64, type_id: i32) -> Result<ActionType, AppError> {
        ActionRepository::new(self.db)
            .get_type(type_id)
            .await?
            .filter(|t| t.guild_id == guild_id)
            .ok_or_else(|| AppError::NotFound("Tipo de ação não encontrado.".to_string()))
    }

    pub async fn create_type(
        &self,
        guild_id: u64,
        param: ActionTypeParam,
    ) -> Result<ActionType, AppError> {
        Ok(ActionRepository::new(self.db)
            .create_type(guild_id, param)
            .await?)
    }

    pub async fn update_type(
        &self,
        guild_id: u64,
        type_id: i32,
        param: ActionTypeParam,
    ) -> Result<ActionType, AppError> {
        self.require_type(guild_id, type_id).await?;

        Ok(ActionRepository::new(self.db)
            .update_type(type_id, param)
            .await?)
    }

    pub async fn delete_type(&self, guild_id: u64, type_id: i32) -> Result<ActionType, AppError> {
        let action_type = self.require_type(guild_id, type_id).await?;
        ActionRepository::new(self.db).delete_type(type_id).await?;

        Ok(action_type)
    }

    /// Creates an action from a type, with registrations closed.
    pub async fn create_action(
        &self,
        guild_id: u64,
        creator_id: u64,
        channel_id: u64,
        type_id: i32,
    ) -> Result<Action, AppError> {
        let action_type = self.require_type(guild_id, type_id).await?;

        Ok(ActionRepository::new(self.db)
            .create(CreateActionParam {
                guild_id,
                creator_id,
                channel_id,
                action_type,
            })
            .await?)
    }

    pub async fn set_message(&self, action_id: i32, message_id: u64) -> Result<Action, AppError> {
        Ok(ActionRepository::new(self.db)
            .set_message(action_id, message_id)
            .await?)
    }

    pub async fn roster(&self, action_id: i32) -> Result<ActionRoster, AppError> {
        ActionRepository::new(self.db)
            .get_roster(action_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ação não encontrada.".to_string()))
    }

    async fn require_open(&self, action_id: i32) -> Result<ActionRoster, AppError> {
        let roster = self.roster(action_id).await?;

        if roster.action.is_finished() {
            return Err(AppError::Validation("Esta ação já foi finalizada.".to_string()));
        }

        Ok(roster)
    }

    /// Gets an unfinished action the actor may manage.
    pub async fn manageable(
        &self,
        action_id: i32,
        actor: &ActionActor,
    ) -> Result<ActionRoster, AppError> {
        let roster = self.require_open(action_id).await?;
        let settings = self.settings(roster.action.guild_id).await?;

        if !actor.can_manage(&settings, &roster.action) {
            return Err(AppError::Permission(
                "Apenas quem criou a ação ou um responsável pode fazer isso.".to_string(),
            ));
        }

        Ok(roster)
    }

    pub async fn join(&self, action_id: i32, user_id: u64) -> Result<ActionRoster, AppError> {
        let roster = self.require_open(action_id).await?;

        if !roster.action.registrations_open {
            return Err(AppError::Validation(
                "As inscrições desta ação estão fechadas.".to_string(),
            ));
        }
        if roster.removed.iter().any(|p| p.user_id == user_id) {
            return Err(AppError::Permission(
                "Você foi removido desta ação.".to_string(),
            ));
        }
        if roster.is_participant(user_id) {
            return Err(AppError::Validation(
                "Você já está inscrito nesta ação.".to_string(),
            ));
        }
        if roster.is_full() {
            return Err(AppError::Validation("Esta ação está lotada.".to_string()));
        }

        let repo = ActionRepository::new(self.db);
        repo.add_participant(action_id, user_id).await?;

        self.roster(action_id).await
    }

    pub async fn leave(&self, action_id: i32, user_id: u64) -> Result<ActionRoster, AppError> {
        let roster = self.require_open(action_id).await?;

        if !roster.action.registrations_open {
            return Err(AppError::Validation(
                "As inscrições estão fechadas; não é possível sair agora.".to_string(),
            ));
        }
        if !roster.is_participant(user_id) {
            return Err(AppError::Validation(
                "Você não está inscrito nesta ação.".to_string(),
            ));
        }

        ActionRepository::new(self.db)
            .delete_participant(action_id, user_id)
            .await?;

        self.roster(action_id).await
    }

    pub async fn set_registrations(
        &self,
        action_id: i32,
        actor: &ActionActor,
        open: bool,
    ) -> Result<ActionRoster, AppError> {
        let roster = self.manageable(action_id, actor).await?;

        if roster.action.registrations_open == open {
            let state = if open { "abertas" } else { "fechadas" };
            return Err(AppError::Validation(format!(
                "As inscrições já estão {}.",
                state
            )));
        }

        ActionRepository::new(self.db)
            .set_registrations_open(action_id, open)
            .await?;

        self.roster(action_id).await
    }

    /// Removes a participant, keeping them listed as removed.
    pub async fn remove_participant(
        &self,
        action_id: i32,
        actor: &ActionActor,
        user_id: u64,
    ) -> Result<ActionRoster, AppError> {
        let roster = self.manageable(action_id, actor).await?;

        if !roster.is_participant(user_id) {
            return Err(AppError::Validation(
                "Este membro não está inscrito na ação.".to_string(),
            ));
        }

        ActionRepository::new(self.db)
            .set_removed(action_id, user_id, Some(actor.user_id))
            .await?;

        self.roster(action_id).await
    }

    /// Restores a removed participant if there is room.
    pub async fn restore_participant(
        &self,
        action_id: i32,
        actor: &ActionActor,
        user_id: u64,
    ) -> Result<ActionRoster, AppError> {
        let roster = self.manageable(action_id, actor).await?;

        if !roster.removed.iter().any(|p| p.user_id == user_id) {
            return Err(AppError::Validation(
                "Este membro não foi removido da ação.".to_string(),
            ));
        }
        if roster.is_full() {
            return Err(AppError::Validation(
                "A ação está lotada; não há vaga para restaurar.".to_string(),
            ));
        }

        ActionRepository::new(self.db)
            .set_removed(action_id, user_id, None)
            .await?;

        self.roster(action_id).await
    }

    /// Finishes an action with closed registrations and credits the participants.
    ///
    /// A victory splits the prize with [`split_prize`]; a defeat only counts the
    /// participation.
    pub async fn finish(
        &self,
        action_id: i32,
        actor: &ActionActor,
        result: ActionResult,
    ) -> Result<ActionRoster, AppError> {
        let roster = self.manageable(action_id, actor).await?;

        if roster.action.registrations_open {
            return Err(AppError::Validation(
                "Feche as inscrições antes de finalizar a ação.".to_string(),
            ));
        }
        if result == ActionResult::Victory {
            if roster.participants.is_empty() {
                return Err(AppError::Validation(
                    "Não há participantes para dividir o valor.".to_string(),
                ));
            }
            if roster.action.total_value_cents <= 0 {
                return Err(AppError::Validation(
                    "O valor total deve ser maior que zero.".to_string(),
                ));
            }
        }

        let credits: Vec<(u64, i64)> = match result {
            ActionResult::Victory => roster
                .participants
                .iter()
                .map(|p| p.user_id)
                .zip(split_prize(
                    roster.action.total_value_cents,
                    roster.participants.len(),
                ))
                .collect(),
            ActionResult::Defeat => roster.participants.iter().map(|p| (p.user_id, 0)).collect(),
        };

        ActionRepository::new(self.db)
            .finish(action_id, result, &credits)
            .await?
            .ok_or_else(|| AppError::Validation("Esta ação já foi finalizada.".to_string()))?;

        self.roster(action_id).await
    }

    /// Deletes an unfinished action and its participants.
    pub async fn cancel(&self, action_id: i32, actor: &ActionActor) -> Result<Action, AppError> {
        let roster = self.manageable(action_id, actor).await?;
        ActionRepository::new(self.db).delete(action_id).await?;

        Ok(roster.action)
    }

    /// Deletes an action that never got a message.
    pub async fn discard(&self, action_id: i32) -> Result<bool, AppError> {
        Ok(ActionRepository::new(self.db).delete(action_id).await?)
    }

    /// Deletes every action of the guild and zeroes the ranking. Administrators only.
    pub async fn reset(&self, guild_id: u64, actor: &ActionActor) -> Result<Vec<Action>, AppError> {
        if !actor.is_admin {
            return Err(AppError::Permission(
                "Apenas administradores podem resetar as ações.".to_string(),
            ));
        }

        Ok(ActionRepository::new(self.db).reset(guild_id).await?)
    }

    pub async fn ranking(&self, guild_id: u64) -> Result<Vec<ActionStat>, AppError> {
        Ok(ActionRepository::new(self.db)
            .ranking(guild_id, RANKING_LIMIT)
            .await?)
    }

    pub async fn get_unfinished(&self) -> Result<Vec<ActionRoster>, AppError> {
        let repo = ActionRepository::new(self.db);
        let mut rosters = Vec::new();

        for action in repo.get_unfinished().await? {
            if let Some(roster) = repo.get_roster(action.id).await? {
                rosters.push(roster);
            }
        }

        Ok(rosters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{
        builder::TestBuilder,
        factory::action::{ActionFactory, ActionTypeFactory},
    };

    const RESPONSIBLE_ROLE: u64 = 500;
    const CREATOR: u64 = 1;

    fn member(user_id: u64) -> ActionActor {
        ActionActor {
            user_id,
            is_admin: false,
            role_ids: vec![],
        }
    }

    fn creator() -> ActionActor {
        member(CREATOR)
    }

    /// Creates an action for three players with registrations open.
    async fn open_action(db: &DatabaseConnection, value_cents: i64) -> Result<i32, AppError> {
        let action_type = ActionTypeFactory::new(db, 10)
            .players(1, 3)
            .value_cents(value_cents)
            .build()
            .await?;
        let action = ActionFactory::new(db, action_type)
            .creator_id(CREATOR)
            .registrations_open()
            .build()
            .await?;

        Ok(action.id)
    }

    #[test]
    fn parses_brl_values() {
        assert_eq!(parse_brl_cents("1000").unwrap(), 100_000);
        assert_eq!(parse_brl_cents("12,5").unwrap(), 1_250);
        assert_eq!(parse_brl_cents("R$ 12.34").unwrap(), 1_234);
        assert_eq!(parse_brl_cents(" 0,07 ").unwrap(), 7);

        for bad in ["", "abc", "1,234", "1.2.3", "-5", ",50", "99999999999999999999"] {
            assert!(
                matches!(parse_brl_cents(bad), Err(AppError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    /// Tests the action type form rules.
    ///
    /// Expected: Err(Validation) for each broken rule, Ok for a valid form
    #[test]
    fn validates_type_form() {
        assert!(validate_type("Banco", "2", "5", "1500,00").is_ok());
        assert_eq!(
            validate_type("  Banco ", "3", "3", "1").unwrap().name,
            "Banco"
        );

        let long_name = "a".repeat(MAX_TYPE_NAME_LENGTH + 1);
        for (name, min, max, value) in [
            ("", "1", "2", "10"),
            (long_name.as_str(), "1", "2", "10"),
            ("Banco", "x", "2", "10"),
            ("Banco", "0", "2", "10"),
            ("Banco", "3", "2", "10"),
            ("Banco", "1", "2", "0"),
        ] {
            assert!(matches!(
                validate_type(name, min, max, value),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn prize_split_gives_remainder_to_earliest() {
        assert_eq!(split_prize(1000, 3), vec![334, 333, 333]);
        assert_eq!(split_prize(1001, 3), vec![334, 334, 333]);
        assert_eq!(split_prize(900, 3), vec![300, 300, 300]);
        assert_eq!(split_prize(2, 3), vec![1, 1, 0]);
        assert!(split_prize(1000, 0).is_empty());
    }

    /// Tests the join rules.
    ///
    /// Verifies closed registrations, duplicates and capacity.
    ///
    /// Expected: joins until full, each other case rejected
    #[tokio::test]
    async fn join_rules() -> Result<(), AppError> {
        let test = TestBuilder::new().with_action_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ActionService::new(db);
        let action_id = open_action(db, 1000).await?;

        service.join(action_id, 20).await?;
        assert!(matches!(
            service.join(action_id, 20).await,
            Err(AppError::Validation(_))
        ));
        service.join(action_id, 21).await?;
        let roster = service.join(action_id, 22).await?;
        assert!(roster.is_full());
        assert!(matches!(
            service.join(action_id, 23).await,
            Err(AppError::Validation(_))
        ));

        service.leave(action_id, 22).await?;
        service.set_registrations(action_id, &creator(), false).await?;
        assert!(matches!(
            service.join(action_id, 23).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.leave(action_id, 21).await,
            Err(AppError::Validation(_))
        ));

        Ok(())
    }

    /// Tests who may manage an action.
    ///
    /// Expected: plain members denied; creator, responsible role and admin allowed
    #[tokio::test]
    async fn management_requires_creator_or_responsible() -> Result<(), AppError> {
        let test = TestBuilder::new().with_action_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ActionService::new(db);
        service.set_responsible_roles(10, &[RESPONSIBLE_ROLE]).await?;
        let action_id = open_action(db, 1000).await?;

        assert!(matches!(
            service.set_registrations(action_id, &member(30), false).await,
            Err(AppError::Permission(_))
        ));

        service.set_registrations(action_id, &creator(), false).await?;

        let responsible = ActionActor {
            user_id: 31,
            is_admin: false,
            role_ids: vec![RESPONSIBLE_ROLE],
        };
        service.set_registrations(action_id, &responsible, true).await?;

        let admin = ActionActor {
            user_id: 32,
            is_admin: true,
            role_ids: vec![],
        };
        assert!(matches!(
            service.set_registrations(action_id, &admin, true).await,
            Err(AppError::Validation(_))
        ));

        Ok(())
    }

    /// Tests removing and restoring a participant.
    ///
    /// Verifies that a removed member cannot rejoin and is restored only with room.
    ///
    /// Expected: removal listed, rejoin denied, restore blocked while full
    #[tokio::test]
    async fn remove_and_restore() -> Result<(), AppError> {
        let test = TestBuilder::new().with_action_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ActionService::new(db);
        let action_id = open_action(db, 1000).await?;
        for user in [20, 21, 22] {
            service.join(action_id, user).await?;
        }

        let roster = service
            .remove_participant(action_id, &creator(), 21)
            .await?;
        assert_eq!(roster.removed[0].removed_by, Some(CREATOR));
        assert!(matches!(
            service.join(action_id, 21).await,
            Err(AppError::Permission(_))
        ));

        service.join(action_id, 23).await?;
        assert!(matches!(
            service.restore_participant(action_id, &creator(), 21).await,
            Err(AppError::Validation(_))
        ));

        service.leave(action_id, 23).await?;
        let roster = service
            .restore_participant(action_id, &creator(), 21)
            .await?;
        assert!(roster.is_participant(21));
        assert!(roster.removed.is_empty());

        Ok(())
    }

    /// Tests finishing with a victory.
    ///
    /// Verifies that registrations must be closed and that removed members earn
    /// nothing.
    ///
    /// Expected: shares summing to the total, credited once
    #[tokio::test]
    async fn victory_splits_prize() -> Result<(), AppError> {
        let test = TestBuilder::new().with_action_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ActionService::new(db);
        let action_id = open_action(db, 1000).await?;
        for user in [20, 21, 22] {
            service.join(action_id, user).await?;
        }

        assert!(matches!(
            service.finish(action_id, &creator(), ActionResult::Victory).await,
            Err(AppError::Validation(_))
        ));

        service.set_registrations(action_id, &creator(), false).await?;
        service.remove_participant(action_id, &creator(), 22).await?;
        let roster = service
            .finish(action_id, &creator(), ActionResult::Victory)
            .await?;

        assert!(roster.action.is_finished());
        assert_eq!(roster.action.result, Some(ActionResult::Victory));

        let ranking = service.ranking(10).await?;
        let earned: Vec<(u64, i64)> = ranking
            .iter()
            .map(|s| (s.user_id, s.total_earned_cents))
            .collect();
        assert_eq!(earned, [(20, 500), (21, 500)]);

        assert!(matches!(
            service.finish(action_id, &creator(), ActionResult::Defeat).await,
            Err(AppError::Validation(_))
        ));

        Ok(())
    }

    /// Tests finishing with a victory and nobody signed up.
    ///
    /// Expected: Err(Validation); a defeat is still allowed
    #[tokio::test]
    async fn victory_requires_participants() -> Result<(), AppError> {
        let test = TestBuilder::new().with_action_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ActionService::new(db);
        let action_id = open_action(db, 1000).await?;
        service.set_registrations(action_id, &creator(), false).await?;

        assert!(matches!(
            service.finish(action_id, &creator(), ActionResult::Victory).await,
            Err(AppError::Validation(_))
        ));

        let roster = service
            .finish(action_id, &creator(), ActionResult::Defeat)
            .await?;
        assert_eq!(roster.action.result, Some(ActionResult::Defeat));

        Ok(())
    }

    /// Tests types belonging to another guild.
    ///
    /// Expected: Err(NotFound) when creating, editing or deleting
    #[tokio::test]
    async fn types_are_scoped_to_guild() -> Result<(), AppError> {
        let test = TestBuilder::new().with_action_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ActionService::new(db);
        let foreign = ActionTypeFactory::new(db, 99).build().await?;
        let param = validate_type("Banco", "1", "2", "10")?;

        assert!(matches!(
            service.create_action(10, 1, 2, foreign.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.update_type(10, foreign.id, param).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete_type(10, foreign.id).await,
            Err(AppError::NotFound(_))
        ));

        Ok(())
    }

    /// Tests that only administrators may reset actions.
    ///
    /// Expected: Err(Permission) for a responsible member, Ok for an admin
    #[tokio::test]
    async fn reset_is_admin_only() -> Result<(), AppError> {
        let test = TestBuilder::new().with_action_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let service = ActionService::new(db);
        service.set_responsible_roles(10, &[RESPONSIBLE_ROLE]).await?;
        open_action(db, 1000).await?;

        let responsible = ActionActor {
            user_id: 31,
            is_admin: false,
            role_ids: vec![RESPONSIBLE_ROLE],
        };
        assert!(matches!(
            service.reset(10, &responsible).await,
            Err(AppError::Permission(_))
        ));

        let admin = ActionActor {
            is_admin: true,
            ..responsible
        };
        assert_eq!(service.reset(10, &admin).await?.len(), 1);
        assert!(service.get_unfinished().await?.is_empty());

        Ok(())
    }
}
