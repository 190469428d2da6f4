//! Registration workflow: form validation, submission and moderator decisions.
//!
//! The service only touches the store. It returns what the bot layer needs to apply
//! Discord side effects (roles, nickname, record embed), so a failed role change can be
//! reported without undoing the decision.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        member_index::MemberIndexRepository, registration::RegistrationRepository,
        settings::SettingsRepository,
    },
    error::AppError,
    model::registration::{
        CreateRegistrationParam, DecideRegistrationParam, Registration, RegistrationStatus,
        MAX_ASSIGNED_ID_LENGTH,
    },
};

pub const MAX_NAME_LENGTH: usize = 80;
pub const MAX_ID_LENGTH: usize = 32;

/// Values submitted through the registration modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub display_name: String,
    pub assigned_id: String,
    pub recruiter_id: String,
}

impl RegistrationForm {
    /// Trims every field.
    pub fn new(display_name: &str, assigned_id: &str, recruiter_id: &str) -> Self {
        Self {
            display_name: display_name.trim().to_string(),
            assigned_id: assigned_id.trim().to_string(),
            recruiter_id: recruiter_id.trim().to_string(),
        }
    }
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

/// Validates a submitted form.
///
/// # Returns
/// - `Ok(())` - Form can be stored
/// - `Err(AppError::Validation)` - First problem found, phrased for the submitter
pub fn validate_form(form: &RegistrationForm) -> Result<(), AppError> {
    let retry = "Clique em Cadastrar novamente para corrigir.";

    if form.display_name.is_empty() || form.assigned_id.is_empty() || form.recruiter_id.is_empty()
    {
        return Err(AppError::Validation(format!(
            "Preencha nome, ID e ID do recrutador. {}",
            retry
        )));
    }
    if form.display_name.chars().count() > MAX_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "O nome pode ter no máximo {} caracteres. {}",
            MAX_NAME_LENGTH, retry
        )));
    }
    if form.assigned_id.chars().count() > MAX_ASSIGNED_ID_LENGTH {
        return Err(AppError::Validation(format!(
            "O ID no servidor pode ter no máximo {} dígitos. {}",
            MAX_ASSIGNED_ID_LENGTH, retry
        )));
    }
    if form.recruiter_id.chars().count() > MAX_ID_LENGTH {
        return Err(AppError::Validation(format!(
            "O ID do recrutador pode ter no máximo {} dígitos. {}",
            MAX_ID_LENGTH, retry
        )));
    }
    if !is_numeric(&form.assigned_id) {
        return Err(AppError::Validation(format!(
            "O ID no servidor deve conter apenas números. {}",
            retry
        )));
    }
    if !is_numeric(&form.recruiter_id) {
        return Err(AppError::Validation(format!(
            "O ID do recrutador deve conter apenas números. {}",
            retry
        )));
    }

    Ok(())
}

/// A stored submission and where its review message goes.
#[derive(Debug, Clone)]
pub struct SubmittedRegistration {
    pub registration: Registration,
    pub approval_channel_id: u64,
}

/// Everything the bot applies after an approval.
#[derive(Debug, Clone)]
pub struct ApprovalPlan {
    pub registration: Registration,
    pub member_role_id: Option<u64>,
    pub provisional_role_id: Option<u64>,
    pub records_channel_id: Option<u64>,
    pub nickname: String,
}

pub struct RegistrationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RegistrationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Validates and stores a submission.
    ///
    /// Nothing is written when validation fails or the approval channel is missing.
    ///
    /// # Returns
    /// - `Ok(SubmittedRegistration)` - Pending record plus the approval channel
    /// - `Err(AppError::Validation)` - Invalid form
    /// - `Err(AppError::NotFound)` - Approval channel not configured
    pub async fn submit(
        &self,
        guild_id: u64,
        user_id: u64,
        form: RegistrationForm,
    ) -> Result<SubmittedRegistration, AppError> {
        validate_form(&form)?;

        let approval_channel_id = SettingsRepository::new(self.db)
            .get(guild_id)
            .await?
            .and_then(|settings| settings.approval_channel_id)
            .ok_or_else(|| {
                AppError::NotFound(
                    "Canal de aprovação não configurado. Peça a um admin para rodar !setup."
                        .to_string(),
                )
            })?;

        let registration = RegistrationRepository::new(self.db)
            .create(CreateRegistrationParam {
                guild_id,
                user_id,
                display_name: form.display_name,
                assigned_id: form.assigned_id,
                recruiter_id: form.recruiter_id,
            })
            .await?;

        Ok(SubmittedRegistration {
            registration,
            approval_channel_id,
        })
    }

    /// Records where the review message was posted.
    pub async fn attach_review_message(
        &self,
        registration_id: i32,
        channel_id: u64,
        message_id: u64,
    ) -> Result<Registration, AppError> {
        Ok(RegistrationRepository::new(self.db)
            .set_approval_message(registration_id, channel_id, message_id)
            .await?)
    }

    pub async fn get(&self, registration_id: i32) -> Result<Option<Registration>, AppError> {
        Ok(RegistrationRepository::new(self.db)
            .get_by_id(registration_id)
            .await?)
    }

    async fn decide(
        &self,
        registration_id: i32,
        status: RegistrationStatus,
        moderator_id: u64,
    ) -> Result<Registration, AppError> {
        let repo = RegistrationRepository::new(self.db);

        match repo
            .decide(DecideRegistrationParam {
                id: registration_id,
                status,
                moderator_id,
            })
            .await?
        {
            Some(registration) => Ok(registration),
            None => match repo.get_by_id(registration_id).await? {
                Some(_) => Err(AppError::Validation(
                    "Este cadastro já foi processado.".to_string(),
                )),
                None => Err(AppError::NotFound("Cadastro não encontrado.".to_string())),
            },
        }
    }

    /// Approves a pending registration and updates the member index.
    ///
    /// # Returns
    /// - `Ok(ApprovalPlan)` - Record is approved; the plan lists the Discord effects
    /// - `Err(AppError::Validation)` - Record was already approved or rejected
    /// - `Err(AppError::NotFound)` - No such record
    pub async fn approve(
        &self,
        registration_id: i32,
        moderator_id: u64,
    ) -> Result<ApprovalPlan, AppError> {
        let registration = self
            .decide(registration_id, RegistrationStatus::Approved, moderator_id)
            .await?;

        MemberIndexRepository::new(self.db)
            .upsert(
                registration.guild_id,
                &registration.assigned_id,
                registration.user_id,
            )
            .await?;

        let settings = SettingsRepository::new(self.db)
            .get(registration.guild_id)
            .await?;

        Ok(ApprovalPlan {
            nickname: registration.nickname(),
            member_role_id: settings.as_ref().and_then(|s| s.member_role_id),
            provisional_role_id: settings.as_ref().and_then(|s| s.provisional_role_id),
            records_channel_id: settings.as_ref().and_then(|s| s.records_channel_id),
            registration,
        })
    }

    /// Rejects a pending registration.
    pub async fn reject(
        &self,
        registration_id: i32,
        moderator_id: u64,
    ) -> Result<Registration, AppError> {
        self.decide(registration_id, RegistrationStatus::Rejected, moderator_id)
            .await
    }

    /// Member's newest registration, used by the exit report and `!ficha`.
    pub async fn latest_for_member(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Option<Registration>, AppError> {
        Ok(RegistrationRepository::new(self.db)
            .find_latest_by_user(guild_id, user_id)
            .await?)
    }
}
