//! Registration modal, submission and moderator decisions.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ActionRow, ActionRowComponent, ComponentInteraction, Context, CreateActionRow,
    CreateInputText, CreateInteractionResponse, CreateMessage, CreateModal, EditMember,
    EditMessage, InputTextStyle, ModalInteraction,
};

use crate::server::{
    bot::{
        custom_id::{CustomId, INPUT_ASSIGNED_ID, INPUT_NAME, INPUT_RECRUITER_ID},
        embed::{decided_embed, record_embed, review_components, review_embed},
        interaction::ephemeral_followup,
        util::{channel_id, guild_id, guild_name, role_id, try_dm, user_id, Actor, Warnings},
    },
    error::AppError,
    model::registration::{Registration, MAX_ASSIGNED_ID_LENGTH},
    service::registration::{
        RegistrationForm, RegistrationService, MAX_ID_LENGTH, MAX_NAME_LENGTH,
    },
};

fn input(label: &str, custom_id: &str, placeholder: &str, max_length: usize) -> CreateActionRow {
    CreateActionRow::InputText(
        CreateInputText::new(InputTextStyle::Short, label, custom_id)
            .placeholder(placeholder)
            .max_length(max_length as u16)
            .required(true),
    )
}

/// Registration modal opened by the panel's "Cadastrar" button.
pub fn registration_modal() -> CreateModal {
    CreateModal::new(CustomId::RegistrationModal.to_string(), "Cadastro").components(vec![
        input("Nome", INPUT_NAME, "Seu nome", MAX_NAME_LENGTH),
        input(
            "ID no servidor",
            INPUT_ASSIGNED_ID,
            "Ex.: 4521",
            MAX_ASSIGNED_ID_LENGTH,
        ),
        input(
            "ID do recrutador",
            INPUT_RECRUITER_ID,
            "ID de quem te recrutou",
            MAX_ID_LENGTH,
        ),
    ])
}

/// Builds the form from `(custom_id, value)` pairs; missing inputs are empty.
pub fn form_from_inputs(inputs: &[(String, String)]) -> RegistrationForm {
    let value = |key: &str| {
        inputs
            .iter()
            .find(|(id, _)| id == key)
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    };

    RegistrationForm::new(
        value(INPUT_NAME),
        value(INPUT_ASSIGNED_ID),
        value(INPUT_RECRUITER_ID),
    )
}

/// `(custom_id, value)` of every text input in a submitted modal.
pub fn modal_inputs(rows: &[ActionRow]) -> Vec<(String, String)> {
    rows.iter()
        .flat_map(|row| row.components.iter())
        .filter_map(|component| match component {
            ActionRowComponent::InputText(input) => Some((
                input.custom_id.clone(),
                input.value.clone().unwrap_or_default(),
            )),
            _ => None,
        })
        .collect()
}

pub async fn open_modal(ctx: &Context, interaction: &ComponentInteraction) -> Result<(), AppError> {
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Modal(registration_modal()),
        )
        .await?;

    Ok(())
}

/// Stores the submission and posts it for review.
///
/// Invalid forms are answered with the validation message; pressing "Cadastrar" again
/// re-opens the modal. If the review message cannot be posted the record is kept and
/// posted again at the next startup.
pub async fn submit(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ModalInteraction,
) -> Result<(), AppError> {
    let guild = interaction
        .guild_id
        .ok_or_else(|| AppError::Validation("Use o cadastro dentro do servidor.".to_string()))?;
    let form = form_from_inputs(&modal_inputs(&interaction.data.components));

    let service = RegistrationService::new(db);
    let submitted = service
        .submit(guild.get(), interaction.user.id.get(), form)
        .await?;
    interaction.defer_ephemeral(&ctx.http).await?;

    let registration = &submitted.registration;
    let mut warnings = Warnings::new();
    match channel_id(submitted.approval_channel_id) {
        Some(channel) => {
            let posted = channel
                .send_message(
                    &ctx.http,
                    CreateMessage::new()
                        .embed(review_embed(registration))
                        .components(review_components(registration.id)),
                )
                .await;
            match posted {
                Ok(message) => {
                    service
                        .attach_review_message(registration.id, channel.get(), message.id.get())
                        .await?;
                }
                Err(e) => warnings.push_err(
                    "Não consegui publicar no canal de aprovação; o cadastro será reenviado quando o bot reiniciar",
                    e,
                ),
            }
        }
        None => warnings.push("Canal de aprovação inválido"),
    }

    interaction
        .create_followup(
            &ctx.http,
            ephemeral_followup(
                warnings.render("✅ Cadastro enviado! Aguarde a aprovação da staff."),
            ),
        )
        .await?;

    Ok(())
}

/// Handles the Approve and Reject buttons of a review message.
pub async fn decide(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    registration_id: i32,
    approve: bool,
) -> Result<(), AppError> {
    let actor = match &interaction.member {
        Some(member) => Actor::from_interaction_member(member),
        None => return Err(AppError::Validation("Use este botão no servidor.".to_string())),
    };
    actor.require_admin()?;

    let service = RegistrationService::new(db);
    let registration = service
        .get(registration_id)
        .await?
        .filter(|r| Some(r.guild_id) == interaction.guild_id.map(|g| g.get()))
        .ok_or_else(|| AppError::NotFound("Cadastro não encontrado.".to_string()))?;

    interaction.defer_ephemeral(&ctx.http).await?;

    let summary = if approve {
        apply_approval(db, ctx, interaction, registration.id, actor.user_id).await?
    } else {
        apply_rejection(db, ctx, interaction, registration.id, actor.user_id).await?
    };

    interaction
        .create_followup(&ctx.http, ephemeral_followup(summary))
        .await?;

    Ok(())
}

async fn update_review(
    ctx: &Context,
    interaction: &ComponentInteraction,
    registration: &Registration,
    warnings: &mut Warnings,
) {
    if let Err(e) = interaction
        .channel_id
        .edit_message(
            ctx,
            interaction.message.id,
            EditMessage::new()
                .embed(decided_embed(registration))
                .components(vec![]),
        )
        .await
    {
        warnings.push_err("Não consegui atualizar a mensagem de revisão", e);
    }
}

/// Approves and applies every Discord effect, collecting failures instead of
/// rolling the approval back.
async fn apply_approval(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    registration_id: i32,
    moderator_id: u64,
) -> Result<String, AppError> {
    let plan = RegistrationService::new(db)
        .approve(registration_id, moderator_id)
        .await?;
    let registration = &plan.registration;
    let mut warnings = Warnings::new();

    let (Some(guild), Some(member)) = (
        guild_id(registration.guild_id),
        user_id(registration.user_id),
    ) else {
        return Err(AppError::InternalError(format!(
            "registration {} has a zero id",
            registration.id
        )));
    };

    match plan.member_role_id.and_then(role_id) {
        Some(role) => {
            if let Err(e) = ctx
                .http
                .add_member_role(guild, member, role, Some("Cadastro aprovado"))
                .await
            {
                warnings.push_err("Não consegui adicionar o cargo de membro", e);
            }
        }
        None => warnings.push("Cargo de membro não configurado"),
    }

    if let Some(role) = plan.provisional_role_id.and_then(role_id) {
        if let Err(e) = ctx
            .http
            .remove_member_role(guild, member, role, Some("Cadastro aprovado"))
            .await
        {
            warnings.push_err("Não consegui remover o cargo SET", e);
        }
    }

    if let Err(e) = guild
        .edit_member(&ctx.http, member, EditMember::new().nickname(&plan.nickname))
        .await
    {
        warnings.push_err("Não consegui alterar o apelido", e);
    }

    match plan.records_channel_id.and_then(channel_id) {
        Some(channel) => {
            if let Err(e) = channel
                .send_message(
                    &ctx.http,
                    CreateMessage::new().embed(record_embed(registration)),
                )
                .await
            {
                warnings.push_err("Não consegui publicar no canal de registros", e);
            }
        }
        None => warnings.push("Canal de registros não configurado"),
    }

    update_review(ctx, interaction, registration, &mut warnings).await;

    try_dm(
        ctx,
        registration.user_id,
        CreateMessage::new().content(format!(
            "✅ Seu cadastro em **{}** foi aprovado! Bem-vindo(a).",
            guild_name(ctx, guild)
        )),
    )
    .await;

    Ok(warnings.render(&format!(
        "✅ Cadastro de <@{}> aprovado.",
        registration.user_id
    )))
}

async fn apply_rejection(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    registration_id: i32,
    moderator_id: u64,
) -> Result<String, AppError> {
    let registration = RegistrationService::new(db)
        .reject(registration_id, moderator_id)
        .await?;
    let mut warnings = Warnings::new();

    update_review(ctx, interaction, &registration, &mut warnings).await;

    let guild = guild_id(registration.guild_id)
        .map(|g| guild_name(ctx, g))
        .unwrap_or_else(|| "servidor".to_string());
    try_dm(
        ctx,
        registration.user_id,
        CreateMessage::new().content(format!(
            "❌ Seu cadastro em **{}** foi recusado. Fale com a staff se tiver dúvidas.",
            guild
        )),
    )
    .await;

    Ok(warnings.render(&format!(
        "❌ Cadastro de <@{}> recusado.",
        registration.user_id
    )))
}
