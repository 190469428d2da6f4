//! Component and modal interactions.
//!
//! Routing is driven entirely by [`CustomId`], which carries any record id a component
//! refers to. Handlers respond to the interaction themselves; when one fails, the
//! router answers ephemerally with the error's user-facing message, through a followup
//! if the interaction was already acknowledged.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{
    ComponentInteraction, ComponentInteractionDataKind, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, GuildId, Interaction,
    ModalInteraction,
};

use crate::server::{
    bot::{
        custom_id::{ActionSetupControl, CustomId},
        util::Actor,
    },
    error::AppError,
};

pub mod action;
pub mod action_setup;
pub mod permission;
pub mod registration;
pub mod servers;
pub mod setup;
pub mod ticket;

pub async fn handle_interaction(db: &DatabaseConnection, ctx: Context, interaction: Interaction) {
    match interaction {
        Interaction::Component(component) => {
            if let Err(e) = route_component(db, &ctx, &component).await {
                report_component_error(&ctx, &component, e).await;
            }
        }
        Interaction::Modal(modal) => {
            if let Err(e) = route_modal(db, &ctx, &modal).await {
                report_modal_error(&ctx, &modal, e).await;
            }
        }
        _ => {}
    }
}

async fn route_component(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let Some(custom_id) = CustomId::parse(&interaction.data.custom_id) else {
        tracing::debug!("Ignoring component {}", interaction.data.custom_id);
        return Ok(());
    };

    match custom_id {
        CustomId::RegistrationStart => registration::open_modal(ctx, interaction).await,
        CustomId::RegistrationApprove(id) => {
            registration::decide(db, ctx, interaction, id, true).await
        }
        CustomId::RegistrationReject(id) => {
            registration::decide(db, ctx, interaction, id, false).await
        }
        CustomId::SetupPage(page) => setup::show_page(db, ctx, interaction, page).await,
        CustomId::SetupField(field) => setup::set_field(db, ctx, interaction, field).await,
        CustomId::SetupTicket(setting) => setup::set_ticket(db, ctx, interaction, setting).await,
        CustomId::SetupVoice(setting) => setup::set_voice(db, ctx, interaction, setting).await,
        CustomId::PermissionCommand => permission::choose_command(db, ctx, interaction).await,
        CustomId::PermissionRoles(command) => {
            permission::set_roles(db, ctx, interaction, &command).await
        }
        CustomId::PermissionReset(command) => {
            permission::reset(db, ctx, interaction, &command).await
        }
        CustomId::LeaveGuild(guild_id) => servers::leave(ctx, interaction, guild_id).await,
        CustomId::TicketOpen => ticket::open(db, ctx, interaction).await,
        CustomId::TicketClaim => ticket::claim(db, ctx, interaction).await,
        CustomId::TicketClose => ticket::close(db, ctx, interaction).await,
        CustomId::TicketReopen => ticket::reopen(db, ctx, interaction).await,
        CustomId::Action(button, id) => action::press(db, ctx, interaction, button, id).await,
        CustomId::ActionRemovePick(id) => action::pick(db, ctx, interaction, id, false).await,
        CustomId::ActionRestorePick(id) => action::pick(db, ctx, interaction, id, true).await,
        CustomId::ActionCreate => action::create(db, ctx, interaction).await,
        CustomId::ActionSetup(control) => match control {
            ActionSetupControl::Type => action_setup::choose_type(db, ctx, interaction).await,
            ActionSetupControl::ResponsibleRoles => {
                action_setup::set_roles(db, ctx, interaction).await
            }
            ActionSetupControl::ActionChannel | ActionSetupControl::RankingChannel => {
                action_setup::set_channel(db, ctx, interaction, control).await
            }
            ActionSetupControl::ListTypes => action_setup::list_types(db, ctx, interaction).await,
            ActionSetupControl::Reset => action_setup::reset(ctx, interaction).await,
            ActionSetupControl::ResetConfirm => {
                action_setup::reset_confirm(db, ctx, interaction).await
            }
        },
        CustomId::ActionTypeEdit(id) => action_setup::edit_type(db, ctx, interaction, id).await,
        CustomId::ActionTypeDelete(id) => {
            action_setup::delete_type(db, ctx, interaction, id).await
        }
        CustomId::RegistrationModal | CustomId::ActionTypeModal(_) => Ok(()),
    }
}

async fn route_modal(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ModalInteraction,
) -> Result<(), AppError> {
    match CustomId::parse(&interaction.data.custom_id) {
        Some(CustomId::RegistrationModal) => registration::submit(db, ctx, interaction).await,
        Some(CustomId::ActionTypeModal(type_id)) => {
            action_setup::submit_type(db, ctx, interaction, type_id).await
        }
        _ => {
            tracing::debug!("Ignoring modal {}", interaction.data.custom_id);
            Ok(())
        }
    }
}

/// Guild and member pressing a component.
pub fn component_actor(interaction: &ComponentInteraction) -> Result<(GuildId, Actor), AppError> {
    match (interaction.guild_id, &interaction.member) {
        (Some(guild_id), Some(member)) => Ok((guild_id, Actor::from_interaction_member(member))),
        _ => Err(AppError::Validation(
            "Use este componente dentro do servidor.".to_string(),
        )),
    }
}

/// Ids picked in a channel, role or string select; empty for any other component.
pub fn selected_ids(interaction: &ComponentInteraction) -> Vec<u64> {
    match &interaction.data.kind {
        ComponentInteractionDataKind::ChannelSelect { values } => {
            values.iter().map(|c| c.get()).collect()
        }
        ComponentInteractionDataKind::RoleSelect { values } => {
            values.iter().map(|r| r.get()).collect()
        }
        ComponentInteractionDataKind::StringSelect { values } => {
            values.iter().filter_map(|v| v.parse().ok()).collect()
        }
        _ => Vec::new(),
    }
}

/// First value of a string select.
pub fn selected_value(interaction: &ComponentInteraction) -> Option<String> {
    match &interaction.data.kind {
        ComponentInteractionDataKind::StringSelect { values } => values.first().cloned(),
        _ => None,
    }
}

/// Ephemeral response carrying only `content`.
pub fn ephemeral(content: impl Into<String>) -> CreateInteractionResponse {
    CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    )
}

/// Ephemeral followup carrying only `content`.
pub fn ephemeral_followup(content: impl Into<String>) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .content(content)
        .ephemeral(true)
}

async fn report_component_error(ctx: &Context, interaction: &ComponentInteraction, err: AppError) {
    let message = err.user_message();

    if interaction
        .create_response(&ctx.http, ephemeral(message.clone()))
        .await
        .is_err()
    {
        if let Err(e) = interaction
            .create_followup(&ctx.http, ephemeral_followup(message))
            .await
        {
            tracing::warn!("Failed to report interaction error: {}", e);
        }
    }
}

async fn report_modal_error(ctx: &Context, interaction: &ModalInteraction, err: AppError) {
    let message = err.user_message();

    if interaction
        .create_response(&ctx.http, ephemeral(message.clone()))
        .await
        .is_err()
    {
        if let Err(e) = interaction
            .create_followup(&ctx.http, ephemeral_followup(message))
            .await
        {
            tracing::warn!("Failed to report modal error: {}", e);
        }
    }
}
