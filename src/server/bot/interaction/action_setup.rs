//! `!acao_setup` panel: action types, responsible roles, channels and the reset.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, ChannelType, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateEmbed, CreateInputText, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateModal, CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, GuildId,
    InputTextStyle, ModalInteraction,
};

use crate::server::{
    bot::{
        custom_id::{
            ActionSetupControl, CustomId, INPUT_ACTION_MAX, INPUT_ACTION_MIN, INPUT_ACTION_NAME,
            INPUT_ACTION_VALUE, NEW_ACTION_TYPE,
        },
        embed::{action_setup_embed, action_type_list},
        interaction::{
            action::{action_actor, refresh_ranking},
            component_actor, ephemeral, ephemeral_followup,
            registration::modal_inputs,
            selected_ids, selected_value,
            setup::validate_channel,
        },
        layout::{ComponentLayout, LayoutRow},
        util::{channel_id, message_id, role_id, Actor, Warnings, COLOR_PANEL},
    },
    data::action::ActionSettingsUpdate,
    error::AppError,
    model::action::{ActionSettings, ActionType},
    service::action::{validate_type, ActionService, MAX_TYPE_NAME_LENGTH},
};

/// Types offered in the panel select, next to the "create" option.
const MAX_SELECTABLE_TYPES: usize = 24;
const MAX_PLAYERS_LENGTH: u16 = 4;
const MAX_VALUE_LENGTH: u16 = 16;

/// `1500,00` for 150000 centavos, as typed in the modal.
pub fn cents_input(cents: i64) -> String {
    format!("{},{:02}", cents / 100, cents % 100)
}

fn text_select(
    custom_id: CustomId,
    placeholder: &str,
    options: Vec<CreateSelectMenuOption>,
) -> CreateSelectMenu {
    CreateSelectMenu::new(custom_id.to_string(), CreateSelectMenuKind::String { options })
        .placeholder(placeholder)
}

fn channel_select(
    control: ActionSetupControl,
    placeholder: &str,
    current: Option<u64>,
) -> CreateSelectMenu {
    let defaults: Vec<_> = current.and_then(channel_id).into_iter().collect();

    CreateSelectMenu::new(
        CustomId::ActionSetup(control).to_string(),
        CreateSelectMenuKind::Channel {
            channel_types: Some(vec![ChannelType::Text]),
            default_channels: (!defaults.is_empty()).then_some(defaults),
        },
    )
    .placeholder(placeholder)
}

/// Builds the panel from loaded settings and types.
pub fn build_panel(
    settings: &ActionSettings,
    types: &[ActionType],
) -> Result<(CreateEmbed, Vec<CreateActionRow>), AppError> {
    let mut type_options = vec![CreateSelectMenuOption::new(
        "➕ Criar novo tipo",
        NEW_ACTION_TYPE,
    )];
    type_options.extend(types.iter().take(MAX_SELECTABLE_TYPES).map(|t| {
        CreateSelectMenuOption::new(format!("✏️ {}", t.name), t.id.to_string()).description(
            format!("Min: {} | Max: {}", t.min_players, t.max_players),
        )
    }));

    let default_roles: Vec<_> = settings
        .responsible_role_ids
        .iter()
        .filter_map(|id| role_id(*id))
        .collect();
    let roles = CreateSelectMenu::new(
        CustomId::ActionSetup(ActionSetupControl::ResponsibleRoles).to_string(),
        CreateSelectMenuKind::Role {
            default_roles: (!default_roles.is_empty()).then_some(default_roles),
        },
    )
    .placeholder("Cargos responsáveis por ações")
    .min_values(0)
    .max_values(25);

    let rows = vec![
        LayoutRow::Select(text_select(
            CustomId::ActionSetup(ActionSetupControl::Type),
            "Criar ou gerenciar um tipo de ação",
            type_options,
        )),
        LayoutRow::Select(roles),
        LayoutRow::Select(channel_select(
            ActionSetupControl::ActionChannel,
            "Canal onde as ações são publicadas",
            settings.action_channel_id,
        )),
        LayoutRow::Select(channel_select(
            ActionSetupControl::RankingChannel,
            "Canal do ranking de ações",
            settings.ranking_channel_id,
        )),
        LayoutRow::Buttons(vec![
            CreateButton::new(CustomId::ActionSetup(ActionSetupControl::ListTypes).to_string())
                .label("Listar tipos")
                .style(ButtonStyle::Secondary),
            CreateButton::new(CustomId::ActionSetup(ActionSetupControl::Reset).to_string())
                .label("Resetar ações")
                .style(ButtonStyle::Danger),
        ]),
    ];

    Ok((
        action_setup_embed(settings, types),
        ComponentLayout::new(rows)?.into_components(),
    ))
}

pub async fn render_panel(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<(CreateEmbed, Vec<CreateActionRow>), AppError> {
    let service = ActionService::new(db);
    let settings = service.settings(guild_id).await?;
    let types = service.types(guild_id).await?;

    build_panel(&settings, &types)
}

async fn update_panel(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    guild_id: GuildId,
) -> Result<(), AppError> {
    let (embed, components) = render_panel(db, guild_id.get()).await?;

    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .embed(embed)
                    .components(components),
            ),
        )
        .await?;

    Ok(())
}

fn input(label: &str, custom_id: &str, placeholder: &str, max_length: u16) -> CreateInputText {
    CreateInputText::new(InputTextStyle::Short, label, custom_id)
        .placeholder(placeholder)
        .max_length(max_length)
        .required(true)
}

/// Modal for a new type, or prefilled with an existing one.
pub fn type_modal(existing: Option<&ActionType>) -> CreateModal {
    let mut name = input(
        "Nome da ação",
        INPUT_ACTION_NAME,
        "Ex.: Banco Central",
        MAX_TYPE_NAME_LENGTH as u16,
    );
    let mut min = input("Mínimo de players", INPUT_ACTION_MIN, "Ex.: 2", MAX_PLAYERS_LENGTH);
    let mut max = input("Máximo de players", INPUT_ACTION_MAX, "Ex.: 6", MAX_PLAYERS_LENGTH);
    let mut value = input(
        "Valor total (R$)",
        INPUT_ACTION_VALUE,
        "Ex.: 1500,00",
        MAX_VALUE_LENGTH,
    );

    let title = match existing {
        Some(t) => {
            name = name.value(&t.name);
            min = min.value(t.min_players.to_string());
            max = max.value(t.max_players.to_string());
            value = value.value(cents_input(t.total_value_cents));
            "Editar tipo de ação"
        }
        None => "Novo tipo de ação",
    };

    CreateModal::new(
        CustomId::ActionTypeModal(existing.map(|t| t.id)).to_string(),
        title,
    )
    .components(
        [name, min, max, value]
            .into_iter()
            .map(CreateActionRow::InputText)
            .collect(),
    )
}

async fn require_responsible(
    db: &DatabaseConnection,
    guild_id: GuildId,
    actor: Actor,
) -> Result<ActionSettings, AppError> {
    ActionService::new(db)
        .require_responsible(guild_id.get(), &action_actor(actor))
        .await
}

/// Type select: opens the create modal, or the edit/delete choice for a type.
pub async fn choose_type(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    require_responsible(db, guild_id, actor).await?;

    let value = selected_value(interaction)
        .ok_or_else(|| AppError::Validation("Nenhum tipo selecionado.".to_string()))?;
    if value == NEW_ACTION_TYPE {
        interaction
            .create_response(&ctx.http, CreateInteractionResponse::Modal(type_modal(None)))
            .await?;
        return Ok(());
    }

    let type_id: i32 = value
        .parse()
        .map_err(|_| AppError::Validation("Tipo de ação inválido.".to_string()))?;
    let action_type = ActionService::new(db)
        .require_type(guild_id.get(), type_id)
        .await?;

    let buttons = vec![
        CreateButton::new(CustomId::ActionTypeEdit(type_id).to_string())
            .label("Editar")
            .style(ButtonStyle::Primary),
        CreateButton::new(CustomId::ActionTypeDelete(type_id).to_string())
            .label("Excluir")
            .style(ButtonStyle::Danger),
    ];
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(
                        CreateEmbed::new()
                            .title(format!("🎯 {}", action_type.name))
                            .description(action_type_list(std::slice::from_ref(&action_type), 1))
                            .color(COLOR_PANEL),
                    )
                    .components(ComponentLayout::buttons(buttons)?.into_components())
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

pub async fn edit_type(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    type_id: i32,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    require_responsible(db, guild_id, actor).await?;
    let action_type = ActionService::new(db)
        .require_type(guild_id.get(), type_id)
        .await?;

    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Modal(type_modal(Some(&action_type))),
        )
        .await?;

    Ok(())
}

pub async fn delete_type(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    type_id: i32,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    require_responsible(db, guild_id, actor).await?;
    let deleted = ActionService::new(db)
        .delete_type(guild_id.get(), type_id)
        .await?;

    tracing::info!("Action type {} deleted in guild {}", deleted.id, guild_id);
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content(format!(
                        "🗑️ Tipo **{}** excluído. Ações em andamento não são afetadas.",
                        deleted.name
                    ))
                    .embeds(vec![])
                    .components(vec![]),
            ),
        )
        .await?;

    Ok(())
}

/// Create or edit modal submission.
pub async fn submit_type(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ModalInteraction,
    type_id: Option<i32>,
) -> Result<(), AppError> {
    let (Some(guild_id), Some(member)) = (interaction.guild_id, &interaction.member) else {
        return Err(AppError::Validation(
            "Use este formulário dentro do servidor.".to_string(),
        ));
    };
    require_responsible(db, guild_id, Actor::from_interaction_member(member)).await?;

    let inputs = modal_inputs(&interaction.data.components);
    let value = |key: &str| {
        inputs
            .iter()
            .find(|(id, _)| id == key)
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    };
    let param = validate_type(
        value(INPUT_ACTION_NAME),
        value(INPUT_ACTION_MIN),
        value(INPUT_ACTION_MAX),
        value(INPUT_ACTION_VALUE),
    )?;

    let service = ActionService::new(db);
    let saved = match type_id {
        Some(id) => service.update_type(guild_id.get(), id, param).await?,
        None => service.create_type(guild_id.get(), param).await?,
    };

    tracing::info!("Action type {} saved in guild {}", saved.id, guild_id);
    interaction
        .create_response(
            &ctx.http,
            ephemeral(format!(
                "✅ Tipo **{}** salvo. Reabra o painel de ações para ver a lista atualizada.",
                saved.name
            )),
        )
        .await?;

    Ok(())
}

/// Responsible roles select. Administrators only, since the roles grant management.
pub async fn set_roles(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    actor.require_admin()?;

    ActionService::new(db)
        .set_responsible_roles(guild_id.get(), &selected_ids(interaction))
        .await?;

    update_panel(db, ctx, interaction, guild_id).await
}

/// Action or ranking channel select.
pub async fn set_channel(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    control: ActionSetupControl,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    require_responsible(db, guild_id, actor).await?;

    let channel = selected_ids(interaction).first().copied();
    if let Some(id) = channel {
        validate_channel(ctx, guild_id, id, true).await?;
    }

    let update = match control {
        ActionSetupControl::RankingChannel => ActionSettingsUpdate::RankingChannel(channel),
        _ => ActionSettingsUpdate::ActionChannel(channel),
    };
    ActionService::new(db)
        .update_settings(guild_id.get(), update)
        .await?;

    update_panel(db, ctx, interaction, guild_id).await?;

    if control == ActionSetupControl::RankingChannel {
        if let Err(e) = refresh_ranking(db, ctx, guild_id.get()).await {
            let mut warnings = Warnings::new();
            warnings.push_err("Não consegui publicar o ranking de ações", e);
            interaction
                .create_followup(
                    &ctx.http,
                    ephemeral_followup(warnings.render("✅ Canal de ranking salvo.")),
                )
                .await?;
        }
    }

    Ok(())
}

pub async fn list_types(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    require_responsible(db, guild_id, actor).await?;
    let types = ActionService::new(db).types(guild_id.get()).await?;

    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .embed(
                        CreateEmbed::new()
                            .title(format!("🎯 Tipos de ação ({})", types.len()))
                            .description(action_type_list(&types, MAX_SELECTABLE_TYPES))
                            .color(COLOR_PANEL),
                    )
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

/// Asks an administrator to confirm the reset.
pub async fn reset(ctx: &Context, interaction: &ComponentInteraction) -> Result<(), AppError> {
    let (_, actor) = component_actor(interaction)?;
    actor.require_admin()?;

    let confirm =
        CreateButton::new(CustomId::ActionSetup(ActionSetupControl::ResetConfirm).to_string())
            .label("Confirmar reset")
            .style(ButtonStyle::Danger);
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(
                        "⚠️ Isso apaga todas as ações e zera o ranking. \
                         Os tipos de ação são mantidos.",
                    )
                    .components(ComponentLayout::buttons(vec![confirm])?.into_components())
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

/// Deletes every action, removes their messages and redraws the empty ranking.
pub async fn reset_confirm(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    let deleted = ActionService::new(db)
        .reset(guild_id.get(), &action_actor(actor))
        .await?;
    interaction.defer(&ctx.http).await?;

    let mut warnings = Warnings::new();
    let mut failed_messages = 0;
    for action in deleted.iter().filter(|a| !a.is_finished()) {
        let (Some(channel), Some(message)) = (
            channel_id(action.channel_id),
            action.message_id.and_then(message_id),
        ) else {
            continue;
        };
        if let Err(e) = channel.delete_message(&ctx.http, message).await {
            tracing::debug!("Failed to delete action {} message: {}", action.id, e);
            failed_messages += 1;
        }
    }
    if failed_messages > 0 {
        warnings.push(format!(
            "{} mensagem(ns) de ação não puderam ser apagadas",
            failed_messages
        ));
    }
    if let Err(e) = refresh_ranking(db, ctx, guild_id.get()).await {
        warnings.push_err("Não consegui atualizar o ranking de ações", e);
    }

    tracing::info!(
        "Actions reset in guild {}: {} removed",
        guild_id,
        deleted.len()
    );
    interaction
        .create_followup(
            &ctx.http,
            ephemeral_followup(warnings.render(&format!(
                "✅ {} ação(ões) apagada(s) e ranking zerado.",
                deleted.len()
            ))),
        )
        .await?;

    Ok(())
}
