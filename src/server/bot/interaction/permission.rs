//! `!setup_cargos` panel: which roles may run each gated command.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, ComponentInteraction, Context, CreateActionRow, CreateButton, CreateEmbed,
    CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption,
};

use crate::server::{
    bot::{
        command::{comandos::access_label, Command},
        custom_id::CustomId,
        interaction::{component_actor, selected_ids, selected_value},
        util::{role_id, COLOR_PANEL},
    },
    error::AppError,
    model::permission::CommandPermission,
    service::permission::{is_gated, PermissionService, GATED_COMMANDS},
};

fn describe(command_name: &str, configured: &[CommandPermission]) -> String {
    match Command::from_name(command_name) {
        Some(command) => access_label(command, configured),
        None => "Administradores".to_string(),
    }
}

/// Panel embed and the select listing every gated command.
pub fn build_panel(configured: &[CommandPermission]) -> (CreateEmbed, Vec<CreateActionRow>) {
    let mut embed = CreateEmbed::new()
        .title("🔐 Permissões de Comandos")
        .description(
            "Escolha um comando para definir os cargos que podem usá-lo. \
             Comandos sem configuração ficam liberados para todos.",
        )
        .color(COLOR_PANEL)
        .footer(CreateEmbedFooter::new(
            "Administradores sempre podem usar todos os comandos.",
        ));
    for name in GATED_COMMANDS {
        embed = embed.field(format!("!{}", name), describe(name, configured), true);
    }

    let options = GATED_COMMANDS
        .iter()
        .map(|name| CreateSelectMenuOption::new(format!("!{}", name), *name))
        .collect();
    let select = CreateSelectMenu::new(
        CustomId::PermissionCommand.to_string(),
        CreateSelectMenuKind::String { options },
    )
    .placeholder("Escolha um comando");

    (embed, vec![CreateActionRow::SelectMenu(select)])
}

pub async fn panel(
    db: &DatabaseConnection,
    guild_id: u64,
) -> Result<(CreateEmbed, Vec<CreateActionRow>), AppError> {
    let configured = PermissionService::new(db).list(guild_id).await?;

    Ok(build_panel(&configured))
}

fn role_picker(command_name: &str, current: &[u64]) -> Vec<CreateActionRow> {
    let defaults: Vec<_> = current.iter().filter_map(|id| role_id(*id)).collect();

    let select = CreateSelectMenu::new(
        CustomId::PermissionRoles(command_name.to_string()).to_string(),
        CreateSelectMenuKind::Role {
            default_roles: (!defaults.is_empty()).then_some(defaults),
        },
    )
    .placeholder("Cargos permitidos (nenhum = só administradores)")
    .min_values(0)
    .max_values(25);
    let reset = CreateButton::new(CustomId::PermissionReset(command_name.to_string()).to_string())
        .label("Liberar para todos")
        .style(ButtonStyle::Secondary);

    vec![
        CreateActionRow::SelectMenu(select),
        CreateActionRow::Buttons(vec![reset]),
    ]
}

/// Opens the role picker for the command chosen in the panel.
pub async fn choose_command(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    actor.require_admin()?;

    let command_name = selected_value(interaction)
        .filter(|name| is_gated(name))
        .ok_or_else(|| AppError::Validation("Comando inválido.".to_string()))?;

    let configured = PermissionService::new(db).list(guild_id.get()).await?;
    let current = configured
        .iter()
        .find(|p| p.command_name == command_name)
        .map(|p| p.role_ids.clone())
        .unwrap_or_default();

    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content(format!(
                        "`!{}` • acesso atual: {}",
                        command_name,
                        describe(&command_name, &configured)
                    ))
                    .components(role_picker(&command_name, &current))
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

async fn update_picker(
    ctx: &Context,
    interaction: &ComponentInteraction,
    content: String,
    components: Vec<CreateActionRow>,
) -> Result<(), AppError> {
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content(content)
                    .components(components),
            ),
        )
        .await?;

    Ok(())
}

/// Replaces the command's roles with the selection; an empty selection leaves the
/// command to administrators.
pub async fn set_roles(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    command_name: &str,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    actor.require_admin()?;

    let roles = selected_ids(interaction);
    let permission = PermissionService::new(db)
        .configure(guild_id.get(), command_name, &roles)
        .await?;
    tracing::info!(
        "Guild {} restricted !{} to roles {:?}",
        guild_id,
        command_name,
        permission.role_ids
    );

    update_picker(
        ctx,
        interaction,
        format!(
            "✅ `!{}` • acesso: {}",
            command_name,
            describe(command_name, &[permission.clone()])
        ),
        role_picker(command_name, &permission.role_ids),
    )
    .await
}

pub async fn reset(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    command_name: &str,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    actor.require_admin()?;

    PermissionService::new(db)
        .reset(guild_id.get(), command_name)
        .await?;

    update_picker(
        ctx,
        interaction,
        format!("↩️ `!{}` liberado para todos.", command_name),
        vec![],
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn panel_lists_every_gated_command() {
        let configured = vec![CommandPermission {
            command_name: "adv".to_string(),
            role_ids: vec![10],
        }];

        let (embed, rows) = build_panel(&configured);
        let embed = serde_json::to_value(&embed).unwrap();
        let fields = embed["fields"].as_array().unwrap();

        assert_eq!(fields.len(), GATED_COMMANDS.len());
        let adv = fields
            .iter()
            .find(|f| f["name"] == Value::from("!adv"))
            .unwrap();
        assert_eq!(adv["value"], Value::from("<@&10>"));
        assert_eq!(rows.len(), 1);
    }
}
