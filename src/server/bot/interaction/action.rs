//! Action buttons, participant pickers and the `!acao` type select.
//!
//! The stored action changes first; the posted message is then redrawn from the
//! stored roster, so a restart or a lost edit never leaves buttons out of step.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, ComponentInteraction, Context, CreateActionRow, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, EditMessage, GuildId, Message,
};

use crate::server::{
    bot::{
        custom_id::{ActionButton, CustomId},
        embed::{action_message, action_ranking_embed},
        interaction::{component_actor, ephemeral, ephemeral_followup, selected_ids, selected_value},
        util::{channel_id, message_id, user_id, Actor, Warnings},
    },
    data::action::ActionSettingsUpdate,
    error::AppError,
    model::action::{ActionResult, ActionRoster},
    service::action::{ActionActor, ActionService},
};

/// Options a string select can hold.
const MAX_PICK_OPTIONS: usize = 25;

pub fn action_actor(actor: Actor) -> ActionActor {
    ActionActor {
        user_id: actor.user_id,
        is_admin: actor.is_admin,
        role_ids: actor.role_ids,
    }
}

/// Sends the action to `channel` and stores the message id.
pub async fn post_action(
    db: &DatabaseConnection,
    ctx: &Context,
    channel: ChannelId,
    roster: &ActionRoster,
) -> Result<Message, AppError> {
    let (embed, components) = action_message(roster);
    let message = channel
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).components(components),
        )
        .await?;

    ActionService::new(db)
        .set_message(roster.action.id, message.id.get())
        .await?;

    Ok(message)
}

/// Redraws the posted action from `roster`.
///
/// # Returns
/// - `Ok(true)` - Message edited
/// - `Ok(false)` - The action has no stored message
/// - `Err(AppError::DiscordErr)` - Edit failed, e.g. the message was deleted
pub async fn edit_action(ctx: &Context, roster: &ActionRoster) -> Result<bool, AppError> {
    let (Some(channel), Some(message)) = (
        channel_id(roster.action.channel_id),
        roster.action.message_id.and_then(message_id),
    ) else {
        return Ok(false);
    };

    let (embed, components) = action_message(roster);
    channel
        .edit_message(
            &ctx.http,
            message,
            EditMessage::new().embed(embed).components(components),
        )
        .await?;

    Ok(true)
}

/// Edits the ranking message in the configured channel, posting a new one when it is
/// missing.
pub async fn refresh_ranking(
    db: &DatabaseConnection,
    ctx: &Context,
    guild_id: u64,
) -> Result<(), AppError> {
    let service = ActionService::new(db);
    let settings = service.settings(guild_id).await?;
    let Some(channel) = settings.ranking_channel_id.and_then(channel_id) else {
        return Ok(());
    };
    let embed = action_ranking_embed(&service.ranking(guild_id).await?);

    if let Some(message) = settings.ranking_message_id.and_then(message_id) {
        match channel
            .edit_message(&ctx.http, message, EditMessage::new().embed(embed.clone()))
            .await
        {
            Ok(_) => return Ok(()),
            Err(e) => tracing::debug!("Reposting action ranking in guild {}: {}", guild_id, e),
        }
    }

    let message = channel
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await?;
    service
        .update_settings(
            guild_id,
            ActionSettingsUpdate::RankingMessage(Some(message.id.get())),
        )
        .await?;

    Ok(())
}

async fn update_action(
    ctx: &Context,
    interaction: &ComponentInteraction,
    roster: &ActionRoster,
) -> Result<(), AppError> {
    let (embed, components) = action_message(roster);

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

fn member_label(ctx: &Context, guild_id: GuildId, user: u64) -> String {
    ctx.cache
        .guild(guild_id)
        .and_then(|guild| {
            user_id(user)
                .and_then(|id| guild.members.get(&id))
                .map(|m| m.display_name().to_string())
        })
        .unwrap_or_else(|| user.to_string())
}

/// Select with one option per `(user_id, label)`.
pub fn member_picker(
    custom_id: CustomId,
    placeholder: &str,
    members: Vec<(u64, String)>,
) -> CreateActionRow {
    let options = members
        .into_iter()
        .take(MAX_PICK_OPTIONS)
        .map(|(id, label)| CreateSelectMenuOption::new(label, id.to_string()))
        .collect();

    CreateActionRow::SelectMenu(
        CreateSelectMenu::new(custom_id.to_string(), CreateSelectMenuKind::String { options })
            .placeholder(placeholder),
    )
}

/// Any button on a posted action.
pub async fn press(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    button: ActionButton,
    action_id: i32,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    let user = actor.user_id;
    let actor = action_actor(actor);
    let service = ActionService::new(db);

    let roster = match button {
        ActionButton::Join => service.join(action_id, user).await?,
        ActionButton::Leave => service.leave(action_id, user).await?,
        ActionButton::Open => service.set_registrations(action_id, &actor, true).await?,
        ActionButton::Close => service.set_registrations(action_id, &actor, false).await?,
        ActionButton::Win | ActionButton::Defeat => {
            let result = if button == ActionButton::Win {
                ActionResult::Victory
            } else {
                ActionResult::Defeat
            };
            let roster = service.finish(action_id, &actor, result).await?;
            update_action(ctx, interaction, &roster).await?;

            tracing::info!(
                "Action {} finished as {} by {} in guild {}",
                action_id,
                result.as_str(),
                user,
                guild_id
            );
            if let Err(e) = refresh_ranking(db, ctx, guild_id.get()).await {
                let mut warnings = Warnings::new();
                warnings.push_err("Não consegui atualizar o ranking de ações", e);
                interaction
                    .create_followup(
                        &ctx.http,
                        ephemeral_followup(warnings.render("✅ Ação finalizada.")),
                    )
                    .await?;
            }
            return Ok(());
        }
        ActionButton::Remove | ActionButton::Restore => {
            return show_picker(db, ctx, interaction, guild_id, &actor, button, action_id).await;
        }
        ActionButton::Cancel => {
            let action = service.cancel(action_id, &actor).await?;
            interaction
                .create_response(&ctx.http, ephemeral("🗑️ Ação cancelada."))
                .await?;
            if let Err(e) = interaction.message.delete(&ctx.http).await {
                tracing::warn!("Failed to delete cancelled action {}: {}", action.id, e);
            }
            tracing::info!("Action {} cancelled by {}", action.id, user);
            return Ok(());
        }
    };

    update_action(ctx, interaction, &roster).await
}

async fn show_picker(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    guild_id: GuildId,
    actor: &ActionActor,
    button: ActionButton,
    action_id: i32,
) -> Result<(), AppError> {
    let roster = ActionService::new(db).manageable(action_id, actor).await?;

    let (listed, custom_id, placeholder, empty) = if button == ActionButton::Remove {
        (
            &roster.participants,
            CustomId::ActionRemovePick(action_id),
            "Membro a remover",
            "Nenhum participante para remover.",
        )
    } else {
        (
            &roster.removed,
            CustomId::ActionRestorePick(action_id),
            "Membro a restaurar",
            "Nenhum membro removido.",
        )
    };

    if listed.is_empty() {
        return Err(AppError::Validation(empty.to_string()));
    }

    let members = listed
        .iter()
        .map(|p| (p.user_id, member_label(ctx, guild_id, p.user_id)))
        .collect();
    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Message(
                CreateInteractionResponseMessage::new()
                    .content("Escolha o membro:")
                    .components(vec![member_picker(custom_id, placeholder, members)])
                    .ephemeral(true),
            ),
        )
        .await?;

    Ok(())
}

/// Member chosen in a remove or restore picker.
pub async fn pick(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    action_id: i32,
    restore: bool,
) -> Result<(), AppError> {
    let (_, actor) = component_actor(interaction)?;
    let actor = action_actor(actor);
    let target = selected_ids(interaction)
        .first()
        .copied()
        .ok_or_else(|| AppError::Validation("Nenhum membro selecionado.".to_string()))?;

    let service = ActionService::new(db);
    let (roster, summary) = if restore {
        (
            service.restore_participant(action_id, &actor, target).await?,
            format!("♻️ <@{}> restaurado na ação.", target),
        )
    } else {
        (
            service.remove_participant(action_id, &actor, target).await?,
            format!("🚫 <@{}> removido da ação.", target),
        )
    };

    let mut warnings = Warnings::new();
    if let Err(e) = edit_action(ctx, &roster).await {
        warnings.push_err("Não consegui atualizar a mensagem da ação", e);
    }

    interaction
        .create_response(
            &ctx.http,
            CreateInteractionResponse::UpdateMessage(
                CreateInteractionResponseMessage::new()
                    .content(warnings.render(&summary))
                    .components(vec![]),
            ),
        )
        .await?;

    Ok(())
}

/// Type chosen in the `!acao` select: posts a new action.
pub async fn create(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    let creator = actor.user_id;
    let service = ActionService::new(db);
    let settings = service
        .require_responsible(guild_id.get(), &action_actor(actor))
        .await?;
    let type_id: i32 = selected_value(interaction)
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| AppError::Validation("Tipo de ação inválido.".to_string()))?;

    let channel = settings
        .action_channel_id
        .and_then(channel_id)
        .unwrap_or(interaction.channel_id);
    let action = service
        .create_action(guild_id.get(), creator, channel.get(), type_id)
        .await?;
    let roster = service.roster(action.id).await?;

    if let Err(e) = post_action(db, ctx, channel, &roster).await {
        // Without a message nobody can join, so do not keep the record.
        if let Err(delete_err) = service.discard(action.id).await {
            tracing::warn!("Failed to drop unposted action {}: {}", action.id, delete_err);
        }
        return Err(e);
    }

    tracing::info!(
        "Action {} ({}) created by {} in guild {}",
        action.id,
        action.type_name,
        creator,
        guild_id
    );

    interaction
        .create_response(
            &ctx.http,
            ephemeral(format!("✅ Ação criada em <#{}>!", channel)),
        )
        .await?;
    if let Err(e) = interaction.message.delete(&ctx.http).await {
        tracing::debug!("Failed to delete action type select: {}", e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn picker_is_capped_at_select_limit() {
        let members = (1..=30).map(|i| (i, format!("Membro {}", i))).collect();

        let row = member_picker(CustomId::ActionRemovePick(3), "Membro", members);
        let value: Value = serde_json::to_value(&row).unwrap();
        let select = &value["components"][0];

        assert_eq!(select["custom_id"], "action:remove_pick:3");
        assert_eq!(select["options"].as_array().unwrap().len(), MAX_PICK_OPTIONS);
        assert_eq!(select["options"][0]["value"], "1");
    }
}
