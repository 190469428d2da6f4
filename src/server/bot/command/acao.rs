use sea_orm::DatabaseConnection;
use serenity::all::{
    Context, CreateActionRow, CreateMessage, CreateSelectMenu, CreateSelectMenuKind,
    CreateSelectMenuOption, GuildId, Message,
};

use crate::model::dashboard::format_brl;
use crate::server::{
    bot::{custom_id::CustomId, interaction::action_setup::render_panel, util::reply},
    error::AppError,
    model::action::ActionType,
    service::action::ActionService,
};

/// Options a string select can hold.
const MAX_TYPE_OPTIONS: usize = 25;

/// Select offered by `!acao`, one option per type.
pub fn type_select(types: &[ActionType]) -> CreateActionRow {
    let options = types
        .iter()
        .take(MAX_TYPE_OPTIONS)
        .map(|t| {
            CreateSelectMenuOption::new(&t.name, t.id.to_string()).description(format!(
                "Min: {} | Max: {} | Valor: {}",
                t.min_players,
                t.max_players,
                format_brl(t.total_value_cents)
            ))
        })
        .collect();

    CreateActionRow::SelectMenu(
        CreateSelectMenu::new(
            CustomId::ActionCreate.to_string(),
            CreateSelectMenuKind::String { options },
        )
        .placeholder("Escolha o tipo de ação"),
    )
}

/// `!acao_setup`: posts the action configuration panel.
pub async fn acao_setup(
    db: &DatabaseConnection,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
) -> Result<(), AppError> {
    let (embed, components) = render_panel(db, guild_id.get()).await?;

    message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).components(components),
        )
        .await?;

    Ok(())
}

/// `!acao`: asks which type of action to create.
pub async fn acao(
    db: &DatabaseConnection,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
    prefix: &str,
) -> Result<(), AppError> {
    let types = ActionService::new(db).types(guild_id.get()).await?;

    if types.is_empty() {
        reply(
            ctx,
            message,
            format!(
                "Nenhum tipo de ação cadastrado.\nUse `{}acao_setup` para criar o primeiro.",
                prefix
            ),
        )
        .await;
        return Ok(());
    }

    message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .content("🎯 Qual ação você quer criar?")
                .components(vec![type_select(&types)]),
        )
        .await?;

    Ok(())
}
