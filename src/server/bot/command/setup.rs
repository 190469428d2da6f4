use sea_orm::DatabaseConnection;
use serenity::all::{Context, CreateMessage, GuildId, Message};

use crate::server::{
    bot::interaction::{permission, setup::render_page},
    error::AppError,
    service::settings::SettingsService,
};

/// `!setup`: posts the first page of the configuration wizard.
pub async fn setup(
    db: &DatabaseConnection,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
) -> Result<(), AppError> {
    SettingsService::new(db).get_or_create(guild_id.get()).await?;

    let (embed, components) = render_page(db, ctx, guild_id, 1).await?;
    message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).components(components),
        )
        .await?;

    Ok(())
}

/// `!setup_cargos`: posts the per-command role panel.
pub async fn setup_cargos(
    db: &DatabaseConnection,
    ctx: &Context,
    message: &Message,
    guild_id: GuildId,
) -> Result<(), AppError> {
    let (embed, components) = permission::panel(db, guild_id.get()).await?;
    message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(embed).components(components),
        )
        .await?;

    Ok(())
}
