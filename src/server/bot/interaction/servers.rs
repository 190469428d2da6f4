use dioxus_logger::tracing;
use serenity::all::{ComponentInteraction, Context};

use crate::server::{
    bot::{
        interaction::{component_actor, ephemeral},
        util::{guild_id, guild_name},
    },
    error::AppError,
};

/// "Sair de" button from `!servidores`: the bot leaves that guild.
pub async fn leave(
    ctx: &Context,
    interaction: &ComponentInteraction,
    target: u64,
) -> Result<(), AppError> {
    let (_, actor) = component_actor(interaction)?;
    actor.require_admin()?;

    let target = guild_id(target)
        .ok_or_else(|| AppError::NotFound("Servidor não encontrado.".to_string()))?;
    let name = guild_name(ctx, target);

    // Answer first: leaving the guild the button lives in invalidates the interaction.
    interaction
        .create_response(&ctx.http, ephemeral(format!("👋 Saindo de **{}**...", name)))
        .await?;

    target.leave(&ctx.http).await?;
    tracing::info!(
        "Left guild {} ({}) at the request of {}",
        name,
        target,
        actor.user_id
    );

    Ok(())
}
