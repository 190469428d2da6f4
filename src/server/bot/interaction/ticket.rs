//! Ticket buttons: open, claim, close and reopen.
//!
//! The stored ticket changes first; channel permissions, the control message and the
//! log post follow, each failing on its own into the summary shown to the member.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelType, ComponentInteraction, Context, CreateChannel, CreateInteractionResponse,
    CreateInteractionResponseMessage, CreateMessage, PermissionOverwrite, PermissionOverwriteType,
    Permissions, RoleId, UserId,
};

use crate::server::{
    bot::{
        embed::{ticket_control, ticket_log_embed},
        interaction::{component_actor, ephemeral_followup},
        util::{channel_id, role_id, user_id, Actor, Warnings},
    },
    error::AppError,
    model::ticket::Ticket,
    service::ticket::{TicketActor, TicketService},
};

const MAX_CHANNEL_NAME: usize = 90;

fn ticket_access() -> Permissions {
    Permissions::VIEW_CHANNEL
        | Permissions::SEND_MESSAGES
        | Permissions::READ_MESSAGE_HISTORY
        | Permissions::ATTACH_FILES
}

/// Overwrites for a new ticket channel: hidden from everyone except the opener, the
/// staff role and the bot.
pub fn ticket_overwrites(
    everyone: RoleId,
    opener: UserId,
    bot: UserId,
    staff: Option<RoleId>,
) -> Vec<PermissionOverwrite> {
    let mut overwrites = vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(everyone),
        },
        PermissionOverwrite {
            allow: ticket_access(),
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(opener),
        },
        PermissionOverwrite {
            allow: ticket_access() | Permissions::MANAGE_CHANNELS,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(bot),
        },
    ];
    if let Some(staff) = staff {
        overwrites.push(PermissionOverwrite {
            allow: ticket_access(),
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Role(staff),
        });
    }

    overwrites
}

/// `ticket-<name>` with only lowercase letters, digits and dashes.
pub fn ticket_channel_name(user_name: &str, user_id: u64) -> String {
    let cleaned: String = user_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(MAX_CHANNEL_NAME)
        .collect();

    if cleaned.is_empty() {
        format!("ticket-{}", user_id)
    } else {
        format!("ticket-{}", cleaned)
    }
}

fn ticket_actor(actor: Actor) -> TicketActor {
    TicketActor {
        user_id: actor.user_id,
        is_admin: actor.is_admin,
        role_ids: actor.role_ids,
    }
}

async fn post_log(
    db: &DatabaseConnection,
    ctx: &Context,
    ticket: &Ticket,
    action: &str,
    actor_id: u64,
    warnings: &mut Warnings,
) {
    let settings = match TicketService::new(db).settings(ticket.guild_id).await {
        Ok(settings) => settings,
        Err(e) => {
            warnings.push_err("Não consegui ler as configurações de ticket", e);
            return;
        }
    };
    let Some(channel) = settings.log_channel_id.and_then(channel_id) else {
        return;
    };

    if let Err(e) = channel
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(ticket_log_embed(ticket, action, actor_id)),
        )
        .await
    {
        warnings.push_err("Não consegui registrar no canal de logs", e);
    }
}

/// Replaces the control message with the ticket's current state.
async fn update_control(
    ctx: &Context,
    interaction: &ComponentInteraction,
    ticket: &Ticket,
) -> Result<(), AppError> {
    let (embed, components) = ticket_control(ticket);

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

async fn report_warnings(
    ctx: &Context,
    interaction: &ComponentInteraction,
    summary: &str,
    warnings: Warnings,
) {
    if warnings.is_empty() {
        return;
    }

    if let Err(e) = interaction
        .create_followup(&ctx.http, ephemeral_followup(warnings.render(summary)))
        .await
    {
        tracing::warn!("Failed to report ticket warnings: {}", e);
    }
}

async fn set_opener_access(
    ctx: &Context,
    ticket: &Ticket,
    visible: bool,
) -> Result<(), AppError> {
    let (Some(channel), Some(opener)) = (channel_id(ticket.channel_id), user_id(ticket.opener_id))
    else {
        return Err(AppError::InternalError(format!(
            "ticket {} has a zero id",
            ticket.id
        )));
    };

    let (allow, deny) = if visible {
        (ticket_access(), Permissions::empty())
    } else {
        (Permissions::empty(), Permissions::VIEW_CHANNEL)
    };
    channel
        .create_permission(
            &ctx.http,
            PermissionOverwrite {
                allow,
                deny,
                kind: PermissionOverwriteType::Member(opener),
            },
        )
        .await?;

    Ok(())
}

/// "Abrir Ticket": creates the private channel and its control message.
pub async fn open(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    let service = TicketService::new(db);
    let settings = service
        .check_can_open(guild_id.get(), actor.user_id)
        .await?;
    interaction.defer_ephemeral(&ctx.http).await?;

    let opener = interaction.user.id;
    let bot = ctx.cache.current_user().id;
    let staff = settings.staff_role_id.and_then(role_id);

    let mut builder = CreateChannel::new(ticket_channel_name(&interaction.user.name, opener.get()))
        .kind(ChannelType::Text)
        .permissions(ticket_overwrites(guild_id.everyone_role(), opener, bot, staff));
    if let Some(category) = settings.category_id.and_then(channel_id) {
        builder = builder.category(category);
    }
    let channel = guild_id.create_channel(&ctx.http, builder).await?;

    let ticket = match service
        .record_opened(guild_id.get(), channel.id.get(), opener.get())
        .await
    {
        Ok(ticket) => ticket,
        Err(e) => {
            if let Err(delete_err) = channel.delete(&ctx.http).await {
                tracing::warn!(
                    "Failed to remove unrecorded ticket channel {}: {}",
                    channel.id,
                    delete_err
                );
            }
            return Err(e);
        }
    };

    let mut warnings = Warnings::new();
    let (embed, components) = ticket_control(&ticket);
    let mut greeting = format!("<@{}>", opener);
    if let Some(staff) = staff {
        greeting.push_str(&format!(" <@&{}>", staff));
    }
    match channel
        .id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .content(greeting)
                .embed(embed)
                .components(components),
        )
        .await
    {
        Ok(message) => {
            if let Err(e) = service
                .set_control_message(channel.id.get(), message.id.get())
                .await
            {
                warnings.push_err("Não consegui salvar a mensagem de controle", e);
            }
        }
        Err(e) => warnings.push_err("Não consegui publicar a mensagem de controle", e),
    }

    post_log(db, ctx, &ticket, "aberto", opener.get(), &mut warnings).await;
    tracing::info!(
        "Ticket {} opened by {} in guild {}",
        ticket.id,
        opener,
        guild_id
    );

    interaction
        .create_followup(
            &ctx.http,
            ephemeral_followup(warnings.render(&format!("✅ Ticket criado: <#{}>", channel.id))),
        )
        .await?;

    Ok(())
}

pub async fn claim(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let (_, actor) = component_actor(interaction)?;
    let actor_id = actor.user_id;
    let ticket = TicketService::new(db)
        .claim(interaction.channel_id.get(), &ticket_actor(actor))
        .await?;

    update_control(ctx, interaction, &ticket).await?;

    let mut warnings = Warnings::new();
    post_log(db, ctx, &ticket, "assumido", actor_id, &mut warnings).await;
    report_warnings(ctx, interaction, "✅ Ticket assumido.", warnings).await;

    Ok(())
}

pub async fn close(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let (_, actor) = component_actor(interaction)?;
    let actor_id = actor.user_id;
    let ticket = TicketService::new(db)
        .close(interaction.channel_id.get(), &ticket_actor(actor))
        .await?;

    update_control(ctx, interaction, &ticket).await?;

    let mut warnings = Warnings::new();
    if let Err(e) = set_opener_access(ctx, &ticket, false).await {
        warnings.push_err("Não consegui remover o acesso de quem abriu o ticket", e);
    }
    post_log(db, ctx, &ticket, "fechado", actor_id, &mut warnings).await;
    report_warnings(ctx, interaction, "🔒 Ticket fechado.", warnings).await;

    Ok(())
}

pub async fn reopen(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
) -> Result<(), AppError> {
    let (_, actor) = component_actor(interaction)?;
    let actor_id = actor.user_id;
    let ticket = TicketService::new(db)
        .reopen(interaction.channel_id.get(), &ticket_actor(actor))
        .await?;

    update_control(ctx, interaction, &ticket).await?;

    let mut warnings = Warnings::new();
    if let Err(e) = set_opener_access(ctx, &ticket, true).await {
        warnings.push_err("Não consegui devolver o acesso de quem abriu o ticket", e);
    }
    post_log(db, ctx, &ticket, "reaberto", actor_id, &mut warnings).await;
    report_warnings(ctx, interaction, "🔓 Ticket reaberto.", warnings).await;

    Ok(())
}
