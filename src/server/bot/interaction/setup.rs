//! The five-page `!setup` wizard.
//!
//! Every select persists its value as soon as it is picked, after the bot checked it
//! can actually use the channel or role. The page is then re-rendered in place with the
//! new value and an up-to-date health check.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{
    ButtonStyle, ChannelType, ComponentInteraction, Context, CreateActionRow, CreateButton,
    CreateEmbed, CreateEmbedFooter, CreateInteractionResponse, CreateInteractionResponseMessage,
    CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, GuildId,
};

use crate::server::{
    bot::{
        custom_id::{CustomId, TicketSetting, VoiceSetting},
        interaction::{component_actor, selected_ids, selected_value},
        layout::{ComponentLayout, LayoutRow},
        util::{bot_member, channel_id, role_id, COLOR_PANEL},
    },
    data::ticket::TicketSettingsUpdate,
    error::AppError,
    model::{
        settings::{FieldKind, GuildSettings, SettingsField},
        ticket::TicketSettings,
        voice::VoiceSettings,
    },
    service::{
        settings::{
            check_channel_capabilities, check_health, check_role_capabilities, SettingsHealth,
            SettingsService,
        },
        ticket::TicketService,
        voice::VoiceService,
    },
};

pub const PAGE_COUNT: u8 = 5;

const TICKET_PAGE: u8 = 4;
const VOICE_PAGE: u8 = 5;
const MAX_OPEN_CHOICES: i32 = 5;

fn page_title(page: u8) -> &'static str {
    match page {
        1 => "Cadastro",
        2 => "Moderação",
        3 => "Cargos",
        4 => "Tickets",
        _ => "Voz",
    }
}

fn page_fields(page: u8) -> &'static [SettingsField] {
    match page {
        1 => &[
            SettingsField::RegistrationChannel,
            SettingsField::ApprovalChannel,
            SettingsField::RecordsChannel,
            SettingsField::WelcomeChannel,
        ],
        2 => &[SettingsField::ExitChannel, SettingsField::WarningsChannel],
        3 => &[
            SettingsField::ProvisionalRole,
            SettingsField::MemberRole,
            SettingsField::Adv1Role,
            SettingsField::Adv2Role,
        ],
        _ => &[],
    }
}

fn page_of(field: SettingsField) -> u8 {
    (1..=3)
        .find(|page| page_fields(*page).contains(&field))
        .unwrap_or(1)
}

fn channel_mention(id: Option<u64>) -> String {
    id.map(|id| format!("<#{}>", id))
        .unwrap_or_else(|| "Não configurado".to_string())
}

fn role_mention(id: Option<u64>) -> String {
    id.map(|id| format!("<@&{}>", id))
        .unwrap_or_else(|| "Não configurado".to_string())
}

fn list_mentions(ids: &[u64], format: fn(u64) -> String) -> String {
    if ids.is_empty() {
        "Nenhum".to_string()
    } else {
        ids.iter().map(|id| format(*id)).collect::<Vec<_>>().join(", ")
    }
}

fn channel_select(
    custom_id: CustomId,
    placeholder: &str,
    types: Vec<ChannelType>,
    current: &[u64],
) -> CreateSelectMenu {
    let defaults: Vec<_> = current.iter().filter_map(|id| channel_id(*id)).collect();

    CreateSelectMenu::new(
        custom_id.to_string(),
        CreateSelectMenuKind::Channel {
            channel_types: Some(types),
            default_channels: (!defaults.is_empty()).then_some(defaults),
        },
    )
    .placeholder(placeholder)
}

fn role_select(custom_id: CustomId, placeholder: &str, current: &[u64]) -> CreateSelectMenu {
    let defaults: Vec<_> = current.iter().filter_map(|id| role_id(*id)).collect();

    CreateSelectMenu::new(
        custom_id.to_string(),
        CreateSelectMenuKind::Role {
            default_roles: (!defaults.is_empty()).then_some(defaults),
        },
    )
    .placeholder(placeholder)
}

fn field_select(field: SettingsField, settings: &GuildSettings) -> CreateSelectMenu {
    let current: Vec<u64> = settings.get(field).into_iter().collect();
    let custom_id = CustomId::SetupField(field);

    match field.kind() {
        FieldKind::Channel => {
            channel_select(custom_id, field.label(), vec![ChannelType::Text], &current)
        }
        FieldKind::Role => role_select(custom_id, field.label(), &current),
    }
}

fn nav_buttons(current: u8) -> Vec<CreateButton> {
    (1..=PAGE_COUNT)
        .map(|page| {
            CreateButton::new(CustomId::SetupPage(page).to_string())
                .label(format!("{}. {}", page, page_title(page)))
                .style(if page == current {
                    ButtonStyle::Primary
                } else {
                    ButtonStyle::Secondary
                })
                .disabled(page == current)
        })
        .collect()
}

/// Health section shown on every page.
pub fn health_text(health: &SettingsHealth) -> String {
    if health.is_healthy() {
        return "✅ Tudo certo".to_string();
    }

    let mut lines = Vec::new();
    if !health.stale.is_empty() {
        lines.push("**Não existem mais:**".to_string());
        lines.extend(health.stale.iter().map(|f| format!("❌ {}", f.label())));
    }
    if !health.missing_critical.is_empty() {
        lines.push("**Essenciais pendentes:**".to_string());
        lines.extend(
            health
                .missing_critical
                .iter()
                .map(|f| format!("⚠️ {}", f.label())),
        );
    }

    lines.join("\n")
}

fn ticket_rows(tickets: &TicketSettings) -> (String, Vec<CreateSelectMenu>) {
    let description = format!(
        "**Categoria:** {}\n**Canal de logs:** {}\n**Cargo da equipe:** {}\n**Tickets por membro:** {}",
        channel_mention(tickets.category_id),
        channel_mention(tickets.log_channel_id),
        role_mention(tickets.staff_role_id),
        tickets.max_open_per_user
    );

    let max_options = (1..=MAX_OPEN_CHOICES)
        .map(|n| {
            CreateSelectMenuOption::new(format!("{} por membro", n), n.to_string())
                .default_selection(n == tickets.max_open_per_user)
        })
        .collect();

    let selects = vec![
        channel_select(
            CustomId::SetupTicket(TicketSetting::Category),
            "Categoria dos tickets",
            vec![ChannelType::Category],
            &tickets.category_id.into_iter().collect::<Vec<_>>(),
        ),
        channel_select(
            CustomId::SetupTicket(TicketSetting::LogChannel),
            "Canal de logs",
            vec![ChannelType::Text],
            &tickets.log_channel_id.into_iter().collect::<Vec<_>>(),
        ),
        role_select(
            CustomId::SetupTicket(TicketSetting::StaffRole),
            "Cargo da equipe",
            &tickets.staff_role_id.into_iter().collect::<Vec<_>>(),
        ),
        CreateSelectMenu::new(
            CustomId::SetupTicket(TicketSetting::MaxOpen).to_string(),
            CreateSelectMenuKind::String {
                options: max_options,
            },
        )
        .placeholder("Tickets abertos por membro"),
    ];

    (description, selects)
}

fn voice_rows(voice: &VoiceSettings) -> (String, Vec<CreateSelectMenu>, CreateButton) {
    let description = format!(
        "**Monitorar todos os canais:** {}\n**Canal AFK:** {}\n**Cargos contabilizados:** {}\n**Canais monitorados:** {}",
        if voice.monitor_all { "Sim" } else { "Não" },
        channel_mention(voice.afk_channel_id),
        list_mentions(&voice.allowed_role_ids, |id| format!("<@&{}>", id)),
        list_mentions(&voice.monitored_channel_ids, |id| format!("<#{}>", id)),
    );

    let selects = vec![
        channel_select(
            CustomId::SetupVoice(VoiceSetting::AfkChannel),
            "Canal AFK",
            vec![ChannelType::Voice],
            &voice.afk_channel_id.into_iter().collect::<Vec<_>>(),
        ),
        role_select(
            CustomId::SetupVoice(VoiceSetting::AllowedRoles),
            "Cargos contabilizados (vazio = todos)",
            &voice.allowed_role_ids,
        )
        .min_values(0)
        .max_values(25),
        channel_select(
            CustomId::SetupVoice(VoiceSetting::MonitoredChannels),
            "Canais monitorados",
            vec![ChannelType::Voice, ChannelType::Stage],
            &voice.monitored_channel_ids,
        )
        .min_values(0)
        .max_values(25),
    ];

    let toggle = CreateButton::new(CustomId::SetupVoice(VoiceSetting::MonitorAll).to_string())
        .label(if voice.monitor_all {
            "Monitorar todos: Sim"
        } else {
            "Monitorar todos: Não"
        })
        .style(if voice.monitor_all {
            ButtonStyle::Success
        } else {
            ButtonStyle::Secondary
        });

    (description, selects, toggle)
}

/// Builds one wizard page from already loaded settings.
///
/// # Returns
/// - `Ok((embed, components))` - Page ready to send or update in place
/// - `Err(AppError::Validation)` - Page outside 1..=5
pub fn build_page(
    page: u8,
    settings: &GuildSettings,
    tickets: &TicketSettings,
    voice: &VoiceSettings,
    health: &SettingsHealth,
) -> Result<(CreateEmbed, Vec<CreateActionRow>), AppError> {
    if !(1..=PAGE_COUNT).contains(&page) {
        return Err(AppError::Validation(format!(
            "Página {} inexistente.",
            page
        )));
    }

    let (description, rows) = match page {
        TICKET_PAGE => {
            let (description, selects) = ticket_rows(tickets);
            let mut rows: Vec<LayoutRow> = selects.into_iter().map(LayoutRow::Select).collect();
            rows.push(LayoutRow::Buttons(nav_buttons(page)));
            (description, rows)
        }
        VOICE_PAGE => {
            let (description, selects, toggle) = voice_rows(voice);
            let mut rows: Vec<LayoutRow> = selects.into_iter().map(LayoutRow::Select).collect();
            rows.push(LayoutRow::Buttons(vec![toggle]));
            rows.push(LayoutRow::Buttons(nav_buttons(page)));
            (description, rows)
        }
        _ => {
            let fields = page_fields(page);
            let description = fields
                .iter()
                .map(|field| {
                    let value = settings.get(*field);
                    let shown = match field.kind() {
                        FieldKind::Channel => channel_mention(value),
                        FieldKind::Role => role_mention(value),
                    };
                    format!("**{}:** {}", field.label(), shown)
                })
                .collect::<Vec<_>>()
                .join("\n");
            let mut rows: Vec<LayoutRow> = fields
                .iter()
                .map(|field| LayoutRow::Select(field_select(*field, settings)))
                .collect();
            rows.push(LayoutRow::Buttons(nav_buttons(page)));
            (description, rows)
        }
    };

    let embed = CreateEmbed::new()
        .title(format!(
            "⚙️ Configuração • {} ({}/{})",
            page_title(page),
            page,
            PAGE_COUNT
        ))
        .description(description)
        .field("Saúde da configuração", health_text(health), false)
        .color(COLOR_PANEL)
        .footer(CreateEmbedFooter::new(
            "Cada seleção é salva imediatamente.",
        ));

    Ok((embed, ComponentLayout::new(rows)?.into_components()))
}

/// Loads everything a page shows and renders it.
pub async fn render_page(
    db: &DatabaseConnection,
    ctx: &Context,
    guild_id: GuildId,
    page: u8,
) -> Result<(CreateEmbed, Vec<CreateActionRow>), AppError> {
    let settings = SettingsService::new(db)
        .get_or_create(guild_id.get())
        .await?;
    let tickets = TicketService::new(db).settings(guild_id.get()).await?;
    let voice = VoiceService::new(db).settings(guild_id.get()).await?;

    let health = {
        let guild = ctx.cache.guild(guild_id);
        check_health(Some(&settings), |field, id| match &guild {
            // Without a cached guild nothing can be judged stale.
            None => true,
            Some(guild) => match field.kind() {
                FieldKind::Channel => {
                    channel_id(id).is_some_and(|c| guild.channels.contains_key(&c))
                }
                FieldKind::Role => role_id(id).is_some_and(|r| guild.roles.contains_key(&r)),
            },
        })
    };

    build_page(page, &settings, &tickets, &voice, &health)
}

async fn update_page(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    guild_id: GuildId,
    page: u8,
) -> Result<(), AppError> {
    let (embed, components) = render_page(db, ctx, guild_id, page).await?;

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

fn guild_not_cached() -> AppError {
    AppError::NotFound("Servidor indisponível no cache, tente novamente.".to_string())
}

/// Checks that a selected channel exists and, for posting channels, that the bot can
/// post embeds in it.
pub(super) async fn validate_channel(
    ctx: &Context,
    guild_id: GuildId,
    id: u64,
    posts_embeds: bool,
) -> Result<(), AppError> {
    let bot = bot_member(ctx, guild_id).await?;
    let guild = ctx.cache.guild(guild_id).ok_or_else(guild_not_cached)?;
    let channel = channel_id(id)
        .and_then(|c| guild.channels.get(&c))
        .ok_or_else(|| AppError::NotFound("Canal não encontrado.".to_string()))?;

    if posts_embeds {
        check_channel_capabilities(&channel.name, guild.user_permissions_in(channel, &bot))?;
    }

    Ok(())
}

/// Checks that the bot can assign and remove a selected role.
async fn validate_role(ctx: &Context, guild_id: GuildId, id: u64) -> Result<(), AppError> {
    let bot = bot_member(ctx, guild_id).await?;
    let guild = ctx.cache.guild(guild_id).ok_or_else(guild_not_cached)?;
    let role = role_id(id)
        .and_then(|r| guild.roles.get(&r))
        .ok_or_else(|| AppError::NotFound("Cargo não encontrado.".to_string()))?;

    let bot_top_position = bot
        .roles
        .iter()
        .filter_map(|r| guild.roles.get(r))
        .map(|r| r.position)
        .max()
        .unwrap_or(0);

    check_role_capabilities(role, bot_top_position, guild.member_permissions(&bot))
}

pub async fn show_page(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    page: u8,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    actor.require_admin()?;

    update_page(db, ctx, interaction, guild_id, page).await
}

/// Stores a channel or role field from pages 1 to 3.
pub async fn set_field(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    field: SettingsField,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    actor.require_admin()?;

    let value = selected_ids(interaction).first().copied();
    if let Some(id) = value {
        match field.kind() {
            FieldKind::Channel => validate_channel(ctx, guild_id, id, true).await?,
            FieldKind::Role => validate_role(ctx, guild_id, id).await?,
        }
    }

    SettingsService::new(db)
        .set_field(guild_id.get(), field, value)
        .await?;
    tracing::info!(
        "Guild {} set {} to {:?}",
        guild_id,
        field.key(),
        value
    );

    update_page(db, ctx, interaction, guild_id, page_of(field)).await
}

pub async fn set_ticket(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    setting: TicketSetting,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    actor.require_admin()?;

    let first = selected_ids(interaction).first().copied();
    let update = match setting {
        TicketSetting::Category => {
            if let Some(id) = first {
                validate_channel(ctx, guild_id, id, false).await?;
            }
            TicketSettingsUpdate::Category(first)
        }
        TicketSetting::LogChannel => {
            if let Some(id) = first {
                validate_channel(ctx, guild_id, id, true).await?;
            }
            TicketSettingsUpdate::LogChannel(first)
        }
        TicketSetting::StaffRole => TicketSettingsUpdate::StaffRole(first),
        TicketSetting::MaxOpen => {
            let max = selected_value(interaction)
                .and_then(|v| v.parse::<i32>().ok())
                .ok_or_else(|| AppError::Validation("Escolha um limite válido.".to_string()))?;
            TicketSettingsUpdate::MaxOpenPerUser(max)
        }
    };

    TicketService::new(db)
        .update_settings(guild_id.get(), update)
        .await?;

    update_page(db, ctx, interaction, guild_id, TICKET_PAGE).await
}

pub async fn set_voice(
    db: &DatabaseConnection,
    ctx: &Context,
    interaction: &ComponentInteraction,
    setting: VoiceSetting,
) -> Result<(), AppError> {
    let (guild_id, actor) = component_actor(interaction)?;
    actor.require_admin()?;

    let service = VoiceService::new(db);
    let selected = selected_ids(interaction);
    match setting {
        VoiceSetting::AfkChannel => {
            service
                .set_afk_channel(guild_id.get(), selected.first().copied())
                .await?
        }
        VoiceSetting::AllowedRoles => service.set_allowed_roles(guild_id.get(), &selected).await?,
        VoiceSetting::MonitoredChannels => {
            service
                .set_monitored_channels(guild_id.get(), &selected)
                .await?
        }
        VoiceSetting::MonitorAll => {
            let current = service.settings(guild_id.get()).await?;
            service
                .set_monitor_all(guild_id.get(), !current.monitor_all)
                .await?
        }
    }

    update_page(db, ctx, interaction, guild_id, VOICE_PAGE).await
}
