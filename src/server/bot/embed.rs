//! Embed and component builders shared by commands, interactions and handlers.

use serenity::all::{
    ButtonStyle, CreateActionRow, CreateButton, CreateEmbed, CreateEmbedFooter, Timestamp,
};

use crate::model::dashboard::format_brl;
use crate::server::{
    bot::{
        custom_id::{ActionButton, CustomId},
        util::{
            channel_mention, COLOR_DANGER, COLOR_INFO, COLOR_NEUTRAL, COLOR_PANEL, COLOR_SUCCESS,
            COLOR_WARNING,
        },
    },
    model::{
        action::{ActionResult, ActionRoster, ActionSettings, ActionStat, ActionType},
        registration::{Registration, RegistrationStatus},
        ticket::{Ticket, TicketStatus},
        voice::{VoiceTime, VoiceTotal},
        warning::{WarningAction, WarningOutcome},
    },
    service::voice::{format_duration, MemberVoiceReport},
};

fn status_label(status: RegistrationStatus) -> &'static str {
    match status {
        RegistrationStatus::Pending => "⏳ Pendente",
        RegistrationStatus::Approved => "✅ Aprovado",
        RegistrationStatus::Rejected => "❌ Recusado",
    }
}

fn registration_fields(embed: CreateEmbed, registration: &Registration) -> CreateEmbed {
    embed
        .field("Membro", format!("<@{}>", registration.user_id), true)
        .field("Nome", &registration.display_name, true)
        .field("ID no servidor", &registration.assigned_id, true)
        .field("Recrutado por", &registration.recruiter_id, true)
}

/// Public panel posted by `!set`.
pub fn registration_panel() -> (CreateEmbed, Vec<CreateActionRow>) {
    let embed = CreateEmbed::new()
        .title("🎯 Cadastro de Membro")
        .description(
            "Clique no botão abaixo para iniciar seu cadastro.\n\n\
             ✅ Siga as regras do servidor antes de enviar.\n\
             🛟 Precisa de ajuda? Fale com a staff.",
        )
        .field(
            "Regras rápidas",
            "• Respeite a comunidade\n• Sem SPAM\n• Use IDs corretos\n• Aguarde aprovação",
            false,
        )
        .footer(CreateEmbedFooter::new("Golias Bot • Cadastro"))
        .color(COLOR_PANEL);
    let button = CreateButton::new(CustomId::RegistrationStart.to_string())
        .label("Cadastrar")
        .style(ButtonStyle::Success);

    (embed, vec![CreateActionRow::Buttons(vec![button])])
}

/// Review message posted to the approval channel.
pub fn review_embed(registration: &Registration) -> CreateEmbed {
    registration_fields(
        CreateEmbed::new()
            .title("📝 Novo cadastro")
            .color(COLOR_WARNING)
            .footer(CreateEmbedFooter::new(format!(
                "Cadastro #{}",
                registration.id
            ))),
        registration,
    )
    .field("Status", status_label(registration.status), false)
}

/// Approve/Reject buttons for a pending record.
pub fn review_components(registration_id: i32) -> Vec<CreateActionRow> {
    vec![CreateActionRow::Buttons(vec![
        CreateButton::new(CustomId::RegistrationApprove(registration_id).to_string())
            .label("Aprovar")
            .style(ButtonStyle::Success),
        CreateButton::new(CustomId::RegistrationReject(registration_id).to_string())
            .label("Recusar")
            .style(ButtonStyle::Danger),
    ])]
}

/// Review message after a decision.
pub fn decided_embed(registration: &Registration) -> CreateEmbed {
    let color = match registration.status {
        RegistrationStatus::Approved => COLOR_SUCCESS,
        RegistrationStatus::Rejected => COLOR_DANGER,
        RegistrationStatus::Pending => COLOR_WARNING,
    };
    let decided_by = registration
        .moderator_id
        .map(|id| format!("{} por <@{}>", status_label(registration.status), id))
        .unwrap_or_else(|| status_label(registration.status).to_string());

    registration_fields(
        CreateEmbed::new()
            .title("📝 Cadastro")
            .color(color)
            .footer(CreateEmbedFooter::new(format!(
                "Cadastro #{}",
                registration.id
            ))),
        registration,
    )
    .field("Status", decided_by, false)
}

/// Record embed posted to the records channel on approval.
pub fn record_embed(registration: &Registration) -> CreateEmbed {
    let mut embed = registration_fields(
        CreateEmbed::new().title("📁 Registro de membro").color(COLOR_SUCCESS),
        registration,
    );
    if let Some(moderator_id) = registration.moderator_id {
        embed = embed.field("Aprovado por", format!("<@{}>", moderator_id), true);
    }
    if let Ok(timestamp) = Timestamp::from_unix_timestamp(
        registration
            .decided_at
            .unwrap_or(registration.created_at)
            .timestamp(),
    ) {
        embed = embed.timestamp(timestamp);
    }

    embed
}

pub fn welcome_embed(user_id: u64, user_name: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("👋 Bem-vindo(a)!")
        .description(format!(
            "<@{}> entrou no servidor. Faça seu cadastro no canal de cadastro para liberar o acesso.",
            user_id
        ))
        .footer(CreateEmbedFooter::new(user_name))
        .color(COLOR_INFO)
}

/// Exit report for a departed member.
pub fn exit_embed(
    user_id: u64,
    user_name: &str,
    registration: Option<&Registration>,
    warning_count: i32,
    voice_seconds: i64,
) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("🚪 Membro saiu")
        .description(format!("<@{}> ({}) saiu do servidor.", user_id, user_name))
        .color(COLOR_NEUTRAL);

    embed = match registration {
        Some(registration) => embed
            .field("Nome", &registration.display_name, true)
            .field("ID no servidor", &registration.assigned_id, true)
            .field("Cadastro", status_label(registration.status), true),
        None => embed.field("Cadastro", "Nenhum cadastro encontrado", false),
    };

    embed
        .field("Advertências", warning_count.to_string(), true)
        .field("Tempo em call", format_duration(voice_seconds), true)
}

/// Discipline log embed.
pub fn warning_embed(
    user_id: u64,
    moderator_id: u64,
    reason: &str,
    outcome: WarningOutcome,
) -> CreateEmbed {
    let (title, color) = match outcome.action {
        WarningAction::Ban => ("🚫 Usuário banido por advertências", COLOR_DANGER),
        _ => ("⚠️ Advertência aplicada", COLOR_WARNING),
    };

    CreateEmbed::new()
        .title(title)
        .color(color)
        .field("Membro", format!("<@{}>", user_id), true)
        .field("Moderador", format!("<@{}>", moderator_id), true)
        .field("Advertências", outcome.count.to_string(), true)
        .field("Ação", outcome.action.label(), true)
        .field("Motivo", reason, false)
}

/// `!ficha` card.
pub fn member_card_embed(
    user_id: u64,
    registration: Option<&Registration>,
    warning_count: i32,
    voice_seconds: i64,
) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title("🗂️ Ficha do membro")
        .description(format!("<@{}>", user_id))
        .color(COLOR_INFO);

    embed = match registration {
        Some(registration) => registration_fields(embed, registration)
            .field("Status", status_label(registration.status), true),
        None => embed.field("Cadastro", "Nenhum cadastro encontrado", false),
    };

    embed
        .field("Advertências", warning_count.to_string(), true)
        .field("Tempo em call", format_duration(voice_seconds), true)
}

/// `!ponto` report.
pub fn voice_report_embed(user_id: u64, report: &MemberVoiceReport) -> CreateEmbed {
    let mut lines: Vec<String> = report
        .channels
        .iter()
        .map(|VoiceTime { channel_id, total_seconds }| {
            format!("{}: {}", channel_mention(*channel_id), format_duration(*total_seconds))
        })
        .collect();

    if lines.is_empty() {
        lines.push("Nenhum tempo registrado.".to_string());
    }
    if report.extra_channels > 0 {
        lines.push(format!("+{} canal(is) adicional(is)", report.extra_channels));
    }

    CreateEmbed::new()
        .title("⏱️ Tempo em call")
        .description(format!("<@{}>\n\n{}", user_id, lines.join("\n")))
        .field("Total", format_duration(report.total_seconds), false)
        .color(COLOR_INFO)
}

/// `!ponto_relatorio` ranking.
pub fn voice_ranking_embed(ranking: &[VoiceTotal]) -> CreateEmbed {
    let description = if ranking.is_empty() {
        "Nenhum tempo registrado.".to_string()
    } else {
        ranking
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let place = match i {
                    0 => "🥇".to_string(),
                    1 => "🥈".to_string(),
                    2 => "🥉".to_string(),
                    n => format!("{}.", n + 1),
                };
                format!(
                    "{} <@{}>: {}",
                    place,
                    entry.user_id,
                    format_duration(entry.total_seconds)
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    CreateEmbed::new()
        .title("🏆 Ranking de tempo em call")
        .description(description)
        .color(COLOR_INFO)
}

pub fn ticket_panel() -> (CreateEmbed, Vec<CreateActionRow>) {
    let embed = CreateEmbed::new()
        .title("🎫 Suporte")
        .description("Precisa de ajuda? Clique no botão abaixo para abrir um ticket.")
        .color(COLOR_INFO);
    let button = CreateButton::new(CustomId::TicketOpen.to_string())
        .label("Abrir Ticket")
        .style(ButtonStyle::Primary);

    (embed, vec![CreateActionRow::Buttons(vec![button])])
}

/// Control message inside a ticket channel, reflecting its current state.
pub fn ticket_control(ticket: &Ticket) -> (CreateEmbed, Vec<CreateActionRow>) {
    let mut embed = CreateEmbed::new()
        .title(format!("🎫 Ticket #{}", ticket.id))
        .field("Aberto por", format!("<@{}>", ticket.opener_id), true)
        .field(
            "Responsável",
            ticket
                .claimed_by
                .map(|id| format!("<@{}>", id))
                .unwrap_or_else(|| "Ninguém".to_string()),
            true,
        );

    let buttons = match ticket.status {
        TicketStatus::Open => {
            embed = embed.color(COLOR_SUCCESS).field("Status", "Aberto", true);
            vec![
                CreateButton::new(CustomId::TicketClaim.to_string())
                    .label("Assumir")
                    .style(ButtonStyle::Primary)
                    .disabled(ticket.claimed_by.is_some()),
                CreateButton::new(CustomId::TicketClose.to_string())
                    .label("Fechar")
                    .style(ButtonStyle::Danger),
            ]
        }
        TicketStatus::Closed => {
            embed = embed.color(COLOR_NEUTRAL).field("Status", "Fechado", true);
            vec![CreateButton::new(CustomId::TicketReopen.to_string())
                .label("Reabrir")
                .style(ButtonStyle::Secondary)]
        }
    };

    (embed, vec![CreateActionRow::Buttons(buttons)])
}

pub fn ticket_log_embed(ticket: &Ticket, action: &str, actor_id: u64) -> CreateEmbed {
    CreateEmbed::new()
        .title(format!("🎫 Ticket #{} {}", ticket.id, action))
        .field("Canal", format!("<#{}>", ticket.channel_id), true)
        .field("Aberto por", format!("<@{}>", ticket.opener_id), true)
        .field("Por", format!("<@{}>", actor_id), true)
        .color(COLOR_NEUTRAL)
}

/// Participants listed on an action before the rest are summarized.
const LISTED_PARTICIPANTS: usize = 15;
const LISTED_REMOVED: usize = 10;

fn mention_list(user_ids: &[u64], limit: usize) -> String {
    let mut lines: Vec<String> = user_ids
        .iter()
        .take(limit)
        .enumerate()
        .map(|(i, id)| format!("{}. <@{}>", i + 1, id))
        .collect();
    if user_ids.len() > limit {
        lines.push(format!("*+ {} mais*", user_ids.len() - limit));
    }
    lines.join("\n")
}

fn action_button(button: ActionButton, action_id: i32, label: &str) -> CreateButton {
    let style = match button {
        ActionButton::Join | ActionButton::Open | ActionButton::Win => ButtonStyle::Success,
        ActionButton::Leave | ActionButton::Close | ActionButton::Remove => ButtonStyle::Secondary,
        ActionButton::Restore => ButtonStyle::Primary,
        ActionButton::Defeat | ActionButton::Cancel => ButtonStyle::Danger,
    };

    CreateButton::new(CustomId::Action(button, action_id).to_string())
        .label(label)
        .style(style)
}

/// Posted action with buttons matching its state. Finished actions have none.
pub fn action_message(roster: &ActionRoster) -> (CreateEmbed, Vec<CreateActionRow>) {
    let action = &roster.action;
    let count = roster.participants.len();

    let status = match (action.result, action.registrations_open) {
        (Some(ActionResult::Victory), _) => "🏆 Finalizada com vitória",
        (Some(ActionResult::Defeat), _) => "💀 Finalizada com derrota",
        (None, true) => "🟢 Inscrições abertas",
        (None, false) => "🟡 Aguardando abertura das inscrições",
    };
    let share = if count == 0 {
        "Aguardando inscritos...".to_string()
    } else {
        format_brl(action.total_value_cents / count as i64)
    };
    let color = match action.result {
        Some(ActionResult::Victory) => COLOR_SUCCESS,
        Some(ActionResult::Defeat) => COLOR_DANGER,
        None => COLOR_INFO,
    };

    let mut embed = CreateEmbed::new()
        .title(format!("🎯 {}", action.type_name))
        .description(format!("**Status:** {}", status))
        .field("💰 Valor Total", format_brl(action.total_value_cents), true)
        .field(
            "👥 Players",
            format!("{}/{}", count, action.max_players),
            true,
        )
        .field("📊 Rateio por Player", share, true)
        .footer(CreateEmbedFooter::new(format!("Ação ID: {}", action.id)))
        .color(color);

    let participants: Vec<u64> = roster.participants.iter().map(|p| p.user_id).collect();
    embed = embed.field(
        format!("✅ Inscritos ({})", count),
        if participants.is_empty() {
            "Ninguém inscrito ainda.".to_string()
        } else {
            mention_list(&participants, LISTED_PARTICIPANTS)
        },
        false,
    );

    if !roster.removed.is_empty() {
        let removed: Vec<u64> = roster.removed.iter().map(|p| p.user_id).collect();
        embed = embed.field(
            format!("🚫 Removidos ({})", removed.len()),
            mention_list(&removed, LISTED_REMOVED),
            false,
        );
    }

    if let Some(result) = action.result {
        let (title, text) = match result {
            ActionResult::Victory => (
                "🏆 Resultado Final",
                format!(
                    "Vitória! {} dividido entre {} participante(s).",
                    format_brl(action.total_value_cents),
                    count
                ),
            ),
            ActionResult::Defeat => ("💀 Resultado Final", "Derrota.".to_string()),
        };
        return (embed.field(title, text, false), Vec::new());
    }

    if !action.registrations_open {
        embed = embed.field(
            "🔒 Status de Inscrições",
            "**Fechadas** - Aguarde o responsável abrir",
            false,
        );
    }

    let open = action.registrations_open;
    let id = action.id;
    let rows = vec![
        CreateActionRow::Buttons(vec![
            action_button(ActionButton::Join, id, "Participar").disabled(!open || roster.is_full()),
            action_button(ActionButton::Leave, id, "Sair").disabled(!open),
            action_button(ActionButton::Open, id, "Abrir Inscrições").disabled(open),
            action_button(ActionButton::Close, id, "Fechar Inscrições").disabled(!open),
        ]),
        CreateActionRow::Buttons(vec![
            action_button(ActionButton::Win, id, "Vitória").disabled(open),
            action_button(ActionButton::Defeat, id, "Derrota").disabled(open),
            action_button(ActionButton::Remove, id, "Remover"),
            action_button(ActionButton::Restore, id, "Restaurar"),
            action_button(ActionButton::Cancel, id, "Cancelar"),
        ]),
    ];

    (embed, rows)
}

/// Ranking kept up to date in the configured ranking channel.
pub fn action_ranking_embed(ranking: &[ActionStat]) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .title("🏆 Ranking de Ações")
        .timestamp(Timestamp::now())
        .color(COLOR_PANEL);

    if ranking.is_empty() {
        return embed.field(
            "📊 Nenhum participante ainda",
            "Finalize uma ação para aparecer aqui.",
            false,
        );
    }

    let mut members = Vec::new();
    let mut counts = Vec::new();
    let mut earned = Vec::new();
    for (i, stat) in ranking.iter().enumerate() {
        let place = match i {
            0 => "🥇".to_string(),
            1 => "🥈".to_string(),
            2 => "🥉".to_string(),
            n => format!("{}.", n + 1),
        };
        members.push(format!("{} <@{}>", place, stat.user_id));
        counts.push(stat.participations.to_string());
        earned.push(format_brl(stat.total_earned_cents));
    }

    embed
        .field("🏆 Posição & Usuário", members.join("\n"), true)
        .field("📊 Ações", counts.join("\n"), true)
        .field("💰 Total Ganho", earned.join("\n"), true)
}

fn optional_channel(id: Option<u64>, unset: &str) -> String {
    id.map(|id| format!("<#{}>", id))
        .unwrap_or_else(|| unset.to_string())
}

/// `!acao_setup` panel summary.
pub fn action_setup_embed(settings: &ActionSettings, types: &[ActionType]) -> CreateEmbed {
    let roles = if settings.responsible_role_ids.is_empty() {
        "Apenas administradores".to_string()
    } else {
        settings
            .responsible_role_ids
            .iter()
            .map(|id| format!("<@&{}>", id))
            .collect::<Vec<_>>()
            .join(", ")
    };

    CreateEmbed::new()
        .title("⚙️ Configuração de Ações")
        .description("Use os menus abaixo para configurar o sistema de ações.")
        .field("👮 Responsáveis", roles, false)
        .field(
            "📢 Canal de ações",
            optional_channel(settings.action_channel_id, "Canal onde `!acao` for usado"),
            true,
        )
        .field(
            "🏆 Canal de ranking",
            optional_channel(settings.ranking_channel_id, "Não configurado"),
            true,
        )
        .field(
            format!("🎯 Tipos de ação ({})", types.len()),
            action_type_list(types, 10),
            false,
        )
        .color(COLOR_PANEL)
}

/// One line per type, summarized after `limit`.
pub fn action_type_list(types: &[ActionType], limit: usize) -> String {
    if types.is_empty() {
        return "Nenhum tipo cadastrado.".to_string();
    }

    let mut lines: Vec<String> = types
        .iter()
        .take(limit)
        .map(|t| {
            format!(
                "**{}** · {}-{} players · {}",
                t.name,
                t.min_players,
                t.max_players,
                format_brl(t.total_value_cents)
            )
        })
        .collect();
    if types.len() > limit {
        lines.push(format!("*+ {} mais*", types.len() - limit));
    }
    lines.join("\n")
}

/// `!convite` message with a link button to add the bot elsewhere.
pub fn invite_message(invite_url: &str) -> (CreateEmbed, Vec<CreateActionRow>) {
    let embed = CreateEmbed::new()
        .title("Siga o GoliasBot para outros servidores!")
        .description(
            "Gostou do bot? Adicione o GoliasBot ao seu servidor e tenha cadastro, \
             advertências, tickets, ponto de voz e ações em um só lugar.",
        )
        .color(COLOR_PANEL);
    let button = CreateButton::new_link(invite_url)
        .label("Convidar Bot")
        .emoji('➕');

    (embed, vec![CreateActionRow::Buttons(vec![button])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::model::action::{Action, ActionStatus, Participant};
    use chrono::Utc;
    use serde_json::Value;

    fn registration(status: RegistrationStatus) -> Registration {
        Registration {
            id: 12,
            guild_id: 1,
            user_id: 900,
            display_name: "João".to_string(),
            assigned_id: "4521".to_string(),
            recruiter_id: "77".to_string(),
            status,
            approval_channel_id: Some(40),
            approval_message_id: Some(41),
            moderator_id: Some(5),
            created_at: Utc::now(),
            decided_at: None,
        }
    }

    fn json(embed: &CreateEmbed) -> Value {
        serde_json::to_value(embed).unwrap()
    }

    #[test]
    fn warning_embed_title_depends_on_action() {
        let warn = warning_embed(
            1,
            2,
            "spam",
            WarningOutcome {
                count: 1,
                action: WarningAction::AssignAdv1,
            },
        );
        let ban = warning_embed(
            1,
            2,
            "spam",
            WarningOutcome {
                count: 3,
                action: WarningAction::Ban,
            },
        );

        assert_eq!(json(&warn)["title"], "⚠️ Advertência aplicada");
        assert_eq!(json(&ban)["title"], "🚫 Usuário banido por advertências");
    }

    #[test]
    fn decided_embed_names_the_moderator() {
        let value = json(&decided_embed(&registration(RegistrationStatus::Approved)));
        let fields = value["fields"].as_array().unwrap();

        assert!(fields
            .iter()
            .any(|f| f["value"] == "✅ Aprovado por <@5>"));
    }

    #[test]
    fn voice_report_lists_extra_channels() {
        let report = MemberVoiceReport {
            channels: vec![VoiceTime {
                channel_id: 0,
                total_seconds: 90,
            }],
            extra_channels: 3,
            total_seconds: 500,
        };

        let value = json(&voice_report_embed(1, &report));
        let description = value["description"].as_str().unwrap();

        assert!(description.contains("Ajuste manual: 0h 1min 30seg"));
        assert!(description.contains("+3 canal(is) adicional(is)"));
    }

    #[test]
    fn ranking_uses_medals_for_top_three() {
        let ranking: Vec<VoiceTotal> = (1..=4)
            .map(|i| VoiceTotal {
                user_id: i,
                total_seconds: 100 - i as i64,
            })
            .collect();

        let value = json(&voice_ranking_embed(&ranking));
        let lines: Vec<&str> = value["description"].as_str().unwrap().lines().collect();

        assert!(lines[0].starts_with("🥇 <@1>"));
        assert!(lines[2].starts_with("🥉 <@3>"));
        assert!(lines[3].starts_with("4. <@4>"));
    }

    fn roster(registrations_open: bool, result: Option<ActionResult>) -> ActionRoster {
        let action = Action {
            id: 3,
            guild_id: 1,
            type_id: 2,
            type_name: "Banco".to_string(),
            max_players: 2,
            total_value_cents: 100_001,
            creator_id: 5,
            status: if result.is_some() {
                ActionStatus::Finished
            } else {
                ActionStatus::Open
            },
            registrations_open,
            result,
            channel_id: 6,
            message_id: None,
            created_at: Utc::now(),
            closed_at: None,
        };
        let participant = |user_id, removed_by| Participant {
            user_id,
            joined_at: Utc::now(),
            removed_by,
        };

        ActionRoster::new(
            action,
            vec![participant(10, None), participant(11, None), participant(12, Some(5))],
        )
    }

    fn buttons(rows: &[CreateActionRow]) -> Vec<Value> {
        rows.iter()
            .flat_map(|row| {
                serde_json::to_value(row).unwrap()["components"]
                    .as_array()
                    .unwrap()
                    .clone()
            })
            .collect()
    }

    fn disabled(buttons: &[Value], custom_id: &str) -> bool {
        buttons
            .iter()
            .find(|b| b["custom_id"] == custom_id)
            .map(|b| b["disabled"] == true)
            .unwrap()
    }

    #[test]
    fn action_lists_participants_and_share() {
        let (embed, _) = action_message(&roster(true, None));
        let value = json(&embed);
        let fields = value["fields"].as_array().unwrap();

        assert_eq!(value["title"], "🎯 Banco");
        assert!(fields
            .iter()
            .any(|f| f["name"] == "📊 Rateio por Player" && f["value"] == "R$ 500,00"));
        assert!(fields
            .iter()
            .any(|f| f["name"] == "✅ Inscritos (2)" && f["value"] == "1. <@10>\n2. <@11>"));
        assert!(fields.iter().any(|f| f["name"] == "🚫 Removidos (1)"));
    }

    #[test]
    fn buttons_follow_registration_state() {
        let (_, open_rows) = action_message(&roster(true, None));
        let open = buttons(&open_rows);
        assert!(disabled(&open, "action:join:3"));
        assert!(!disabled(&open, "action:leave:3"));
        assert!(disabled(&open, "action:open:3"));
        assert!(disabled(&open, "action:win:3"));

        let (embed, closed_rows) = action_message(&roster(false, None));
        let closed = buttons(&closed_rows);
        assert!(disabled(&closed, "action:leave:3"));
        assert!(!disabled(&closed, "action:open:3"));
        assert!(!disabled(&closed, "action:defeat:3"));
        assert!(json(&embed)["fields"]
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f["name"] == "🔒 Status de Inscrições"));
    }

    #[test]
    fn finished_action_has_no_buttons() {
        let (embed, rows) = action_message(&roster(false, Some(ActionResult::Defeat)));

        assert!(rows.is_empty());
        assert!(json(&embed)["fields"]
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f["name"] == "💀 Resultado Final"));
    }

    #[test]
    fn action_ranking_uses_three_columns() {
        let ranking = [
            ActionStat {
                user_id: 1,
                participations: 4,
                total_earned_cents: 124_990,
            },
            ActionStat {
                user_id: 2,
                participations: 2,
                total_earned_cents: 0,
            },
        ];

        let value = json(&action_ranking_embed(&ranking));
        let fields = value["fields"].as_array().unwrap();

        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0]["value"], "🥇 <@1>\n🥈 <@2>");
        assert_eq!(fields[1]["value"], "4\n2");
        assert_eq!(fields[2]["value"], "R$ 1.249,90\nR$ 0,00");

        let empty = json(&action_ranking_embed(&[]));
        assert_eq!(empty["fields"][0]["name"], "📊 Nenhum participante ainda");
    }

    #[test]
    fn long_type_lists_are_summarized() {
        let types: Vec<ActionType> = (0..12)
            .map(|i| ActionType {
                id: i,
                guild_id: 1,
                name: format!("Tipo {}", i),
                min_players: 1,
                max_players: 4,
                total_value_cents: 1_000,
            })
            .collect();

        let list = action_type_list(&types, 10);

        assert_eq!(list.lines().count(), 11);
        assert!(list.starts_with("**Tipo 0** · 1-4 players · R$ 10,00"));
        assert!(list.ends_with("*+ 2 mais*"));
    }
}
