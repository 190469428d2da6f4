//! Dashboard panels. Everything except the overview shows static sample data.

use dioxus::prelude::*;

use crate::model::{
    dashboard::{format_brl, mock_license, mock_statistics, mock_transactions},
    discord::DiscordGuildDto,
};

#[component]
pub fn OverviewPanel(guild: DiscordGuildDto) -> Element {
    let role = if guild.owner { "Dono" } else { "Administrador" };

    rsx! {
        div {
            class: "card",
            dl {
                class: "details",
                dt { "Nome" }
                dd { "{guild.name}" }
                dt { "ID" }
                dd { code { "{guild.id}" } }
                dt { "Seu papel" }
                dd { "{role}" }
            }
        }
    }
}

#[component]
pub fn StatisticsPanel() -> Element {
    rsx! {
        div {
            class: "stat-grid",
            for stat in mock_statistics() {
                div {
                    key: "{stat.label}",
                    class: "card stat-card",
                    p { class: "muted", "{stat.label}" }
                    p { class: "stat-value", "{stat.value}" }
                    p {
                        class: if stat.trend >= 0.0 { "trend trend-up" } else { "trend trend-down" },
                        {format!("{:+.1}%", stat.trend)}
                    }
                }
            }
        }
        p { class: "muted", "Dados de exemplo." }
    }
}

#[component]
pub fn LicensePanel() -> Element {
    let license = mock_license();

    rsx! {
        div {
            class: "card",
            dl {
                class: "details",
                dt { "Plano" }
                dd { "{license.plan}" }
                dt { "Status" }
                dd { "{license.status}" }
                dt { "Válida até" }
                dd { "{license.expires_on}" }
            }
            ul {
                for feature in license.features {
                    li { key: "{feature}", "{feature}" }
                }
            }
        }
        p { class: "muted", "Dados de exemplo." }
    }
}

#[component]
pub fn TransactionsPanel() -> Element {
    rsx! {
        table {
            class: "table",
            thead {
                tr {
                    th { "ID" }
                    th { "Descrição" }
                    th { "Data" }
                    th { "Valor" }
                }
            }
            tbody {
                for transaction in mock_transactions() {
                    tr {
                        key: "{transaction.id}",
                        td { code { "{transaction.id}" } }
                        td { "{transaction.description}" }
                        td { "{transaction.date}" }
                        td {
                            class: if transaction.amount_cents < 0 { "negative" } else { "" },
                            {format_brl(transaction.amount_cents)}
                        }
                    }
                }
            }
        }
        p { class: "muted", "Dados de exemplo." }
    }
}
