//! Dashboard logic shared by the client and its tests: which communities a user
//! administers, which view a URL selects, OAuth URLs and the static mock panels.

use url::{form_urlencoded, Url};

use crate::model::discord::DiscordGuildDto;

/// `ADMINISTRATOR` bit of Discord's permission bitfield.
pub const ADMINISTRATOR: u64 = 0x8;

const AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";
const OAUTH_SCOPES: &str = "identify guilds";

pub fn is_administrator(permissions: u64) -> bool {
    permissions & ADMINISTRATOR == ADMINISTRATOR
}

/// Guilds in which the user holds the administrator bit, sorted by name.
pub fn administered_guilds(guilds: &[DiscordGuildDto]) -> Vec<DiscordGuildDto> {
    let mut administered: Vec<DiscordGuildDto> = guilds
        .iter()
        .filter(|guild| is_administrator(guild.permission_bits()))
        .cloned()
        .collect();
    administered.sort_by_key(|guild| guild.name.to_lowercase());

    administered
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    /// List of administered communities.
    Communities,
    /// Sidebar dashboard of one community.
    Community(String),
}

/// Picks the view from the `guild_id` query value; anything but a snowflake lists
/// the communities.
pub fn resolve_view(guild_id: &str) -> DashboardView {
    let guild_id = guild_id.trim();

    if !guild_id.is_empty() && guild_id.parse::<u64>().is_ok() {
        DashboardView::Community(guild_id.to_string())
    } else {
        DashboardView::Communities
    }
}

/// Discord authorization page for the implicit grant.
pub fn authorize_url(client_id: &str, redirect_uri: &str) -> String {
    match Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", client_id),
            ("response_type", "token"),
            ("redirect_uri", redirect_uri),
            ("scope", OAUTH_SCOPES),
        ],
    ) {
        Ok(url) => url.into(),
        Err(_) => AUTHORIZE_URL.to_string(),
    }
}

/// Extracts `access_token` from the fragment Discord redirects back with.
///
/// Accepts the fragment with or without its leading `#`.
pub fn token_from_fragment(fragment: &str) -> Option<String> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

    form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

/// Formats cents as Brazilian reais, e.g. `R$ 1.249,90`.
pub fn format_brl(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let reais = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, digit) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    /// Change over the previous period, in percent.
    pub trend: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LicenseInfo {
    pub plan: &'static str,
    pub status: &'static str,
    pub expires_on: &'static str,
    pub features: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: &'static str,
    pub description: &'static str,
    pub amount_cents: i64,
    pub date: &'static str,
}

// The panels below are static placeholders; no backend serves these figures.

pub fn mock_statistics() -> Vec<StatCard> {
    vec![
        StatCard {
            label: "Membros",
            value: "1.248".to_string(),
            trend: 4.2,
        },
        StatCard {
            label: "Cadastros aprovados",
            value: "312".to_string(),
            trend: 12.5,
        },
        StatCard {
            label: "Advertências",
            value: "27".to_string(),
            trend: -8.0,
        },
        StatCard {
            label: "Horas em voz",
            value: "5.930".to_string(),
            trend: 2.1,
        },
    ]
}

pub fn mock_license() -> LicenseInfo {
    LicenseInfo {
        plan: "Premium",
        status: "Ativa",
        expires_on: "31/12/2026",
        features: vec![
            "Cadastro com aprovação",
            "Advertências progressivas",
            "Tickets",
            "Ponto de voz",
        ],
    }
}

pub fn mock_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            id: "TX-1042",
            description: "Renovação Premium",
            amount_cents: 4990,
            date: "01/10/2026",
        },
        Transaction {
            id: "TX-0977",
            description: "Renovação Premium",
            amount_cents: 4990,
            date: "01/09/2026",
        },
        Transaction {
            id: "TX-0931",
            description: "Estorno parcial",
            amount_cents: -1500,
            date: "18/08/2026",
        },
    ]
}
