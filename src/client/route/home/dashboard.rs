use dioxus::prelude::*;
use dioxus_free_icons::{
    icons::fa_solid_icons::{FaArrowLeft, FaChartLine, FaCreditCard, FaHouse, FaKey},
    Icon,
};

use crate::{
    client::{
        component::{
            page::{ErrorPage, LoadingPage},
            GuildIcon,
        },
        constant::SITE_NAME,
        model::{
            error::ApiError,
            session::{sign_out, Session},
        },
        route::home::panels::{LicensePanel, OverviewPanel, StatisticsPanel, TransactionsPanel},
        router::Route,
    },
    model::{dashboard::is_administrator, discord::DiscordGuildDto},
};

#[cfg(feature = "web")]
use crate::client::api::discord::get_user_guilds;

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Overview,
    Statistics,
    License,
    Transactions,
}

impl Section {
    const ALL: [Section; 4] = [
        Section::Overview,
        Section::Statistics,
        Section::License,
        Section::Transactions,
    ];

    fn label(&self) -> &'static str {
        match self {
            Section::Overview => "Visão geral",
            Section::Statistics => "Estatísticas",
            Section::License => "Licença",
            Section::Transactions => "Transações",
        }
    }
}

#[component]
fn SectionIcon(section: Section) -> Element {
    match section {
        Section::Overview => rsx! { Icon { width: 16, height: 16, icon: FaHouse } },
        Section::Statistics => rsx! { Icon { width: 16, height: 16, icon: FaChartLine } },
        Section::License => rsx! { Icon { width: 16, height: 16, icon: FaKey } },
        Section::Transactions => rsx! { Icon { width: 16, height: 16, icon: FaCreditCard } },
    }
}

/// Sidebar dashboard of one administered community.
#[component]
pub fn CommunityDashboard(guild_id: String) -> Element {
    let session = use_context::<Signal<Session>>();
    let mut guild = use_signal(|| None::<Result<Option<DiscordGuildDto>, ApiError>>);
    let mut section = use_signal(|| Section::Overview);

    #[cfg(feature = "web")]
    {
        let guild_id = guild_id.clone();
        let future = use_resource(move || {
            let guild_id = guild_id.clone();
            async move {
                let token = session.read().token().map(str::to_string);
                let guilds = match token {
                    Some(token) => get_user_guilds(&token).await?,
                    None => return Err(ApiError::unauthorized()),
                };
                Ok(guilds.into_iter().find(|g| g.id == guild_id))
            }
        });

        use_effect(move || {
            if let Some(result) = &*future.read() {
                if let Err(e) = result {
                    if e.is_unauthorized() {
                        sign_out(session);
                    }
                }
                guild.set(Some(result.clone()));
            }
        });
    }

    let state = guild.read().clone();
    let current = section();

    match state {
        None => rsx! { LoadingPage {} },
        Some(Err(e)) => rsx! {
            ErrorPage { status: e.status, message: e.message }
        },
        Some(Ok(found)) => match found.filter(|g| is_administrator(g.permission_bits())) {
            None => rsx! {
                ErrorPage {
                    status: 404,
                    message: "Comunidade não encontrada ou você não é administrador dela."
                }
            },
            Some(found) => rsx! {
                Title { "{found.name} | {SITE_NAME}" }
                div {
                    class: "dashboard",
                    aside {
                        class: "sidebar",
                        div {
                            class: "sidebar-guild",
                            GuildIcon { guild: found.clone(), size: 48 }
                            p { class: "sidebar-guild-name", "{found.name}" }
                        }
                        nav {
                            for (item, label) in Section::ALL.map(|s| (s, s.label())) {
                                button {
                                    key: "{label}",
                                    class: if item == current { "sidebar-item active" } else { "sidebar-item" },
                                    onclick: move |_| section.set(item),
                                    SectionIcon { section: item }
                                    span { "{label}" }
                                }
                            }
                        }
                        Link {
                            to: Route::home(),
                            class: "sidebar-item sidebar-back",
                            Icon { width: 16, height: 16, icon: FaArrowLeft }
                            span { "Todas as comunidades" }
                        }
                    }
                    main {
                        class: "dashboard-content",
                        h1 { class: "page-title", {current.label()} }
                        match current {
                            Section::Overview => rsx! { OverviewPanel { guild: found.clone() } },
                            Section::Statistics => rsx! { StatisticsPanel {} },
                            Section::License => rsx! { LicensePanel {} },
                            Section::Transactions => rsx! { TransactionsPanel {} },
                        }
                    }
                }
            },
        },
    }
}
