use dioxus::prelude::*;

use crate::{
    client::{
        component::{page::LoadingPage, GuildIcon, Page},
        constant::SITE_NAME,
        model::{
            error::ApiError,
            session::{sign_out, Session},
        },
        router::Route,
    },
    model::{dashboard::administered_guilds, discord::DiscordGuildDto},
};

#[cfg(feature = "web")]
use crate::client::api::discord::get_user_guilds;

#[component]
pub fn Communities() -> Element {
    let session = use_context::<Signal<Session>>();
    let mut guilds = use_signal(|| None::<Result<Vec<DiscordGuildDto>, ApiError>>);

    #[cfg(feature = "web")]
    {
        let future = use_resource(move || async move {
            let token = session.read().token().map(str::to_string);
            match token {
                Some(token) => get_user_guilds(&token).await,
                None => Err(ApiError::unauthorized()),
            }
        });

        use_effect(move || {
            if let Some(result) = &*future.read() {
                if let Err(e) = result {
                    if e.is_unauthorized() {
                        sign_out(session);
                    }
                }
                guilds.set(Some(result.clone()));
            }
        });
    }

    let state = guilds.read().clone();

    rsx! {
        Title { "Comunidades | {SITE_NAME}" }
        match state {
            None => rsx! { LoadingPage {} },
            Some(Err(e)) => rsx! {
                Page {
                    p { class: "error", "Não foi possível carregar suas comunidades: {e}" }
                }
            },
            Some(Ok(list)) => {
                let administered = administered_guilds(&list);
                rsx! {
                    Page {
                        h1 { class: "page-title", "Suas comunidades" }
                        if administered.is_empty() {
                            p { class: "muted", "Você não administra nenhuma comunidade." }
                        }
                        div {
                            class: "guild-grid",
                            for guild in administered {
                                Link {
                                    key: "{guild.id}",
                                    to: Route::Home { guild_id: guild.id.clone() },
                                    class: "guild-card",
                                    GuildIcon { guild: guild.clone() }
                                    p { "{guild.name}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
