use dioxus::prelude::*;
use dioxus_free_icons::{icons::fa_brands_icons::FaDiscord, Icon};

use crate::{
    client::{
        component::Page,
        constant::{DISCORD_CLIENT_ID, DISCORD_REDIRECT_URI, SITE_NAME},
        model::session::Session,
        router::Route,
    },
    model::dashboard::authorize_url,
};

#[component]
pub fn Login() -> Element {
    let session = use_context::<Signal<Session>>();
    let nav = navigator();

    // Already holding a token
    use_effect(move || {
        if matches!(*session.read(), Session::SignedIn(_)) {
            nav.push(Route::home());
        }
    });

    let authorize = authorize_url(DISCORD_CLIENT_ID, DISCORD_REDIRECT_URI);

    rsx! {
        Title { "Login | {SITE_NAME}" }
        Page {
            class: "page-centered",
            div {
                class: "login-card",
                h1 { {SITE_NAME} }
                p { "Entre com sua conta do Discord para ver as comunidades que você administra." }
                a {
                    href: "{authorize}",
                    class: "btn btn-discord",
                    Icon {
                        width: 22,
                        height: 22,
                        icon: FaDiscord
                    }
                    span { "Entrar com Discord" }
                }
            }
        }
    }
}
