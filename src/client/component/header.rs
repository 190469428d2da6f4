use dioxus::prelude::*;
use dioxus_free_icons::{icons::fa_solid_icons::FaRightFromBracket, Icon};

use crate::{
    client::{
        constant::SITE_NAME,
        model::{
            error::ApiError,
            session::{sign_out, Session},
        },
        router::Route,
    },
    model::discord::DiscordUserDto,
};

#[cfg(feature = "web")]
use crate::client::api::discord::get_current_user;

#[component]
pub fn Header() -> Element {
    let session = use_context::<Signal<Session>>();
    let nav = navigator();
    let mut user = use_signal(|| None::<Result<DiscordUserDto, ApiError>>);

    #[cfg(feature = "web")]
    {
        let future = use_resource(move || async move {
            let token = session.read().token().map(str::to_string);
            match token {
                Some(token) => Some(get_current_user(&token).await),
                None => None,
            }
        });

        use_effect(move || {
            if let Some(result) = &*future.read() {
                if let Some(Err(e)) = result {
                    if e.is_unauthorized() {
                        sign_out(session);
                    }
                }
                user.set(result.clone());
            }
        });
    }

    let signed_in = session.read().token().is_some();
    let profile = match &*user.read() {
        Some(Ok(user)) => Some((user.display_name().to_string(), user.avatar_url())),
        _ => None,
    };

    rsx!(div {
        class: "header",
        Link {
            to: Route::home(),
            class: "header-brand",
            {SITE_NAME}
        }
        if signed_in {
            div {
                class: "header-user",
                if let Some((name, avatar)) = profile {
                    if let Some(avatar) = avatar {
                        img { class: "avatar", src: "{avatar}", alt: "{name}" }
                    }
                    span { "{name}" }
                }
                button {
                    class: "btn btn-outline",
                    onclick: move |_| {
                        sign_out(session);
                        nav.push(Route::Login {});
                    },
                    Icon { width: 16, height: 16, icon: FaRightFromBracket }
                    span { "Sair" }
                }
            }
        }
    })
}
