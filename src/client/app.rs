use dioxus::prelude::*;

use crate::client::{constant::SITE_NAME, model::session::Session, router::Route, store};

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let mut session = use_context_provider(|| Signal::new(Session::Loading));

    // The callback route may have stored a token before this resolves.
    use_future(move || async move {
        let token = store::load_token().await;
        if *session.peek() == Session::Loading {
            session.set(match token {
                Some(token) => Session::SignedIn(token),
                None => Session::SignedOut,
            });
        }
    });

    rsx! {
        Title { "{SITE_NAME}" }
        document::Meta {
            name: "description",
            content: "Painel das comunidades administradas com o Golias"
        }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}
