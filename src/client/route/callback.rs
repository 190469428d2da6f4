use dioxus::prelude::*;

use crate::{
    client::{
        component::page::{ErrorPage, LoadingPage},
        model::session::Session,
        router::Route,
        store,
    },
    model::dashboard::token_from_fragment,
};

/// OAuth redirect target: stores the token from the URL fragment and goes home.
#[component]
pub fn Callback() -> Element {
    let mut session = use_context::<Signal<Session>>();
    let nav = navigator();
    let mut failed = use_signal(|| false);

    use_future(move || async move {
        match token_from_fragment(&store::read_fragment().await) {
            Some(token) => {
                store::save_token(&token);
                session.set(Session::SignedIn(token));
                nav.replace(Route::home());
            }
            None => failed.set(true),
        }
    });

    rsx! {
        if failed() {
            ErrorPage { status: 400, message: "Login cancelado ou token ausente." }
        } else {
            LoadingPage {}
        }
    }
}
