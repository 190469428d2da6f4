use dioxus::prelude::*;

use crate::client::{component::page::LoadingPage, model::session::Session, router::Route};

/// Renders child routes only while a delegated token is stored.
#[component]
pub fn RequiresToken() -> Element {
    let session = use_context::<Signal<Session>>();
    let nav = navigator();

    use_effect(move || {
        if *session.read() == Session::SignedOut {
            nav.push(Route::Login {});
        }
    });

    let state = session.read().clone();
    match state {
        Session::Loading => rsx! { LoadingPage {} },
        // Redirecting via the effect
        Session::SignedOut => rsx! {},
        Session::SignedIn(_) => rsx! { Outlet::<Route> {} },
    }
}
