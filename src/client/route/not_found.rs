use dioxus::prelude::*;

use crate::client::{component::page::ErrorPage, constant::SITE_NAME};

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        Title { "404 | {SITE_NAME}" }
        ErrorPage { status: 404, message: format!("Página /{} não encontrada", path) }
    }
}
