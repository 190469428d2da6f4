use dioxus::prelude::*;

use crate::model::dashboard::{resolve_view, DashboardView};

mod communities;
mod dashboard;
mod panels;

use communities::Communities;
use dashboard::CommunityDashboard;

/// `/` lists administered communities; `/?guild_id=` opens one community.
#[component]
pub fn Home(guild_id: String) -> Element {
    match resolve_view(&guild_id) {
        DashboardView::Communities => rsx! { Communities {} },
        DashboardView::Community(guild_id) => rsx! {
            CommunityDashboard { key: "{guild_id}", guild_id: guild_id.clone() }
        },
    }
}
