use dioxus::prelude::*;

use crate::model::discord::DiscordGuildDto;

/// Guild icon, or its initials when it has none.
#[component]
pub fn GuildIcon(guild: DiscordGuildDto, size: Option<u32>) -> Element {
    let size = size.unwrap_or(64);
    let initials = guild.initials();

    match guild.icon_url() {
        Some(url) => rsx! {
            img {
                class: "guild-icon",
                width: "{size}",
                height: "{size}",
                src: "{url}",
                alt: "{guild.name}",
            }
        },
        None => rsx! {
            div {
                class: "guild-icon guild-icon-fallback",
                style: "width: {size}px; height: {size}px;",
                "{initials}"
            }
        },
    }
}
