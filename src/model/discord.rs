use serde::{Deserialize, Serialize};

const CDN: &str = "https://cdn.discordapp.com";

/// `GET /users/@me` as returned by the Discord REST API.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct DiscordUserDto {
    pub id: String,
    pub username: String,
    pub global_name: Option<String>,
    pub avatar: Option<String>,
}

impl DiscordUserDto {
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }

    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_ref()
            .map(|hash| format!("{}/avatars/{}/{}.png?size=64", CDN, self.id, hash))
    }
}

/// One entry of `GET /users/@me/guilds`.
///
/// Discord sends ids and the permission bitfield as strings.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
pub struct DiscordGuildDto {
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    #[serde(default)]
    pub owner: bool,
    #[serde(default)]
    pub permissions: String,
}

impl DiscordGuildDto {
    /// Permission bitfield, zero when missing or malformed.
    pub fn permission_bits(&self) -> u64 {
        self.permissions.parse().unwrap_or(0)
    }

    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|hash| format!("{}/icons/{}/{}.png?size=128", CDN, self.id, hash))
    }

    /// Up to two initials, shown when the guild has no icon.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}
