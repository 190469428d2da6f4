pub const SITE_NAME: &str = "Golias";

pub const DISCORD_API: &str = "https://discord.com/api/v10";

/// OAuth application id, baked in at build time.
pub const DISCORD_CLIENT_ID: &str = match option_env!("GOLIAS_DISCORD_CLIENT_ID") {
    Some(id) => id,
    None => "",
};

/// Must match a redirect registered for the OAuth application.
pub const DISCORD_REDIRECT_URI: &str = match option_env!("GOLIAS_DISCORD_REDIRECT_URI") {
    Some(uri) => uri,
    None => "http://localhost:8080/callback",
};

/// Local storage key of the delegated token.
pub const TOKEN_KEY: &str = "golias_token";
