//! Command permission configuration.

/// Roles allowed to run a command in a guild.
///
/// Presence of this value means the command is configured. An empty `role_ids`
/// restricts the command to administrators.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandPermission {
    pub command_name: String,
    pub role_ids: Vec<u64>,
}
