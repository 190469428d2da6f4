//! Test factory for creating Serenity Role objects.

use serenity::all::Role;

fn role_from_json(role_id: u64, name: &str, position: i16, managed: bool) -> Role {
    serde_json::from_value(serde_json::json!({
        "id": role_id.to_string(),
        "name": name,
        "color": 0,
        "hoist": false,
        "icon": null,
        "unicode_emoji": null,
        "position": position,
        "permissions": "0",
        "managed": managed,
        "mentionable": false,
    }))
    .expect("Failed to create test role - invalid JSON structure")
}

/// Creates a test Serenity Role that is not managed by an integration.
///
/// # Arguments
/// - `role_id` - Discord role ID (snowflake)
/// - `name` - Role name
/// - `position` - Role position in the hierarchy (higher = more important)
///
/// # Panics
/// - If the JSON cannot be deserialized into a Role (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// let role = create_test_role(123456789, "Membro", 3);
/// assert_eq!(role.position, 3);
/// assert!(!role.managed);
/// ```
pub fn create_test_role(role_id: u64, name: &str, position: i16) -> Role {
    role_from_json(role_id, name, position, false)
}

/// Creates a role owned by an integration (bot or booster role), which cannot be assigned.
pub fn create_managed_role(role_id: u64, name: &str, position: i16) -> Role {
    role_from_json(role_id, name, position, true)
}
