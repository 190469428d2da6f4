use sea_orm::DbErr;

/// Parses a stored Discord snowflake.
///
/// Ids are persisted as text; a value that fails to parse means the row was written by
/// something other than this crate.
///
/// # Arguments
/// - `value` - Stored id text
/// - `field` - Column name used in the error message
///
/// # Returns
/// - `Ok(u64)` - Parsed id
/// - `Err(DbErr::Custom)` - Value is not a valid `u64`
pub fn parse_snowflake(value: &str, field: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
}

/// Parses an optional stored snowflake, see [`parse_snowflake`].
pub fn parse_optional_snowflake(value: Option<&str>, field: &str) -> Result<Option<u64>, DbErr> {
    value.map(|v| parse_snowflake(v, field)).transpose()
}
