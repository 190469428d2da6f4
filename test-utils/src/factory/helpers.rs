//! Shared helper utilities for factory methods.

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Base added to counter values so generated ids look like Discord snowflakes (18 digits).
const SNOWFLAKE_BASE: u64 = 100_000_000_000_000_000;

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Gets the next unique snowflake-shaped id.
///
/// Repositories parse stored ids as `u64`, so factory defaults must be numeric.
///
/// # Returns
/// - `u64` - Unique 18-digit id
pub fn next_snowflake() -> u64 {
    SNOWFLAKE_BASE + next_id()
}
