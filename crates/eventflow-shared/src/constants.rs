//! Application-wide constants

/// Access tokens are valid for a fixed 24h window; expiry is a hard cutoff.
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 86_400;

/// "New this week" dashboard buckets.
pub const RECENT_ACTIVITY_DAYS: i64 = 7;
/// Trailing window for month-bucketed analytics.
pub const ANALYTICS_WINDOW_DAYS: i64 = 180;
