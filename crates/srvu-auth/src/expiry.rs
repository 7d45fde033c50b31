//! Token expiry check.

use chrono::{DateTime, TimeDelta, Utc};

/// Tokens expiring within this many seconds are refreshed before use.
pub const REFRESH_WINDOW_SECS: i64 = 24 * 60 * 60;

/// Returns true if a token expiring at `expire_at` should be refreshed now.
///
/// An unknown expiry counts as expired.
pub fn expires_soon(expire_at: Option<DateTime<Utc>>) -> bool {
    expires_soon_at(expire_at, Utc::now())
}

/// [`expires_soon`] against an explicit clock reading.
pub fn expires_soon_at(expire_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match expire_at {
        None => true,
        Some(at) => at - now < TimeDelta::seconds(REFRESH_WINDOW_SECS),
    }
}
