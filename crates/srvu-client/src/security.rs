//! Redaction of credentials in messages that may reach logs.
//!
//! Error bodies returned by the API occasionally echo request headers or
//! tokens back. Normalized error messages are passed through
//! [`sanitize_message`] before they are exposed.
//!
//! ```rust
//! use seniorvu_client::security::sanitize_message;
//!
//! let clean = sanitize_message("rejected header Authorization: Bearer abc.def.ghi");
//! assert_eq!(clean, "rejected header Authorization: Bearer [REDACTED]");
//! ```

use std::sync::LazyLock;

use regex_lite::Regex;

/// Longest message kept before truncation.
pub const MAX_MESSAGE_LENGTH: usize = 500;

static BEARER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)bearer\s+[A-Za-z0-9\-._~+/]+=*").expect("bearer pattern is valid")
});

static ONE_TIME_TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"srvu-[^\s"',]{12,}"#).expect("one-time token pattern is valid")
});

/// Sanitize a message to prevent exposing credentials.
///
/// This function:
/// - Replaces bearer tokens with `Bearer [REDACTED]`
/// - Replaces one-time tokens (`srvu-…`) with `[REDACTED_TOKEN]`
/// - Truncates messages longer than [`MAX_MESSAGE_LENGTH`] bytes
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    let sanitized = BEARER_PATTERN.replace_all(message, "Bearer [REDACTED]");
    let mut sanitized = ONE_TIME_TOKEN_PATTERN
        .replace_all(&sanitized, "[REDACTED_TOKEN]")
        .into_owned();

    if sanitized.len() > MAX_MESSAGE_LENGTH {
        let mut cut = MAX_MESSAGE_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
