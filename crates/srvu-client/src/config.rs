//! Transport settings.
//!
//! Only the knobs the SeniorVu client exposes live here; everything else is
//! left to reqwest's defaults.

use std::time::Duration;

/// Per-request timeout used unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for an [`HttpClient`](crate::HttpClient).
///
/// ```rust,ignore
/// let config = HttpConfig::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_tracing(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout, including reading the body.
    pub timeout: Duration,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Ask for gzip/deflate bodies.
    pub accept_compressed: bool,
    /// Emit per-request `debug!`/`info!` events.
    pub enable_tracing: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: crate::USER_AGENT.to_string(),
            accept_compressed: true,
            enable_tracing: true,
        }
    }
}

impl HttpConfig {
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn with_user_agent(self, user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..self
        }
    }

    pub fn with_compression(self, accept_compressed: bool) -> Self {
        Self {
            accept_compressed,
            ..self
        }
    }

    pub fn with_tracing(self, enable_tracing: bool) -> Self {
        Self {
            enable_tracing,
            ..self
        }
    }
}
