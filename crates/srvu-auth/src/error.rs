//! Error types for srvu-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

use seniorvu_client::Failure;

/// Result type alias for srvu-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for srvu-auth operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// The transport failure behind this error, if any.
    pub fn failure(&self) -> Option<&Failure> {
        let mut current: Option<&(dyn std::error::Error + 'static)> = self
            .source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static));
        while let Some(err) = current {
            if let Some(failure) = err.downcast_ref::<Failure>() {
                return Some(failure);
            }
            current = err.source();
        }
        None
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Neither a one-time token, email and password, nor an API key was supplied.
    #[error("No authentication options: supply a one-time token, email and password, or an API key")]
    NoAuthOptions,

    /// Login succeeded at the transport level but the response held no token.
    #[error("No token received from SeniorVu API")]
    NoTokenReceived,

    /// The refresh response held no token.
    #[error("Token refresh failed: no token received")]
    RefreshFailed,

    /// Normalized transport failure.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<seniorvu_client::Error> for Error {
    fn from(err: seniorvu_client::Error) -> Self {
        let kind = match &err.kind {
            seniorvu_client::ErrorKind::Json(message) => ErrorKind::Json(message.clone()),
            _ => ErrorKind::Transport {
                status: err.status(),
                message: err.message(),
            },
        };
        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}
