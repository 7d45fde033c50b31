//! Error types for srvu-api.

use seniorvu_client::Failure;

/// Result type alias for srvu-api operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for srvu-api operations.
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

    /// HTTP status of the failed response, if one arrived.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Transport { status, .. } => *status,
            _ => None,
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

    pub(crate) fn chain_misuse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ChainMisuse(message.into()))
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// No credentials were available to authenticate with.
    #[error("No authentication options: supply a one-time token, email and password, or an API key")]
    NoAuthOptions,

    /// Login succeeded at the transport level but the response held no token.
    #[error("No token received from SeniorVu API")]
    NoTokenReceived,

    /// The refresh response held no token.
    #[error("Token refresh failed: no token received")]
    RefreshFailed,

    /// A verb was called on an empty chain, or authenticate mid-chain.
    #[error("Chain misuse: {0}")]
    ChainMisuse(String),

    /// The API answered with a non-success status.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// The request was sent but no response arrived.
    #[error("No response from API")]
    NoResponse,

    /// The request could not be sent; carries the original message.
    #[error("{0}")]
    Request(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),
}

fn transport_kind(err: &seniorvu_client::Error) -> ErrorKind {
    use seniorvu_client::ErrorKind as Client;

    match &err.kind {
        Client::Api { status, message } => ErrorKind::Transport {
            status: Some(*status),
            message: message.clone(),
        },
        Client::Body { status, .. } => ErrorKind::Transport {
            status: Some(*status),
            message: err.message(),
        },
        Client::NoResponse => ErrorKind::NoResponse,
        Client::Request(message) => ErrorKind::Request(message.clone()),
        Client::Json(message) => ErrorKind::Json(message.clone()),
        Client::Config(message) => ErrorKind::Config(message.clone()),
    }
}

impl From<seniorvu_client::Error> for Error {
    fn from(err: seniorvu_client::Error) -> Self {
        Error::with_source(transport_kind(&err), err)
    }
}

impl From<seniorvu_auth::Error> for Error {
    fn from(err: seniorvu_auth::Error) -> Self {
        use seniorvu_auth::ErrorKind as Auth;

        let kind = match &err.kind {
            Auth::NoAuthOptions => ErrorKind::NoAuthOptions,
            Auth::NoTokenReceived => ErrorKind::NoTokenReceived,
            Auth::RefreshFailed => ErrorKind::RefreshFailed,
            Auth::Json(message) => ErrorKind::Json(message.clone()),
            Auth::Transport { status, message } => err
                .source
                .as_deref()
                .and_then(|source| source.downcast_ref::<seniorvu_client::Error>())
                .map(transport_kind)
                .unwrap_or_else(|| ErrorKind::Transport {
                    status: *status,
                    message: message.clone(),
                }),
        };
        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("invalid URL: {err}")), err)
    }
}
