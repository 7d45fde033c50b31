//! Error types and transport failure normalization.
//!
//! Every failure seen at the transport boundary is captured once as a
//! [`Failure`] and turned into an [`Error`] by [`normalize`]. The original
//! failure stays reachable through [`std::error::Error::source`].

use serde_json::Value;

use crate::security::sanitize_message;

/// Message used when an error response carries no usable body.
pub const UNKNOWN_ISSUE: &str = "Unknown issue";

/// Message used when a request was sent but nothing came back.
pub const NO_RESPONSE: &str = "No response from API";

/// Result type alias for srvu-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for srvu-client operations.
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

    /// The normalized message.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// HTTP status of the failed response, if one arrived.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Api { status, .. } | ErrorKind::Body { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the API rejected the credentials (HTTP 401).
    pub fn is_auth_error(&self) -> bool {
        self.status() == Some(401)
    }

    /// The transport failure this error was normalized from, if any.
    pub fn failure(&self) -> Option<&Failure> {
        self.source.as_deref()?.downcast_ref::<Failure>()
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The API answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request was sent but no response arrived.
    #[error("No response from API")]
    NoResponse,

    /// A successful response arrived but its body could not be read.
    #[error("Failed to read response body: {message}")]
    Body { status: u16, message: String },

    /// The request could not be sent; carries the original message.
    #[error("{0}")]
    Request(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A transport failure, captured where it happened.
#[derive(Debug, thiserror::Error)]
pub enum Failure {
    /// A response arrived with a non-success status.
    #[error("API responded with HTTP {status}")]
    Response { status: u16, body: String },

    /// The request went out but no response came back.
    #[error("no response received")]
    NoResponse(#[source] reqwest::Error),

    /// The response body broke off or failed to decode.
    #[error("failed to read body of HTTP {status} response")]
    Body {
        status: u16,
        #[source]
        source: reqwest::Error,
    },

    /// The request never left the client.
    #[error("{0}")]
    PreSend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<reqwest::Error> for Failure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Failure::PreSend(Box::new(err))
        } else {
            Failure::NoResponse(err)
        }
    }
}

/// Normalize a transport failure into a single error shape.
///
/// For responses, the message is the first entry of a structured `errors`
/// list (its `message` field, or the entry itself), else the stringified
/// body, else [`UNKNOWN_ISSUE`]. A missing response yields [`NO_RESPONSE`];
/// an unreadable body keeps the status; a pre-send failure keeps its own
/// message.
pub fn normalize(failure: Failure) -> Error {
    let kind = match &failure {
        Failure::Response { status, body } => ErrorKind::Api {
            status: *status,
            message: response_message(body),
        },
        Failure::NoResponse(_) => ErrorKind::NoResponse,
        Failure::Body { status, source } => ErrorKind::Body {
            status: *status,
            message: sanitize_message(&source.to_string()),
        },
        Failure::PreSend(err) => ErrorKind::Request(err.to_string()),
    };

    Error::with_source(kind, failure)
}

fn response_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return UNKNOWN_ISSUE.to_string();
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Null) => UNKNOWN_ISSUE.to_string(),
        Ok(value) => {
            let message = first_error_message(&value).unwrap_or_else(|| stringify(&value));
            sanitize_message(&message)
        }
        Err(_) => sanitize_message(body),
    }
}

fn first_error_message(value: &Value) -> Option<String> {
    let first = value.get("errors")?.as_array()?.first()?;
    let message = match first.get("message") {
        Some(message) => stringify(message),
        None => stringify(first),
    };
    Some(message)
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}
