//! Session state and the token responses that populate it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// The authenticated session held by a client.
///
/// The bearer token and the `Authorization` header value are the same
/// field: [`AuthSession::authorization`] is derived from the held token, and
/// [`AuthSession::set_token`] is the only way to change it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthSession {
    token: Option<String>,
    user_id: Option<String>,
    user_token: Option<String>,
    expire_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user_id", &self.user_id)
            .field("user_token", &self.user_token.as_ref().map(|_| "[REDACTED]"))
            .field("expire_at", &self.expire_at)
            .finish()
    }
}

impl AuthSession {
    /// The held session token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// The authenticated user's id, when the API reported one.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Secondary user token returned by a one-time token exchange.
    pub fn user_token(&self) -> Option<&str> {
        self.user_token.as_deref()
    }

    /// When the held token expires, if known.
    pub fn expire_at(&self) -> Option<DateTime<Utc>> {
        self.expire_at
    }

    /// Returns true if a session token is held.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` header value for the held token.
    pub fn authorization(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {}", token))
    }

    pub(crate) fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    pub(crate) fn set_expire_at(&mut self, expire_at: Option<DateTime<Utc>>) {
        self.expire_at = expire_at;
    }

    pub(crate) fn set_user(&mut self, user_id: Option<String>, user_token: Option<String>) {
        if user_id.is_some() {
            self.user_id = user_id;
        }
        if user_token.is_some() {
            self.user_token = user_token;
        }
    }
}

/// What a successful login returns to the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthResult {
    /// The new session token.
    pub token: String,
    /// The authenticated user's id, if reported.
    pub user_id: Option<String>,
}

impl std::fmt::Debug for AuthResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResult")
            .field("token", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Body returned by `/auth/login` and `/auth/refresh`.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// Session token.
    #[serde(default)]
    pub token: Option<String>,
    /// User id (the API sends either a number or a string).
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: Option<String>,
    /// Secondary user token.
    #[serde(default)]
    pub user_token: Option<String>,
    /// Token expiry.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub expire_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user_id", &self.user_id)
            .field("user_token", &self.user_token.as_ref().map(|_| "[REDACTED]"))
            .field("expire_at", &self.expire_at)
            .finish()
    }
}

impl TokenResponse {
    /// The token, if present and non-empty.
    pub(crate) fn take_token(&mut self) -> Option<String> {
        self.token.take().filter(|t| !t.is_empty())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Number(n) => n.to_string(),
        Id::Text(s) => s,
    }))
}

/// Deserialize an optional timestamp given as an RFC 3339 string or as
/// epoch milliseconds. Usable with `#[serde(deserialize_with = ...)]`.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error as _;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Millis(i64),
        Text(String),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Repr::Millis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
        Some(Repr::Text(text)) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(D::Error::custom),
    }
}
