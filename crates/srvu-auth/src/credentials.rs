//! Login credentials.
//!
//! Credentials implement a custom Debug to redact sensitive data.

use std::sync::LazyLock;

use regex_lite::Regex;
use serde::Serialize;

static ONE_TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"srvu-.{12,}").expect("one-time token pattern is valid"));

/// Returns true if `token` has the shape of a one-time token (`srvu-` followed
/// by at least twelve characters).
pub fn is_one_time_token(token: &str) -> bool {
    ONE_TIME_TOKEN.is_match(token)
}

/// Credentials accepted by the login endpoint.
///
/// Every field is optional; [`Credentials::login_method`] decides which
/// flow a given set supports.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    email: Option<String>,
    password: Option<String>,
    api_key: Option<String>,
    one_time_token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "one_time_token",
                &self.one_time_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// The login flow a set of credentials selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginMethod<'a> {
    /// Exchange a one-time token for a session token.
    OneTimeToken(&'a str),
    /// Password and/or API key login.
    Login(LoginRequest<'a>),
}

/// Body of a password or API key login.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

impl std::fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &self.password.map(|_| "[REDACTED]"))
            .field("api_key", &self.api_key.map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Credentials {
    /// Create an empty credential set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the login email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the login password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a one-time token.
    pub fn with_one_time_token(mut self, token: impl Into<String>) -> Self {
        self.one_time_token = Some(token.into());
        self
    }

    /// The login email, if set.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The one-time token, if set.
    pub fn one_time_token(&self) -> Option<&str> {
        self.one_time_token.as_deref()
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Combine `self` over `defaults`, field by field.
    pub fn merged_over(&self, defaults: &Credentials) -> Credentials {
        Credentials {
            email: self.email.clone().or_else(|| defaults.email.clone()),
            password: self.password.clone().or_else(|| defaults.password.clone()),
            api_key: self.api_key.clone().or_else(|| defaults.api_key.clone()),
            one_time_token: self
                .one_time_token
                .clone()
                .or_else(|| defaults.one_time_token.clone()),
        }
    }

    /// Select the login flow.
    ///
    /// A one-time token wins if it has the one-time shape. Otherwise email
    /// and password together, or an API key, select a regular login. Returns
    /// `None` when nothing usable is present.
    pub fn login_method(&self) -> Option<LoginMethod<'_>> {
        if let Some(token) = self.one_time_token.as_deref().filter(|t| is_one_time_token(t)) {
            return Some(LoginMethod::OneTimeToken(token));
        }

        let has_password = self.email.is_some() && self.password.is_some();
        if !has_password && self.api_key.is_none() {
            return None;
        }

        Some(LoginMethod::Login(LoginRequest {
            email: self.email.as_deref().filter(|_| has_password),
            password: self.password.as_deref().filter(|_| has_password),
            api_key: self.api_key.as_deref(),
        }))
    }
}
