//! Client configuration and environment resolution.
//!
//! Configuration is applied as a series of patches. Each patch is merged over
//! the current state; absent fields leave the state untouched.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use seniorvu_auth::Credentials;

use crate::error::{Error, ErrorKind, Result};

/// Base URL of the staging deployment.
pub const STAGING_URL: &str = "https://staging.seniorvu.com";

/// Base URL of the production deployment, used when nothing else is set.
pub const PRODUCTION_URL: &str = "https://www.seniorvu.com";

/// A known SeniorVu deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Staging,
    Production,
}

impl Environment {
    /// Match an environment name by prefix (`staging*`, `prod*`).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name.starts_with("staging") {
            Some(Environment::Staging)
        } else if name.starts_with("prod") {
            Some(Environment::Production)
        } else {
            None
        }
    }

    /// Base URL of this deployment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Staging => STAGING_URL,
            Environment::Production => PRODUCTION_URL,
        }
    }
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    env: Option<Environment>,
    credentials: Credentials,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: PRODUCTION_URL.to_string(),
            env: None,
            credentials: Credentials::default(),
        }
    }
}

impl ClientConfig {
    /// The resolved base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The last environment selected, if any.
    pub fn env(&self) -> Option<Environment> {
        self.env
    }

    /// Credentials used by `authenticate` when none are passed explicitly.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Merge a patch over this configuration.
    ///
    /// The base URL is taken from the patch's `baseUrl`, else from its `env`,
    /// else left as it was. Session fields (`token`, `expireAt`) are not
    /// stored here; the client hands them to its token manager.
    pub fn apply(&mut self, patch: &ConfigPatch) -> Result<()> {
        let env = match patch.env.as_deref() {
            Some(name) => {
                let parsed = Environment::parse(name);
                if parsed.is_none() {
                    warn!(env = name, "Unknown environment name ignored");
                }
                parsed
            }
            None => None,
        };

        let base_url = match patch.base_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Some(validate_base_url(url)?),
            _ => env.map(|env| env.base_url().to_string()),
        };

        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if env.is_some() {
            self.env = env;
        }
        self.credentials = patch.credentials().merged_over(&self.credentials);

        Ok(())
    }
}

fn validate_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)?;
    if parsed.cannot_be_a_base() {
        return Err(Error::new(ErrorKind::Config(format!(
            "base URL cannot carry paths: {trimmed}"
        ))));
    }
    Ok(trimmed.to_string())
}

/// A partial configuration update.
///
/// Deserializes from the camelCase keys the API documentation uses
/// (`baseUrl`, `env`, `token`, `expireAt`, `email`, `password`, `apiKey`,
/// `oneTimeToken`).
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    pub base_url: Option<String>,
    pub env: Option<String>,
    pub token: Option<String>,
    #[serde(deserialize_with = "seniorvu_auth::deserialize_timestamp")]
    pub expire_at: Option<DateTime<Utc>>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub api_key: Option<String>,
    pub one_time_token: Option<String>,
}

impl std::fmt::Debug for ConfigPatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigPatch")
            .field("base_url", &self.base_url)
            .field("env", &self.env)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("expire_at", &self.expire_at)
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

impl ConfigPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an explicit base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Select a deployment by name (`staging*` or `prod*`).
    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Adopt an existing session token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the expiry of the adopted token.
    pub fn expire_at(mut self, expire_at: DateTime<Utc>) -> Self {
        self.expire_at = Some(expire_at);
        self
    }

    /// Set the login email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the login password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set a one-time token.
    pub fn one_time_token(mut self, token: impl Into<String>) -> Self {
        self.one_time_token = Some(token.into());
        self
    }

    /// Parse a patch from a JSON object.
    ///
    /// Keys holding `null` are dropped first, so a null never unsets a value
    /// configured earlier.
    pub fn from_json(value: Value) -> Result<Self> {
        let value = match value {
            Value::Object(map) => {
                Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect())
            }
            Value::Null => return Ok(Self::default()),
            other => other,
        };
        Ok(serde_json::from_value(value)?)
    }

    /// Read a patch from `SENIORVU_*` environment variables.
    ///
    /// Unset variables leave the corresponding field empty; an empty
    /// environment yields an empty patch.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            base_url: var("SENIORVU_BASE_URL"),
            env: var("SENIORVU_ENV"),
            token: var("SENIORVU_TOKEN"),
            expire_at: None,
            email: var("SENIORVU_EMAIL"),
            password: var("SENIORVU_PASSWORD"),
            api_key: var("SENIORVU_API_KEY"),
            one_time_token: var("SENIORVU_ONE_TIME_TOKEN"),
        }
    }

    /// The credential fields of this patch.
    pub fn credentials(&self) -> Credentials {
        let mut creds = Credentials::new();
        if let Some(email) = &self.email {
            creds = creds.with_email(email);
        }
        if let Some(password) = &self.password {
            creds = creds.with_password(password);
        }
        if let Some(api_key) = &self.api_key {
            creds = creds.with_api_key(api_key);
        }
        if let Some(token) = &self.one_time_token {
            creds = creds.with_one_time_token(token);
        }
        creds
    }
}
