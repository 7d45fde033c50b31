//! The SeniorVu client.

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use seniorvu_auth::{is_one_time_token, AuthResult, AuthSession, Credentials, TokenManager};
use seniorvu_client::{HttpClient, HttpConfig};

use crate::chain::{Chain, ReplyFuture};
use crate::config::{ClientConfig, ConfigPatch};
use crate::dispatch::{self, RequestDescriptor};
use crate::error::Result;
use crate::paths::Path;

/// Fluent client for the SeniorVu API.
///
/// Cloning is cheap; clones share configuration and session. Requests are
/// built with chains started from the path accessors:
///
/// ```rust,ignore
/// let leads = client.communities().arg(1).purchased_leads().get().await?;
/// ```
#[derive(Clone)]
pub struct SeniorVu {
    inner: Arc<Inner>,
}

struct Inner {
    http: HttpClient,
    settings: RwLock<ClientConfig>,
    tokens: TokenManager,
}

impl std::fmt::Debug for SeniorVu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeniorVu")
            .field("settings", &self.settings())
            .field("tokens", &self.inner.tokens)
            .finish()
    }
}

impl SeniorVu {
    /// Create a client and apply `patch` to the default configuration.
    pub fn new(patch: ConfigPatch) -> Result<Self> {
        Self::with_http_config(patch, HttpConfig::default())
    }

    /// Create a client with a custom transport configuration.
    pub fn with_http_config(patch: ConfigPatch, http_config: HttpConfig) -> Result<Self> {
        let http = HttpClient::new(http_config)?;
        let client = Self {
            inner: Arc::new(Inner {
                tokens: TokenManager::new(http.clone()),
                http,
                settings: RwLock::new(ClientConfig::default()),
            }),
        };
        client.config(patch)?;
        Ok(client)
    }

    /// Create a client configured from `SENIORVU_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ConfigPatch::from_env())
    }

    /// Merge a configuration patch.
    ///
    /// A `token` is adopted as the session token, unless it has the shape of
    /// a one-time token, in which case it is kept for `authenticate`.
    /// `expireAt` alone updates the expiry of the held token.
    pub fn config(&self, patch: ConfigPatch) -> Result<&Self> {
        let mut patch = patch;
        let session_token = match patch.token.take() {
            Some(token) if is_one_time_token(&token) => {
                patch.one_time_token.get_or_insert(token);
                None
            }
            other => other,
        };

        {
            let mut settings = self
                .inner
                .settings
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            settings.apply(&patch)?;
            debug!(base_url = settings.base_url(), "Configuration applied");
        }

        match (session_token, patch.expire_at) {
            (Some(token), expire_at) => self.inner.tokens.update(token, expire_at),
            (None, Some(expire_at)) => self.inner.tokens.set_expiry(expire_at),
            (None, None) => {}
        }

        Ok(self)
    }

    /// Snapshot of the current configuration.
    pub fn settings(&self) -> ClientConfig {
        self.inner
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The resolved base URL.
    pub fn base_url(&self) -> String {
        self.inner
            .settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .base_url()
            .to_string()
    }

    /// The token manager holding this client's session.
    pub fn tokens(&self) -> &TokenManager {
        &self.inner.tokens
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> AuthSession {
        self.inner.tokens.session()
    }

    /// The held session token.
    pub fn token(&self) -> Option<String> {
        self.inner.tokens.token()
    }

    /// `Authorization` header value sent with every request.
    pub fn authorization_header(&self) -> Option<String> {
        self.inner.tokens.authorization_header()
    }

    /// Start an empty chain.
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(self)
    }

    /// Start a chain at a known path.
    pub fn path(&self, path: Path) -> Chain<'_> {
        self.chain().path(path)
    }

    /// Authenticate with the configured credentials.
    pub async fn authenticate(&self) -> Result<AuthResult> {
        self.authenticate_with(Credentials::new()).await
    }

    /// Authenticate with `credentials` merged over the configured ones.
    #[instrument(skip(self, credentials))]
    pub async fn authenticate_with(&self, credentials: Credentials) -> Result<AuthResult> {
        let (base_url, credentials) = {
            let settings = self
                .inner
                .settings
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            (
                settings.base_url().to_string(),
                credentials.merged_over(settings.credentials()),
            )
        };

        Ok(self
            .inner
            .tokens
            .authenticate(&base_url, &credentials)
            .await?)
    }

    /// Exchange a one-time token for a session token.
    pub async fn one_time_token_auth(&self, token: &str) -> Result<AuthResult> {
        let base_url = self.base_url();
        Ok(self.inner.tokens.one_time_token_auth(&base_url, token).await?)
    }

    /// Renew the session token. Does nothing without a session.
    pub async fn refresh_token(&self) -> Result<()> {
        let base_url = self.base_url();
        Ok(self.inner.tokens.refresh(&base_url).await?)
    }

    /// Create a new account and return the API's response payload.
    pub async fn register<B: Serialize + ?Sized>(&self, payload: &B) -> Result<Value> {
        let base_url = self.base_url();
        Ok(self.inner.tokens.register(&base_url, payload).await?)
    }

    pub(crate) fn dispatch(&self, request: Result<RequestDescriptor>) -> ReplyFuture<'_> {
        let inner = &self.inner;
        Box::pin(async move { dispatch::send(&inner.http, &inner.tokens, request?).await })
    }
}
