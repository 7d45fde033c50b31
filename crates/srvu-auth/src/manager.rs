//! Token lifecycle: login, one-time token exchange, refresh, registration.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument};

use seniorvu_client::{HttpClient, RequestBuilder};

use crate::credentials::{Credentials, LoginMethod};
use crate::error::{Error, ErrorKind, Result};
use crate::expiry::expires_soon;
use crate::session::{AuthResult, AuthSession, TokenResponse};

/// Build the URL of an `/auth/*` endpoint. Auth endpoints live outside the
/// `/api` prefix.
pub fn auth_url(base_url: &str, endpoint: &str) -> String {
    format!("{}/auth/{}", base_url.trim_end_matches('/'), endpoint)
}

/// Holds the session token and keeps it current.
///
/// Cloning is cheap and shares the session. The session lock is only held
/// for plain reads and writes, never across a request.
#[derive(Clone)]
pub struct TokenManager {
    http: HttpClient,
    session: Arc<RwLock<AuthSession>>,
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("session", &*self.read())
            .finish_non_exhaustive()
    }
}

impl TokenManager {
    /// Create a manager with an empty session.
    pub fn new(http: HttpClient) -> Self {
        Self {
            http,
            session: Arc::new(RwLock::new(AuthSession::default())),
        }
    }

    /// The transport used for auth calls.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> AuthSession {
        self.read().clone()
    }

    /// The held session token.
    pub fn token(&self) -> Option<String> {
        self.read().token().map(str::to_string)
    }

    /// Expiry of the held token, if known.
    pub fn expire_at(&self) -> Option<DateTime<Utc>> {
        self.read().expire_at()
    }

    /// `Authorization` header value attached to outgoing calls.
    pub fn authorization_header(&self) -> Option<String> {
        self.read().authorization()
    }

    /// Returns true if the held token should be refreshed before the next call.
    pub fn needs_refresh(&self) -> bool {
        expires_soon(self.expire_at())
    }

    /// Replace the session token, and with it the `Authorization` header of
    /// every later call. `expire_at` of `None` leaves the known expiry as is.
    pub fn update(&self, token: impl Into<String>, expire_at: Option<DateTime<Utc>>) {
        let mut session = self.write();
        session.set_token(token.into());
        if expire_at.is_some() {
            session.set_expire_at(expire_at);
        }
        debug!("Session token updated");
    }

    /// Set the expiry of the held token.
    pub fn set_expiry(&self, expire_at: DateTime<Utc>) {
        self.write().set_expire_at(Some(expire_at));
    }

    /// Drop the session.
    pub fn clear(&self) {
        *self.write() = AuthSession::default();
        info!("Session cleared");
    }

    /// Attach the held token to a request.
    pub fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Log in with whichever credentials are present.
    ///
    /// A one-time token is exchanged first if it has the one-time shape;
    /// otherwise email and password or an API key are posted to
    /// `/auth/login`. Fails with [`ErrorKind::NoAuthOptions`] before any
    /// request when nothing usable is present.
    #[instrument(skip(self, credentials))]
    pub async fn authenticate(
        &self,
        base_url: &str,
        credentials: &Credentials,
    ) -> Result<AuthResult> {
        let request = match credentials.login_method() {
            Some(LoginMethod::OneTimeToken(token)) => {
                return self.one_time_token_auth(base_url, token).await;
            }
            Some(LoginMethod::Login(body)) => self
                .http
                .post(auth_url(base_url, "login"))
                .json(&body)?,
            None => return Err(Error::new(ErrorKind::NoAuthOptions)),
        };

        let response = self.post_for_token(request).await?;
        let result = self.store(response, ErrorKind::NoTokenReceived)?;
        info!(user_id = ?result.user_id, "Authenticated");
        Ok(result)
    }

    /// Exchange a one-time token for a session token.
    #[instrument(skip(self, token))]
    pub async fn one_time_token_auth(&self, base_url: &str, token: &str) -> Result<AuthResult> {
        let request = self
            .http
            .post(auth_url(base_url, "login"))
            .json(&serde_json::json!({ "token": token }))?;

        let response = self.post_for_token(request).await?;
        let result = self.store(response, ErrorKind::NoTokenReceived)?;
        info!(user_id = ?result.user_id, "Exchanged one-time token");
        Ok(result)
    }

    /// Renew the held session token.
    ///
    /// Does nothing when no token is held. A refresh response without a
    /// token fails with [`ErrorKind::RefreshFailed`].
    #[instrument(skip(self))]
    pub async fn refresh(&self, base_url: &str) -> Result<()> {
        if self.token().is_none() {
            debug!("No session token held, skipping refresh");
            return Ok(());
        }

        let request = self.authorize(self.http.post(auth_url(base_url, "refresh")));
        let response = self.post_for_token(request).await?;
        self.store(response, ErrorKind::RefreshFailed)?;
        info!(expire_at = ?self.expire_at(), "Session token refreshed");
        Ok(())
    }

    /// Create a new account. Returns the response payload as-is.
    #[instrument(skip(self, payload))]
    pub async fn register<B: Serialize + ?Sized>(&self, base_url: &str, payload: &B) -> Result<Value> {
        let request = self
            .http
            .post(auth_url(base_url, "registration"))
            .json(payload)?;

        let text = self.http.execute(request).await?.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// Bodies that are not an object with a string `token` read as an empty
    /// response, so the caller reports its own missing-token error.
    async fn post_for_token(&self, request: RequestBuilder) -> Result<TokenResponse> {
        let text = self.http.execute(request).await?.text().await?;
        let value = match serde_json::from_str::<Value>(&text) {
            Ok(value) if value.get("token").is_some_and(Value::is_string) => value,
            _ => {
                debug!(body_len = text.len(), "Response carries no token");
                return Ok(TokenResponse::default());
            }
        };
        Ok(serde_json::from_value(value)?)
    }

    fn store(&self, mut response: TokenResponse, missing: ErrorKind) -> Result<AuthResult> {
        let token = response.take_token().ok_or_else(|| Error::new(missing))?;

        let mut session = self.write();
        session.set_token(token.clone());
        session.set_expire_at(response.expire_at);
        session.set_user(response.user_id, response.user_token);

        Ok(AuthResult {
            token,
            user_id: session.user_id().map(str::to_string),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, AuthSession> {
        self.session.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, AuthSession> {
        self.session.write().unwrap_or_else(PoisonError::into_inner)
    }
}
