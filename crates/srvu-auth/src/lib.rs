//! # srvu-auth
//!
//! SeniorVu session management.
//!
//! ## Security
//!
//! - Sensitive data (tokens, passwords, API keys) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//! - Error messages are sanitized by the transport before they surface here
//!
//! ## Supported Authentication Methods
//!
//! - **One-time token** - A short-lived `srvu-…` token exchanged for a session
//! - **Email and password** - Interactive login
//! - **API key** - Server-to-server integration
//! - **Refresh** - Renewing the held session token before it expires
//!
//! ## Example
//!
//! ```rust,ignore
//! use seniorvu_auth::{Credentials, TokenManager};
//! use seniorvu_client::HttpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), seniorvu_auth::Error> {
//!     let tokens = TokenManager::new(HttpClient::default_client()?);
//!
//!     let creds = Credentials::new()
//!         .with_email("me@example.com")
//!         .with_password("hunter2");
//!     let session = tokens.authenticate("https://www.seniorvu.com", &creds).await?;
//!
//!     if tokens.needs_refresh() {
//!         tokens.refresh("https://www.seniorvu.com").await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod expiry;
mod manager;
mod session;

pub use credentials::{is_one_time_token, Credentials, LoginMethod, LoginRequest};
pub use error::{Error, ErrorKind, Result};
pub use expiry::{expires_soon, expires_soon_at, REFRESH_WINDOW_SECS};
pub use manager::{auth_url, TokenManager};
pub use session::{deserialize_timestamp, AuthResult, AuthSession, TokenResponse};
