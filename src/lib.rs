//! # seniorvu
//!
//! A fluent client library for the SeniorVu REST API.
//!
//! Requests are built by chaining path names, then sent with a verb. The
//! session token is attached to every request and refreshed before it goes
//! stale.
//!
//! ## Security
//!
//! - Sensitive data (tokens, passwords, API keys) are redacted in Debug output
//! - Tracing/logging skips credential parameters
//! - Error messages sanitize any credential data
//!
//! ## Crates
//!
//! - **seniorvu-client** - HTTP transport, compression, error normalization
//! - **seniorvu-auth** - Credentials, session, expiry check, token manager
//! - **seniorvu-api** - Configuration, path table, request chains, the `SeniorVu` client
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use seniorvu::{ConfigPatch, SeniorVu};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SeniorVu::new(ConfigPatch::from_env())?;
//!     client.authenticate().await?;
//!
//!     let leads = client
//!         .communities()
//!         .arg(1)
//!         .purchased_leads()
//!         .get()
//!         .await?;
//!
//!     if let Some(leads) = leads.data() {
//!         println!("{leads}");
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "api")]
pub use seniorvu_api as api;
#[cfg(feature = "auth")]
pub use seniorvu_auth as auth;
#[cfg(feature = "client")]
pub use seniorvu_client as client;

// Re-export commonly used types at the top level
#[cfg(feature = "api")]
pub use seniorvu_api::{ConfigPatch, Error, ErrorKind, Path, Reply, Result, SeniorVu};
#[cfg(feature = "auth")]
pub use seniorvu_auth::{Credentials, TokenManager};
#[cfg(feature = "client")]
pub use seniorvu_client::{HttpClient, HttpConfig};
