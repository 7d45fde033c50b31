//! # srvu-api
//!
//! Fluent, chainable client for the SeniorVu REST API.
//!
//! Path accessors accumulate segments into a [`Chain`]; a terminal verb
//! (`get`, `post`, `put`, `delete`) turns the chain into a single request.
//! Before the request goes out, a stale session token is refreshed.
//!
//! ## Features
//!
//! - **Fluent paths** - One accessor per known API path name
//! - **Session handling** - Login, one-time token exchange, silent refresh
//! - **Environments** - `staging` and `production` base URLs by name
//! - **Normalized errors** - One error shape for every failure
//!
//! ## Example
//!
//! ```rust,ignore
//! use seniorvu_api::{ConfigPatch, SeniorVu};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), seniorvu_api::Error> {
//!     let client = SeniorVu::new(
//!         ConfigPatch::new()
//!             .env("staging")
//!             .email("me@example.com")
//!             .password("hunter2"),
//!     )?;
//!     client.authenticate().await?;
//!
//!     // GET /api/communities?limit=10
//!     let communities = client
//!         .communities()
//!         .arg(serde_json::json!({"limit": 10}))
//!         .get()
//!         .await?;
//!
//!     // POST /api/communities/1/purchasedLeads
//!     client
//!         .communities()
//!         .arg(1)
//!         .purchased_leads()
//!         .post(&serde_json::json!({"leadId": 42}))
//!         .await?;
//!
//!     println!("{:?}", communities.data());
//!     Ok(())
//! }
//! ```

mod chain;
mod client;
mod config;
mod dispatch;
mod error;
mod paths;

pub use chain::{Chain, ChainArg, Mode, ReplyFuture};
pub use client::SeniorVu;
pub use config::{ClientConfig, ConfigPatch, Environment, PRODUCTION_URL, STAGING_URL};
pub use dispatch::{query_pairs, RawResponse, Reply, RequestDescriptor, API_PREFIX};
pub use error::{Error, ErrorKind, Result};
pub use paths::Path;

// Types callers need alongside the client
pub use seniorvu_auth::{AuthResult, AuthSession, Credentials};
pub use seniorvu_client::{HttpConfig, RequestMethod};
