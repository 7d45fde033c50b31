//! # srvu-client
//!
//! HTTP transport for the SeniorVu API.
//!
//! This crate provides the plumbing every higher layer dispatches through:
//! - JSON request building with bearer authentication
//! - Compression support (gzip, deflate)
//! - Request/response tracing
//! - A single normalized error shape for every transport failure
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Fluent Client Layer                      │
//! │  (srvu-api: chain builder, dispatcher)                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Token Manager                            │
//! │  (srvu-auth: login, one-time token, refresh, register)      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HttpClient                               │
//! │  - Raw HTTP with compression                                │
//! │  - Failure capture and normalization                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use seniorvu_client::{HttpClient, HttpConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), seniorvu_client::Error> {
//!     let http = HttpClient::new(HttpConfig::default())?;
//!
//!     let response = http
//!         .execute(http.get("https://www.seniorvu.com/api/communities").bearer_auth("token"))
//!         .await?;
//!     let body: serde_json::Value = response.json().await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
pub mod security;

pub use client::HttpClient;
pub use config::{HttpConfig, DEFAULT_TIMEOUT};
pub use error::{normalize, Error, ErrorKind, Failure, Result};
pub use request::{RequestBody, RequestBuilder, RequestMethod};
pub use response::Response;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("seniorvu-rs/", env!("CARGO_PKG_VERSION"));
