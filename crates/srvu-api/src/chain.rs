//! The fluent request chain.
//!
//! A [`Chain`] owns everything a request needs before it is sent: the path
//! segments and the parameter object. Verbs consume the chain and build a
//! [`RequestDescriptor`] before returning their future, so two chains
//! started from the same client never share state.

use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::{Map, Value};

use seniorvu_auth::{AuthResult, Credentials};
use seniorvu_client::RequestMethod;

use crate::client::SeniorVu;
use crate::dispatch::{Reply, RequestDescriptor};
use crate::error::{Error, Result};
use crate::paths::Path;

/// Future returned by the terminal verbs.
pub type ReplyFuture<'c> = BoxFuture<'c, Result<Reply>>;

/// Whether anything has been appended to a chain yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Nothing appended; `authenticate` is allowed.
    Standalone,
    /// At least one segment or parameter object appended.
    MidChain,
}

/// An argument to a chain call.
///
/// Objects become the chain's parameters, `null`/`None`/`()` are ignored,
/// and everything else becomes a literal path segment.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainArg {
    /// Leaves the chain unchanged.
    None,
    /// One path segment, percent-encoded when the URL is built.
    Segment(String),
    /// Query or body parameters, shallow-merged over earlier ones.
    Params(Map<String, Value>),
}

impl From<()> for ChainArg {
    fn from(_: ()) -> Self {
        ChainArg::None
    }
}

impl From<&str> for ChainArg {
    fn from(segment: &str) -> Self {
        ChainArg::Segment(segment.to_string())
    }
}

impl From<String> for ChainArg {
    fn from(segment: String) -> Self {
        ChainArg::Segment(segment)
    }
}

impl From<&String> for ChainArg {
    fn from(segment: &String) -> Self {
        ChainArg::Segment(segment.clone())
    }
}

macro_rules! segment_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ChainArg {
                fn from(segment: $ty) -> Self {
                    ChainArg::Segment(segment.to_string())
                }
            }
        )*
    };
}

segment_from_display!(i32, i64, u32, u64, usize, bool);

impl From<Map<String, Value>> for ChainArg {
    fn from(params: Map<String, Value>) -> Self {
        ChainArg::Params(params)
    }
}

impl From<Value> for ChainArg {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ChainArg::None,
            Value::Object(params) => ChainArg::Params(params),
            Value::String(segment) => ChainArg::Segment(segment),
            Value::Array(items) => ChainArg::Segment(
                items
                    .iter()
                    .map(scalar_text)
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            other => ChainArg::Segment(other.to_string()),
        }
    }
}

impl<T: Into<ChainArg>> From<Option<T>> for ChainArg {
    fn from(value: Option<T>) -> Self {
        value.map_or(ChainArg::None, Into::into)
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A request being built.
#[derive(Clone)]
pub struct Chain<'c> {
    client: &'c SeniorVu,
    segments: Vec<String>,
    params: Option<Map<String, Value>>,
    mode: Mode,
}

impl std::fmt::Debug for Chain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("segments", &self.segments)
            .field("params", &self.params)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl<'c> Chain<'c> {
    pub(crate) fn new(client: &'c SeniorVu) -> Self {
        Self {
            client,
            segments: Vec::new(),
            params: None,
            mode: Mode::Standalone,
        }
    }

    /// Path segments appended so far.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The parameter object, if one was given.
    pub fn params(&self) -> Option<&Map<String, Value>> {
        self.params.as_ref()
    }

    /// Whether anything has been appended yet.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Append a known path name.
    pub fn path(mut self, path: Path) -> Self {
        self.segments.push(path.segment().to_string());
        self.mode = Mode::MidChain;
        self
    }

    /// Append a segment or parameter object.
    ///
    /// Parameter objects given by several calls are merged; later keys win.
    pub fn arg(mut self, arg: impl Into<ChainArg>) -> Self {
        match arg.into() {
            ChainArg::None => return self,
            ChainArg::Segment(segment) => self.segments.push(segment),
            ChainArg::Params(params) => self.params.get_or_insert_with(Map::new).extend(params),
        }
        self.mode = Mode::MidChain;
        self
    }

    /// Send a GET request with the chain's parameters as the query string.
    pub fn get(self) -> ReplyFuture<'c> {
        let request = self.into_request(RequestMethod::Get, None);
        self.client_dispatch(request)
    }

    /// Send a GET request, merging `query` over the chain's parameters.
    pub fn get_with<Q: Serialize + ?Sized>(self, query: &Q) -> ReplyFuture<'c> {
        let request = serde_json::to_value(query)
            .map_err(Error::from)
            .and_then(|query| self.into_request(RequestMethod::Get, Some(query)));
        self.client_dispatch(request)
    }

    /// Send a POST request with `body` as JSON.
    pub fn post<B: Serialize + ?Sized>(self, body: &B) -> ReplyFuture<'c> {
        self.send_body(RequestMethod::Post, body)
    }

    /// Send a PUT request with `body` as JSON.
    pub fn put<B: Serialize + ?Sized>(self, body: &B) -> ReplyFuture<'c> {
        self.send_body(RequestMethod::Put, body)
    }

    /// Send a DELETE request with the chain's parameters as the query string.
    pub fn delete(self) -> ReplyFuture<'c> {
        let request = self.into_request(RequestMethod::Delete, None);
        self.client_dispatch(request)
    }

    /// Send a DELETE request with `body` as JSON.
    pub fn delete_with<B: Serialize + ?Sized>(self, body: &B) -> ReplyFuture<'c> {
        self.send_body(RequestMethod::Delete, body)
    }

    /// Authenticate through the client. Only valid before anything has been
    /// appended to the chain.
    pub fn authenticate(self, credentials: Option<Credentials>) -> BoxFuture<'c, Result<AuthResult>> {
        let client = self.client;
        let mode = self.mode;
        Box::pin(async move {
            if mode == Mode::MidChain {
                return Err(Error::chain_misuse("authenticate called mid-chain"));
            }
            match credentials {
                Some(credentials) => client.authenticate_with(credentials).await,
                None => client.authenticate().await,
            }
        })
    }

    /// Build the request a verb would send, without sending it.
    ///
    /// For GET, and DELETE without a body, the chain's parameters and
    /// `body` are merged (body keys win) into the query string. For the
    /// other verbs an object `body` is sent as JSON with the chain's
    /// parameters merged underneath it; a non-object body is sent as is and
    /// the parameters go to the query string.
    pub fn into_request(&self, method: RequestMethod, body: Option<Value>) -> Result<RequestDescriptor> {
        if self.segments.is_empty() {
            return Err(Error::chain_misuse(format!(
                "{method} called without any path segments"
            )));
        }

        let params = self.params.clone().unwrap_or_default();
        let base_url = self.client.base_url();
        let reads_query = method.is_read() || body.is_none();

        let (query, body) = if reads_query {
            let mut query = params;
            match body {
                Some(Value::Object(extra)) => query.extend(extra),
                Some(Value::Null) | None => {}
                Some(other) => {
                    return Err(Error::chain_misuse(format!(
                        "{method} query must be an object, got {other}"
                    )));
                }
            }
            (query, None)
        } else {
            match body {
                Some(Value::Object(fields)) => {
                    let mut merged = params;
                    merged.extend(fields);
                    (Map::new(), Some(Value::Object(merged)))
                }
                other => (params, other),
            }
        };

        Ok(RequestDescriptor::new(
            method,
            base_url,
            &self.segments,
            &query,
            body,
        ))
    }

    fn send_body<B: Serialize + ?Sized>(self, method: RequestMethod, body: &B) -> ReplyFuture<'c> {
        let request = serde_json::to_value(body)
            .map_err(Error::from)
            .and_then(|body| self.into_request(method, Some(body)));
        self.client_dispatch(request)
    }

    fn client_dispatch(self, request: Result<RequestDescriptor>) -> ReplyFuture<'c> {
        self.client.dispatch(request)
    }
}
