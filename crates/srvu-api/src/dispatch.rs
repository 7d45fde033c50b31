//! Request descriptors and the send path.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use seniorvu_auth::TokenManager;
use seniorvu_client::{HttpClient, RequestMethod};

use crate::error::Result;

/// Prefix of every chained request path.
pub const API_PREFIX: &str = "api";

/// A fully built request, detached from the chain that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: RequestMethod,
    base_url: String,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl RequestDescriptor {
    pub(crate) fn new(
        method: RequestMethod,
        base_url: String,
        segments: &[String],
        query: &Map<String, Value>,
        body: Option<Value>,
    ) -> Self {
        let path = segments
            .iter()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        Self {
            method,
            base_url,
            path,
            query: query_pairs(query),
            body,
        }
    }

    /// The HTTP method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Base URL the request was built against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joined, escaped path segments (without the API prefix).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Target URL, without query string.
    pub fn url(&self) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, self.path)
    }

    /// Query string pairs.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// JSON body.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}

/// Flatten a parameter object into query pairs.
///
/// Strings are used as is, numbers and booleans in their JSON form, nulls
/// are dropped, arrays repeat the key, and nested objects are sent as JSON.
pub fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => pairs.extend(
                items
                    .iter()
                    .filter(|item| !item.is_null())
                    .map(|item| (key.clone(), query_value(item))),
            ),
            other => pairs.push((key.clone(), query_value(other))),
        }
    }
    pairs
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// What a successful request resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The response payload.
    Data(Value),
    /// The response carried no payload.
    Raw(RawResponse),
}

/// Status line and headers of a response without a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl RawResponse {
    /// Look up a header by (lower-case) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl Reply {
    /// The payload, if there was one.
    pub fn data(&self) -> Option<&Value> {
        match self {
            Reply::Data(value) => Some(value),
            Reply::Raw(_) => None,
        }
    }

    /// Consume the reply and return the payload, if there was one.
    pub fn into_data(self) -> Option<Value> {
        match self {
            Reply::Data(value) => Some(value),
            Reply::Raw(_) => None,
        }
    }

    /// Returns true if the response carried no payload.
    pub fn is_raw(&self) -> bool {
        matches!(self, Reply::Raw(_))
    }

    /// Deserialize the payload. A reply without payload deserializes from `null`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T> {
        let value = self.into_data().unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }
}

/// Send a request: refresh the session first if it is stale, attach the
/// bearer token, and unwrap the response.
#[instrument(skip(http, tokens, request), fields(method = %request.method, path = %request.path))]
pub(crate) async fn send(
    http: &HttpClient,
    tokens: &TokenManager,
    request: RequestDescriptor,
) -> Result<Reply> {
    if tokens.needs_refresh() {
        tokens.refresh(&request.base_url).await?;
    }

    let url = request.url();
    let mut builder = tokens
        .authorize(http.request(request.method, url))
        .query_pairs(request.query);
    if let Some(body) = request.body {
        builder = builder.json_value(body);
    }

    let response = http.execute(builder).await?;
    let status = response.status();
    let headers = response.headers();
    let text = response.text().await?;

    if text.trim().is_empty() {
        debug!(status, "Response without payload");
        return Ok(Reply::Raw(RawResponse { status, headers }));
    }

    let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Ok(Reply::Data(value))
}
