// CIGAM Bridge: Transport Client
//
// The single authenticated HTTP gateway to the ERP.
//   • every request gets `pin=<secret>` merged into its query string
//   • fixed 30s timeout
//   • success returns only the decoded body
//   • failures are classified as remote rejection, no response, or
//     request construction (see `CigamError`)
//
// `Transport` is the seam: `CigamClient` holds an `Arc<dyn Transport>`,
// production uses `HttpTransport`, tests substitute a recording fake.

use crate::atoms::constants::{PIN_PARAM, REQUEST_TIMEOUT_SECS};
use crate::atoms::error::{CigamError, CigamResult};
use crate::atoms::types::Credentials;
use crate::engine::params::query_value;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;

// ── Request shape ──────────────────────────────────────────────────────────

/// One outbound call, before credentials are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base address, starting with `/`.
    pub path: String,
    pub query: Map<String, Value>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>, query: Map<String, Value>) -> Self {
        ApiRequest { method: Method::GET, path: path.into(), query, body: None }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        ApiRequest {
            method: Method::POST,
            path: path.into(),
            query: Map::new(),
            body: Some(body),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue the request and return the response body.
    async fn send(&self, request: ApiRequest) -> CigamResult<Value>;
}

// ── reqwest implementation ─────────────────────────────────────────────────

pub struct HttpTransport {
    client: Client,
    credentials: Credentials,
}

impl HttpTransport {
    pub fn new(credentials: Credentials) -> CigamResult<Self> {
        Self::with_timeout(credentials, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    pub(crate) fn with_timeout(credentials: Credentials, timeout: Duration) -> CigamResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| CigamError::Config(format!("HTTP client error: {}", e)))?;

        Ok(HttpTransport { client, credentials })
    }

    /// Query pairs with the PIN merged in. A caller-supplied `pin` is replaced.
    fn authenticated_query(&self, query: &Map<String, Value>) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = query
            .iter()
            .filter(|(k, _)| k.as_str() != PIN_PARAM)
            .map(|(k, v)| (k.clone(), query_value(v)))
            .collect();
        pairs.push((PIN_PARAM.to_string(), self.credentials.pin.clone()));
        pairs
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> CigamResult<Value> {
        let url = format!("{}{}", self.credentials.base_url, request.path);
        debug!("[cigam] {} {}", request.method, request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .query(&self.authenticated_query(&request.query));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send().await.map_err(classify_send_error)?;
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(|e| {
            warn!("[cigam] {} {}: body read failed: {}", request.method, request.path, e);
            CigamError::NoResponse
        })?;

        if !status.is_success() {
            warn!("[cigam] {} {} → HTTP {}", request.method, request.path, status.as_u16());
            return Err(api_error(status, &bytes));
        }

        Ok(decode_body(&bytes))
    }
}

// ── Error classification ───────────────────────────────────────────────────

/// Builder failures never left the process; anything else was sent and
/// got no usable answer.
fn classify_send_error(e: reqwest::Error) -> CigamError {
    if e.is_builder() {
        return CigamError::Request(e.to_string());
    }
    warn!("[cigam] transport failure: {}", e);
    CigamError::NoResponse
}

/// Server `message` field if present, else the status reason phrase.
fn api_error(status: StatusCode, body: &[u8]) -> CigamError {
    let server_message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| match v.get("message") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Null) | Some(Value::String(_)) | None => None,
            Some(other) => Some(other.to_string()),
        });
    let message = server_message
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown Status").to_string());
    CigamError::api(status.as_u16(), message)
}

/// JSON body if it parses, `null` when empty, raw text otherwise.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

// ── Tests ──────────────────────────────────────────────────────────────────
