//! HTTP transport for the Uberduck API.
//!
//! # Design
//! Requests and responses are described as plain data. Building an
//! `HttpRequest` and decoding an `HttpResponse` are pure functions; the only
//! I/O happens inside a `Transport::execute` call, so the client can be
//! driven by `UreqTransport` in production and by an in-memory recorder in
//! tests.
//!
//! Every request carries `content-type: application/json`, plus
//! `Authorization: Basic <token>` when a token is supplied. No other headers
//! are added at this layer. Response status codes are not inspected here.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};

pub const CONTENT_TYPE: &str = "content-type";
pub const AUTHORIZATION: &str = "Authorization";
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Per-request transport options.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// Already-encoded basic auth token, sent as `Authorization: Basic <token>`.
    pub basic_auth_token: Option<String>,
}

impl TransportOptions {
    pub fn with_basic_auth(token: impl Into<String>) -> Self {
        Self {
            basic_auth_token: Some(token.into()),
        }
    }
}

/// Build the header list for a request. Pure function of `options`.
pub fn make_headers(options: &TransportOptions) -> Vec<(String, String)> {
    let mut headers = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
    if let Some(token) = options.basic_auth_token.as_deref().filter(|t| !t.is_empty()) {
        headers.push((AUTHORIZATION.to_string(), format!("Basic {token}")));
    }
    headers
}

pub fn get_request(url: impl Into<String>, options: &TransportOptions) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url: url.into(),
        headers: make_headers(options),
        body: None,
    }
}

pub fn post_request<P: Serialize + ?Sized>(
    url: impl Into<String>,
    payload: &P,
    options: &TransportOptions,
) -> Result<HttpRequest> {
    let body = serde_json::to_string(payload).map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        method: HttpMethod::Post,
        url: url.into(),
        headers: make_headers(options),
        body: Some(body),
    })
}

/// Parse a response body as JSON, regardless of status.
pub fn decode_json(response: &HttpResponse) -> Result<Value> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DecodeError(e.to_string()))
}

/// Executes one HTTP round trip.
///
/// Implementations must not interpret the status code; a 4xx/5xx response
/// is returned as `Ok`. Only failures to obtain a response at all are errors.
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
///
/// The agent is configured with `http_status_as_error(false)` so error
/// statuses come back as data. No retries and no timeouts are configured,
/// and response bodies are read in full regardless of size.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(&request.url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| {
            warn!(method = request.method.as_str(), url = %request.url, error = %e, "request failed");
            ApiError::NetworkError(e.to_string())
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // Lift ureq's default 10 MiB cap; a complete body is always returned.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| ApiError::NetworkError(e.to_string()))?;

        debug!(status, url = %request.url, "received response");

        Ok(HttpResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
