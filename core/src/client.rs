//! Uberduck API client.
//!
//! # Design
//! `UberduckClient` holds its `ClientConfig` and a `Transport`, and carries
//! no mutable state between calls, so a single client can be shared across
//! threads. Each operation has a pure `build_*` method producing the exact
//! `HttpRequest`, and an executing method that sends it and returns the
//! decoded JSON unchanged.
//!
//! The basic auth token is derived from the configured credentials on every
//! request. Path segments supplied by callers (voice ids, template keys) are
//! interpolated as-is and are expected not to need percent-encoding.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::{ClientConfig, StatusPolicy};
use crate::error::{ApiError, Result};
use crate::http::{self, HttpRequest, HttpResponse, Transport, TransportOptions, UreqTransport};
use crate::query::QueryParams;
use crate::types::FreestyleRequest;

pub const LYRICS_PATH: &str = "tts/lyrics";
pub const FREESTYLE_PATH: &str = "tts/freestyle";
pub const VOICES_PATH: &str = "voices";
pub const BACKING_TRACKS_PATH: &str = "reference-audio/backing-tracks";

#[derive(Debug, Clone)]
pub struct UberduckClient<T = UreqTransport> {
    config: ClientConfig,
    base_url: String,
    transport: T,
}

impl UberduckClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// Client configured from `UBERDUCK_KEY` / `UBERDUCK_SECRET`.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> UberduckClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            config,
            base_url,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn options(&self) -> TransportOptions {
        TransportOptions {
            basic_auth_token: self.config.credentials.as_ref().map(|c| c.basic_token()),
        }
    }

    // -----------------------------------------------------------------------
    // Request builders
    // -----------------------------------------------------------------------

    /// GET `path`, with `?<query>` appended when the query is non-empty.
    pub fn build_get(&self, path: &str, query: Option<&QueryParams>) -> HttpRequest {
        let mut url = self.endpoint(path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(&query.encode());
        }
        http::get_request(url, &self.options())
    }

    pub fn build_post<P: Serialize + ?Sized>(&self, path: &str, payload: &P) -> Result<HttpRequest> {
        http::post_request(self.endpoint(path), payload, &self.options())
    }

    pub fn build_generate_lyrics<P: Serialize + ?Sized>(&self, payload: &P) -> Result<HttpRequest> {
        self.build_post(LYRICS_PATH, payload)
    }

    pub fn build_list_voices(&self, params: &QueryParams) -> HttpRequest {
        self.build_get(VOICES_PATH, Some(params))
    }

    pub fn build_list_voice_samples(&self, voice_id: &str) -> HttpRequest {
        self.build_get(&format!("{VOICES_PATH}/{voice_id}/samples"), None)
    }

    pub fn build_list_backing_tracks(&self) -> HttpRequest {
        self.build_get(BACKING_TRACKS_PATH, None)
    }

    pub fn build_generate_freestyle(&self, payload: &FreestyleRequest) -> Result<HttpRequest> {
        self.build_post(FREESTYLE_PATH, payload)
    }

    /// `variables` of `None`, or one that serializes to JSON `null`, is sent as `{}`.
    pub fn build_custom_prompt<V: Serialize + ?Sized>(
        &self,
        key: &str,
        variables: Option<&V>,
    ) -> Result<HttpRequest> {
        let variables = match variables {
            Some(v) => serde_json::to_value(v).map_err(|e| ApiError::SerializationError(e.to_string()))?,
            None => Value::Null,
        };
        let variables = if variables.is_null() { json!({}) } else { variables };
        self.build_post(
            &format!("templates/deployments/{key}/generate"),
            &json!({ "variables": variables }),
        )
    }

    // -----------------------------------------------------------------------
    // Response handling
    // -----------------------------------------------------------------------

    /// Apply the configured `StatusPolicy`, then decode the body as JSON.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value> {
        if self.config.status_policy == StatusPolicy::Strict {
            check_status(&response)?;
        }
        http::decode_json(&response)
    }

    fn send(&self, request: HttpRequest) -> Result<Value> {
        debug!(method = request.method.as_str(), url = %request.url, "uberduck request");
        let response = self.transport.execute(request)?;
        self.parse_response(response)
    }

    // -----------------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------------

    pub fn get(&self, path: &str, query: Option<QueryParams>) -> Result<Value> {
        self.send(self.build_get(path, query.as_ref()))
    }

    pub fn post<P: Serialize + ?Sized>(&self, path: &str, payload: &P) -> Result<Value> {
        self.send(self.build_post(path, payload)?)
    }

    pub fn generate_lyrics<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value> {
        self.send(self.build_generate_lyrics(payload)?)
    }

    pub fn list_voices(&self, params: impl Into<QueryParams>) -> Result<Value> {
        self.send(self.build_list_voices(&params.into()))
    }

    pub fn list_voice_samples(&self, voice_id: &str) -> Result<Value> {
        self.send(self.build_list_voice_samples(voice_id))
    }

    pub fn list_backing_tracks(&self) -> Result<Value> {
        self.send(self.build_list_backing_tracks())
    }

    pub fn generate_freestyle(&self, payload: &FreestyleRequest) -> Result<Value> {
        self.send(self.build_generate_freestyle(payload)?)
    }

    /// Invoke the template deployment `key` with the given variables.
    pub fn custom_prompt<V: Serialize + ?Sized>(&self, key: &str, variables: Option<&V>) -> Result<Value> {
        self.send(self.build_custom_prompt(key, variables)?)
    }
}

/// Map a non-2xx status to `ApiError::HttpError`.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
