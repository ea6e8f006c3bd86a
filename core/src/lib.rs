//! Blocking client for the Uberduck text-to-speech and lyrics API.
//!
//! # Overview
//! One method per remote operation (lyrics, voices, voice samples, backing
//! tracks, freestyle, custom prompt templates). Each call is a single HTTP
//! round trip that returns the decoded JSON body unchanged.
//!
//! # Design
//! - `UberduckClient` holds an explicit `ClientConfig` (credentials, base
//!   URL, status policy) and a `Transport`. It is stateless between calls.
//! - Every operation has a pure `build_*` counterpart, so the exact request
//!   can be inspected without I/O.
//! - Non-2xx responses are returned as data by default; opt into
//!   `StatusPolicy::Strict` to get `ApiError::HttpError` instead.
//! - No retries, caching, timeouts or rate limiting. Callers own that policy.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use client::UberduckClient;
pub use config::{ClientConfig, Credentials, StatusPolicy};
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportOptions, UreqTransport};
pub use query::QueryParams;
pub use types::{decode_as, FreestyleMetadata, FreestyleRequest, LyricsRequest};
