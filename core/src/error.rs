//! Error types for the Uberduck API client.
//!
//! # Design
//! Only three failures originate locally: the request never got a response,
//! the response body was not JSON, or the outgoing payload could not be
//! serialized. A non-2xx status is ordinary data unless the client was
//! configured with `StatusPolicy::Strict`, which is the only path that
//! produces `HttpError`.

use thiserror::Error;

/// Errors returned by the transport and by `UberduckClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or no response was received.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The response body was not valid JSON.
    #[error("decode failed: {0}")]
    DecodeError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// Non-2xx status under `StatusPolicy::Strict`.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, ApiError>;
