//! Client configuration.
//!
//! # Environment Variables
//! - `UBERDUCK_KEY`: API key
//! - `UBERDUCK_SECRET`: API secret
//! - `UBERDUCK_API_BASE_URL`: base origin override (defaults to `https://api.uberduck.ai/`)
//!
//! Credentials are optional. Without them requests are sent with no
//! Authorization header and the service rejects them server-side.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const DEFAULT_BASE_URL: &str = "https://api.uberduck.ai/";

pub const ENV_KEY: &str = "UBERDUCK_KEY";
pub const ENV_SECRET: &str = "UBERDUCK_SECRET";
pub const ENV_BASE_URL: &str = "UBERDUCK_API_BASE_URL";

/// API key and secret pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    /// Read `UBERDUCK_KEY` and `UBERDUCK_SECRET`. `None` if either is unset.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let key = lookup(ENV_KEY)?;
        let secret = lookup(ENV_SECRET)?;
        Some(Self::new(key, secret))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Base64 of `key:secret`, standard alphabet with padding.
    pub fn basic_token(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.key, self.secret))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// How the client treats non-2xx responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Decode the body of every response, whatever its status.
    #[default]
    PassThrough,
    /// Return `ApiError::HttpError` for any non-2xx status.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub credentials: Option<Credentials>,
    pub status_policy: StatusPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            status_policy: StatusPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self::default().with_credentials(credentials)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let credentials = Credentials::from_lookup(&lookup);
        let base_url = lookup(ENV_BASE_URL)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if credentials.is_none() {
            tracing::debug!("{ENV_KEY}/{ENV_SECRET} not set, requests will be unauthenticated");
        }
        Self {
            base_url,
            credentials,
            status_policy: StatusPolicy::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_status_policy(mut self, status_policy: StatusPolicy) -> Self {
        self.status_policy = status_policy;
        self
    }
}
