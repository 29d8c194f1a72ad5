use thiserror::Error;

use crate::core::Upstream;

/// Everything that can go wrong talking to an upstream or serving the proxy.
#[derive(Debug, Error)]
pub enum BelugaError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response body could not be decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The upstream returned an unexpected or unsuccessful HTTP status code.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// The upstream rejected the credentials (401/403).
    #[error("Unauthorized at {url}")]
    Unauthorized {
        /// The URL that rejected the request.
        url: String,
    },

    /// The requested resource does not exist (404).
    #[error("Not found: {url}")]
    NotFound {
        /// The URL that returned 404.
        url: String,
    },

    /// The upstream is throttling us (429).
    #[error("Rate limited at {url}")]
    RateLimited {
        /// The URL that returned 429.
        url: String,
    },

    /// The upstream failed on its side (5xx).
    #[error("Server error {status} at {url}")]
    ServerError {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// A key-requiring upstream was called without a configured key.
    #[error("no API key configured for {0}")]
    MissingApiKey(Upstream),

    /// The data received was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A local I/O operation (binding, serving) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The runtime configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BelugaError {
    /// Maps a non-success HTTP status to the matching variant.
    pub fn from_status(status: u16, url: impl Into<String>) -> Self {
        let url = url.into();
        match status {
            401 | 403 => Self::Unauthorized { url },
            404 => Self::NotFound { url },
            429 => Self::RateLimited { url },
            500..=599 => Self::ServerError { status, url },
            _ => Self::Status { status, url },
        }
    }

    /// The HTTP status the upstream answered with, when there was one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } | Self::ServerError { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether a later attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::ServerError { .. } => true,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
