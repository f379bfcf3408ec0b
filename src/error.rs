//! Error types for the API client and configuration loading.
//!
//! Every failure on the request path (transport, HTTP status, JSON decode)
//! is an [`ApiError`]. Views never distinguish between the variants; they
//! only need to know that a fetch failed.

use thiserror::Error;

/// A failed request against the Trend Engine API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside `200..=299`.
    /// The response body is not read.
    #[error("API error: {status}")]
    Status { status: u16 },

    /// The body of a successful response did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL combined with a path is not a valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A configured header (e.g. the session cookie) is not a valid header value.
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Failure while reading the YAML configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}
