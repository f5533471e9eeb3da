//! Error types for the FortiOS SDK

use thiserror::Error;

/// Result type alias using the SDK Error
pub type Result<T> = std::result::Result<T, Error>;

/// FortiOS SDK error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response parsed but lacks the mandatory `status` key.
    #[error("cannot get the right response")]
    UnexpectedResponse,

    /// FortiOS answered with a status other than `success`.
    #[error("FortiOS API error: status {status}, http_status {http_status}, error code {code}")]
    Api {
        status: String,
        http_status: u16,
        code: i64,
    },

    /// Non-2xx reply without a JSON envelope.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Error::Api { http_status, .. } => Some(*http_status),
            Error::Http { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether a further attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }
}
