#![forbid(unsafe_code)]

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::Error),

    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("fallback dataset is unreadable: {0}")]
    Fallback(#[source] FetchError),
}

/// Failure of a single data source call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("server answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("unexpected payload from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    #[error("invalid request: {0}")]
    InvalidInput(String),

    #[error("{endpoint} failed after {attempts} attempts: {source}")]
    Exhausted {
        endpoint: String,
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// Whether another attempt could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Network(_) | FetchError::Timeout(_) => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::Parse { .. } | FetchError::InvalidInput(_) | FetchError::Exhausted { .. } => {
                false
            }
        }
    }

    /// The error that ended the last attempt.
    pub fn root(&self) -> &FetchError {
        match self {
            FetchError::Exhausted { source, .. } => source.root(),
            other => other,
        }
    }
}
