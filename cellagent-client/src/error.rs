//! Error types for the stream consumer.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures of a client-side stream.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or protocol failures reported by the HTTP client
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP error {status}: {body}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// Response body, if readable
        body: String,
    },
}

impl ClientError {
    /// Create an HTTP status error.
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Whether retrying the same request could succeed.
    ///
    /// The consumer never retries on its own; this is advice for the caller.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_connect() || e.is_timeout(),
            Self::HttpStatus { status, .. } => *status >= 500,
        }
    }

    /// Get the error category for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::HttpStatus { .. } => "http_status",
        }
    }
}
