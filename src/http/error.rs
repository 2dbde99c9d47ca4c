//! Error types for API client operations.

use thiserror::Error;

/// Result type for API client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// An API request failure.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-success response outside the not-found fallback path. The
    /// message is the response body when the backend sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Every candidate base URL answered not-found.
    #[error("API request failed with status {status} at every endpoint.")]
    Exhausted { status: u16 },

    /// Connection, timeout, or response decoding failure.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// HTTP status carried by this error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Exhausted { status } => Some(*status),
            ClientError::Transport(error) => error.status().map(|s| s.as_u16()),
        }
    }
}
