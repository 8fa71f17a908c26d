//! Error types for the statistics API client

use thiserror::Error;

/// Errors raised by [`ApiClient`](crate::ApiClient).
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure or undecodable body
    #[error("HTTP error: {0}")]
    Http(String),

    /// Server answered with a non-success status
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// Response decoded but did not carry what was expected
    #[error("invalid response from {url}: {reason}")]
    InvalidResponse { url: String, reason: String },

    /// Players are created under a team; none was given
    #[error("player {0:?} has no team")]
    MissingTeam(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Http(err.to_string())
    }
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
