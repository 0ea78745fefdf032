//! Error types for the review client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when querying the review API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The network call could not complete (DNS, timeout, connection reset)
    #[error("request to the review API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with something other than 200 OK
    #[error("review API returned status {status}: {body}")]
    Endpoint {
        /// HTTP status code
        status: u16,
        /// Response body, as far as it could be read
        body: String,
    },

    /// A nominally successful payload carried a server-side error marker
    #[error("review API reported a service error under {key:?}: {detail}")]
    Service {
        /// Which of the recognized error keys was present
        key: &'static str,
        /// The value stored under that key
        detail: String,
    },

    /// The response body could not be decoded
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Whether waiting and re-polling can plausibly resolve this error.
    ///
    /// Parse failures are excluded: an undecodable body points at a contract
    /// change on the server side rather than a transient condition.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Parse(_))
    }
}
