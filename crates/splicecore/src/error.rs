use reqwest::StatusCode;
use thiserror::Error;

/// Transport-level error taxonomy.
///
/// Every variant is recoverable at the bootstrap level: after the retry
/// budget is spent the sequencer degrades to the built-in catalog instead
/// of surfacing any of these to the user.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request exceeded the configured timeout and was aborted
    #[error("request timed out")]
    Timeout,

    /// The backend answered with a non-success status
    #[error("HTTP request failed with status: {0}")]
    Http(StatusCode),

    /// The endpoint cannot be served by the active transport
    /// (in mock mode, downloads travel over the Telegram bridge instead)
    #[error("endpoint not supported by this transport: {0}")]
    UnsupportedEndpoint(String),

    /// The response arrived but did not match the endpoint's schema
    #[error("malformed response: {0}")]
    Parse(String),

    /// Connection-level failure before any HTTP status was produced
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_decode() {
            TransportError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::Http(status)
        } else {
            TransportError::Network(err)
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Parse(err.to_string())
    }
}

/// Type alias for Result with TransportError
pub type TransportResult<T> = Result<T, TransportError>;
