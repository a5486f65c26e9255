//! Booking backend error types.

/// Errors from the booking backend client.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Backend returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Requested record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing or rejected bearer token
    #[error("unauthorized (missing or expired token)")]
    Unauthorized,

    /// Client or mock is not set up for this request
    #[error("not configured: {0}")]
    NotConfigured(String),
}
