use thiserror::Error;

/// Errors produced while talking to the search backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SuggestError {
    /// Network error during a backend request
    #[error("network error: {0}")]
    Network(String),

    /// Backend returned a non-success status
    #[error("search API error ({code}): {message}")]
    Api { code: u16, message: String },

    /// Response body could not be decoded
    #[error("malformed response: {0}")]
    Parse(String),

    /// Request was superseded by a newer query
    #[error("request cancelled")]
    Cancelled,
}
