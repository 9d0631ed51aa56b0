//! Error types for Currents API operations.

use thiserror::Error;

/// Errors that can occur during Currents API operations.
#[derive(Debug, Error)]
pub enum CurrentsError {
    /// Configuration is missing or incomplete.
    #[error("Currents configuration required: {0}")]
    ConfigMissing(String),

    /// API request failed with a non-2xx status.
    #[error("Currents API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

/// Result type alias for Currents operations.
pub type Result<T> = core::result::Result<T, CurrentsError>;
