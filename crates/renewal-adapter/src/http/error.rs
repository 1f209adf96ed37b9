/*
[INPUT]:  Error sources (HTTP, API, serialization, client identity)
[OUTPUT]: Structured error types with context and retry hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the renewal adapter
#[derive(Error, Debug)]
pub enum RenewalError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Client certificate or CA bundle could not be loaded
    #[error("Client identity error: {0}")]
    Identity(String),

    /// Connection timeout
    #[error("Connection timeout after {duration}s")]
    Timeout { duration: u64 },
}

impl RenewalError {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            RenewalError::Http(_) | RenewalError::Timeout { .. } => true,
            RenewalError::Api { code, .. } => *code >= 500 || *code == 429,
            _ => false,
        }
    }

    /// Get retry delay in seconds (if retryable)
    pub fn retry_delay(&self) -> Option<u64> {
        match self {
            RenewalError::Timeout { .. } => Some(1),
            RenewalError::Api { code: 429, .. } => Some(5),
            _ => None,
        }
    }

    /// Check if error indicates the service refused the client identity
    pub fn is_auth_error(&self) -> bool {
        match self {
            RenewalError::Identity(_) => true,
            RenewalError::Api { code, .. } => *code == 401 || *code == 403,
            _ => false,
        }
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        RenewalError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }
}

/// Result type alias for renewal service operations
pub type Result<T> = std::result::Result<T, RenewalError>;
