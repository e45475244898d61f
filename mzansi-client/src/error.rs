//! Client error types

use thiserror::Error;

use shared::error::AuthError;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing or invalid API credentials
    #[error("Service not configured: missing or invalid API credentials")]
    NotConfigured,

    /// Authentication failure (fixed human-readable set)
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether this failure indicates missing/invalid API credentials.
    ///
    /// Providers report bad keys inside an otherwise generic error body,
    /// so the body text is pattern-matched here.
    pub fn detect_not_configured(body: &str) -> bool {
        body.contains("API key not valid")
            || body.contains("API_KEY_INVALID")
            || body.contains("PERMISSION_DENIED")
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_bad_key_patterns() {
        assert!(ClientError::detect_not_configured(
            r#"{"error":{"message":"API key not valid. Please pass a valid API key."}}"#
        ));
        assert!(ClientError::detect_not_configured("API_KEY_INVALID"));
        assert!(!ClientError::detect_not_configured("quota exceeded"));
    }
}
