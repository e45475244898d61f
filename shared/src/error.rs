//! Classified error taxonomy for the reporting core
//!
//! Every externally-facing operation returns either a success value or a
//! classified failure reason. Raw provider errors are mapped at the
//! lifecycle/queue boundary and never reach the presentation layer.

use thiserror::Error;

/// Authentication failures mapped from provider-specific error codes to a
/// small fixed set of human-readable messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("This email is already registered.")]
    EmailAlreadyRegistered,

    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Password should be at least 6 characters.")]
    WeakPassword,

    #[error("Authentication failed. Please check your configuration.")]
    Failed,
}

/// Unified error type for the reporting core
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected locally before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// The connectivity monitor reports offline
    #[error("No network connection")]
    Offline,

    /// Classification call failed
    #[error("Classification failed: {0}")]
    Classifier(String),

    /// Missing or invalid API credentials
    #[error("Service is not configured: missing or invalid API credentials")]
    NotConfigured,

    /// Remote document store call failed
    #[error("Remote store error: {0}")]
    Store(String),

    /// Authentication failure (fixed human-readable set)
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Local persistence failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A promotion for this pending entry is already in flight
    #[error("Upload already in progress for pending report {0}")]
    PromotionInFlight(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a Classifier error
    pub fn classifier(message: impl Into<String>) -> Self {
        Self::Classifier(message.into())
    }

    /// Create a Store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// The single user-visible message for this failure
    pub fn user_message(&self) -> String {
        match self {
            Self::Classifier(_) => {
                "Failed to analyze the issue. Please check your internet connection and try again."
                    .to_string()
            }
            Self::Offline => "You are offline. The report was not sent.".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type for reporting-core operations
pub type AppResult<T> = Result<T, AppError>;
