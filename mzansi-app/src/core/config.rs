//! Application configuration
//!
//! # Environment variables
//!
//! Every setting can be overridden through the environment:
//!
//! | Variable | Default | Purpose |
//! |----------|---------|---------|
//! | WORK_DIR | ./mzansi-data | Local store and log directory |
//! | CLASSIFIER_API_KEY | (empty) | Generative-AI API key |
//! | CLASSIFIER_BASE_URL | https://generativelanguage.googleapis.com | Classifier endpoint |
//! | CLASSIFIER_MODEL | gemini-2.5-flash | Model identifier |
//! | STORE_BASE_URL | http://localhost:8080 | Remote document store |
//! | IDENTITY_BASE_URL | https://identitytoolkit.googleapis.com | Identity provider |
//! | IDENTITY_API_KEY | (empty) | Identity provider API key |
//! | LOCATION_TIMEOUT_MS | 20000 | Location acquisition wait bound |
//! | REQUEST_TIMEOUT_SECS | 30 | HTTP request timeout |

use mzansi_client::ClientConfig;

/// Location acquisition policy handed to the platform layer.
///
/// Always a fresh high-accuracy reading: cached positions are never
/// accepted, and the wait is bounded.
#[derive(Debug, Clone, Copy)]
pub struct LocationRequest {
    pub high_accuracy: bool,
    pub timeout_ms: u64,
    pub max_age_ms: u64,
}

/// Reporting-core configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory for the local store and log files
    pub work_dir: String,
    /// Generative-AI API key (classifier + chat)
    pub classifier_api_key: String,
    /// Generative-AI endpoint base URL
    pub classifier_base_url: String,
    /// Model identifier
    pub classifier_model: String,
    /// Remote document store base URL
    pub store_base_url: String,
    /// Identity provider base URL
    pub identity_base_url: String,
    /// Identity provider API key
    pub identity_api_key: String,
    /// Location acquisition wait bound (milliseconds)
    pub location_timeout_ms: u64,
    /// HTTP request timeout (seconds)
    pub request_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./mzansi-data".into()),
            classifier_api_key: std::env::var("CLASSIFIER_API_KEY").unwrap_or_default(),
            classifier_base_url: std::env::var("CLASSIFIER_BASE_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".into()),
            classifier_model: std::env::var("CLASSIFIER_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".into()),
            store_base_url: std::env::var("STORE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".into()),
            identity_base_url: std::env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| "https://identitytoolkit.googleapis.com".into()),
            identity_api_key: std::env::var("IDENTITY_API_KEY").unwrap_or_default(),
            location_timeout_ms: std::env::var("LOCATION_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20_000),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Override the work directory and API key, for tests
    pub fn with_overrides(work_dir: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.classifier_api_key = api_key.into();
        config
    }

    /// Adapter to the remote-collaborator configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.classifier_api_key.clone(),
            base_url: self.classifier_base_url.clone(),
            model: self.classifier_model.clone(),
            store_base_url: self.store_base_url.clone(),
            identity_base_url: self.identity_base_url.clone(),
            identity_api_key: self.identity_api_key.clone(),
            timeout: self.request_timeout_secs,
        }
    }

    /// The location acquisition policy
    pub fn location_request(&self) -> LocationRequest {
        LocationRequest {
            high_accuracy: true,
            timeout_ms: self.location_timeout_ms,
            max_age_ms: 0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
