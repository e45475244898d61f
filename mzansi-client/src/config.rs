//! Client configuration

/// Configuration for the remote collaborators
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Generative-AI API key (classifier + chat)
    pub api_key: String,
    /// Generative-AI endpoint base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Remote document store base URL
    pub store_base_url: String,
    /// Identity provider base URL
    pub identity_base_url: String,
    /// Identity provider API key
    pub identity_api_key: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            store_base_url: "http://localhost:8080".to_string(),
            identity_base_url: "https://identitytoolkit.googleapis.com".to_string(),
            identity_api_key: String::new(),
            timeout: 30,
        }
    }
}

impl ClientConfig {
    /// Set the generative-AI API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}
