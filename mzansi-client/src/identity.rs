//! Identity provider
//!
//! Email/password authentication against an identity-toolkit-style REST
//! API. Provider error codes are mapped to the fixed [`AuthError`] set;
//! raw provider messages never reach the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use shared::error::AuthError;
use shared::models::{AuthSession, User};

use crate::{ClientConfig, ClientError, ClientResult};

/// Registration input, validated locally before any network call
#[derive(Debug, Clone, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, message = "All fields are required."))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 6, message = "Password should be at least 6 characters."))]
    pub password: String,
}

/// Login input. Credential checks are the provider's job here; only
/// presence is verified locally.
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Remote identity collaborator
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account; returns an authenticated session.
    async fn register(&self, input: &RegisterInput) -> ClientResult<AuthSession>;

    /// Sign in with email and password.
    async fn login(&self, input: &LoginInput) -> ClientResult<AuthSession>;

    /// End the current session. Local-only for stateless REST providers.
    async fn logout(&self) -> ClientResult<()>;
}

// ========== Identity-toolkit wire types ==========

#[derive(Debug, Deserialize)]
struct SignInResponse {
    #[serde(rename = "localId")]
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Map a provider error code to the fixed auth error set
fn map_auth_error(code: &str) -> AuthError {
    // WEAK_PASSWORD arrives with a suffix ("WEAK_PASSWORD : ...")
    if code.starts_with("WEAK_PASSWORD") {
        return AuthError::WeakPassword;
    }
    match code {
        "EMAIL_EXISTS" => AuthError::EmailAlreadyRegistered,
        "INVALID_EMAIL" => AuthError::InvalidEmail,
        "INVALID_LOGIN_CREDENTIALS" | "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" => {
            AuthError::InvalidCredentials
        }
        _ => AuthError::Failed,
    }
}

/// HTTP identity provider client
#[derive(Debug, Clone)]
pub struct RestIdentityProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestIdentityProvider {
    /// Create a new identity client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.identity_base_url.clone(),
            api_key: config.identity_api_key.clone(),
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/v1/accounts:{}?key={}",
            self.base_url.trim_end_matches('/'),
            action,
            self.api_key
        )
    }

    /// Post credentials to an accounts endpoint and map failures
    async fn sign(&self, action: &str, body: serde_json::Value) -> ClientResult<SignInResponse> {
        if self.api_key.trim().is_empty() {
            return Err(ClientError::NotConfigured);
        }

        let response = self
            .client
            .post(self.endpoint(action))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            let code = serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error.message)
                .unwrap_or_default();
            tracing::warn!(action, code = %code, "identity request rejected");
            return Err(ClientError::Auth(map_auth_error(&code)));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    async fn register(&self, input: &RegisterInput) -> ClientResult<AuthSession> {
        if input.name.trim().is_empty()
            || input.email.trim().is_empty()
            || input.password.is_empty()
        {
            return Err(ClientError::Validation(
                "All fields are required.".to_string(),
            ));
        }
        input
            .validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        let signed = self
            .sign(
                "signUp",
                json!({
                    "email": input.email,
                    "password": input.password,
                    "displayName": input.name,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        Ok(AuthSession {
            user_id: signed.local_id,
            user: User::new(input.name.clone(), input.email.clone()),
        })
    }

    async fn login(&self, input: &LoginInput) -> ClientResult<AuthSession> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(ClientError::Validation(
                "All fields are required.".to_string(),
            ));
        }

        let signed = self
            .sign(
                "signInWithPassword",
                json!({
                    "email": input.email,
                    "password": input.password,
                    "returnSecureToken": true,
                }),
            )
            .await?;

        let name = signed
            .display_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| signed.email.clone());

        Ok(AuthSession {
            user_id: signed.local_id,
            user: User::new(name, signed.email),
        })
    }

    async fn logout(&self) -> ClientResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_codes_map_to_fixed_errors() {
        assert_eq!(map_auth_error("EMAIL_EXISTS"), AuthError::EmailAlreadyRegistered);
        assert_eq!(map_auth_error("INVALID_EMAIL"), AuthError::InvalidEmail);
        assert_eq!(
            map_auth_error("INVALID_LOGIN_CREDENTIALS"),
            AuthError::InvalidCredentials
        );
        assert_eq!(map_auth_error("EMAIL_NOT_FOUND"), AuthError::InvalidCredentials);
        assert_eq!(map_auth_error("INVALID_PASSWORD"), AuthError::InvalidCredentials);
        assert_eq!(
            map_auth_error("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthError::WeakPassword
        );
        assert_eq!(map_auth_error("SOMETHING_ELSE"), AuthError::Failed);
    }

    #[test]
    fn register_input_rejects_short_password() {
        let input = RegisterInput {
            name: "Thabo".to_string(),
            email: "thabo@example.com".to_string(),
            password: "12345".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn register_input_accepts_valid_fields() {
        let input = RegisterInput {
            name: "Thabo".to_string(),
            email: "thabo@example.com".to_string(),
            password: "123456".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[tokio::test]
    async fn empty_login_fields_are_rejected_locally() {
        let provider = RestIdentityProvider::new(&ClientConfig::default());
        let err = provider
            .login(&LoginInput {
                email: String::new(),
                password: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn login_defers_credential_checks_to_the_provider() {
        // Present but malformed credentials pass the local check and reach
        // the provider call, which fails fast here on the missing key.
        let provider = RestIdentityProvider::new(&ClientConfig::default());
        let err = provider
            .login(&LoginInput {
                email: "not-an-email".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotConfigured));
    }

    #[test]
    fn error_body_parses_provider_shape() {
        let parsed: ErrorResponse = serde_json::from_str(
            r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#,
        )
        .unwrap();
        assert_eq!(parsed.error.message, "EMAIL_EXISTS");
    }
}
