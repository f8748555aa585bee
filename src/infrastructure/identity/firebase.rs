use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Account as reported by the identity provider
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityAccount {
    pub provider_id: String,
    pub email: Option<String>,
    pub is_anonymous: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("email already registered")]
    EmailExists,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    InvalidInput(String),
    #[error("identity provider rejected the request: {0}")]
    Rejected(String),
    #[error("identity provider unreachable: {0}")]
    Transport(String),
}

/// Delegated account management (sign-up, password sign-in, guest sign-in)
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityAccount, IdentityError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityAccount, IdentityError>;

    async fn sign_in_anonymously(&self) -> Result<IdentityAccount, IdentityError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccountRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Client for the Firebase Auth (Identity Toolkit) REST API
pub struct FirebaseIdentityClient {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
}

impl FirebaseIdentityClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    async fn call(
        &self,
        method: &str,
        body: &AccountRequest<'_>,
    ) -> Result<AccountResponse, IdentityError> {
        let url = format!("{}/accounts:{}", self.base_url, method);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| IdentityError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(method, status = status.as_u16(), "Identity provider call failed");
            return Err(map_error_message(&text));
        }

        response
            .json::<AccountResponse>()
            .await
            .map_err(|e| IdentityError::Rejected(format!("Malformed identity response: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityClient {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityAccount, IdentityError> {
        let account = self
            .call(
                "signUp",
                &AccountRequest {
                    email: Some(email),
                    password: Some(password),
                    return_secure_token: true,
                },
            )
            .await?;
        Ok(IdentityAccount {
            provider_id: account.local_id,
            email: account.email.or_else(|| Some(email.to_string())),
            is_anonymous: false,
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityAccount, IdentityError> {
        let account = self
            .call(
                "signInWithPassword",
                &AccountRequest {
                    email: Some(email),
                    password: Some(password),
                    return_secure_token: true,
                },
            )
            .await?;
        Ok(IdentityAccount {
            provider_id: account.local_id,
            email: account.email.or_else(|| Some(email.to_string())),
            is_anonymous: false,
        })
    }

    async fn sign_in_anonymously(&self) -> Result<IdentityAccount, IdentityError> {
        let account = self
            .call(
                "signUp",
                &AccountRequest {
                    email: None,
                    password: None,
                    return_secure_token: true,
                },
            )
            .await?;
        Ok(IdentityAccount {
            provider_id: account.local_id,
            email: None,
            is_anonymous: true,
        })
    }
}

/// Map the provider's error code (`EMAIL_EXISTS`, `WEAK_PASSWORD : ...`)
fn map_error_message(body: &str) -> IdentityError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.to_string());
    let code = message.split(" : ").next().unwrap_or_default().trim();

    match code {
        "EMAIL_EXISTS" => IdentityError::EmailExists,
        "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" | "USER_DISABLED" => {
            IdentityError::InvalidCredentials
        }
        "WEAK_PASSWORD" => IdentityError::InvalidInput("Password should be at least 6 characters".to_string()),
        "INVALID_EMAIL" | "MISSING_EMAIL" => IdentityError::InvalidInput("Invalid email address".to_string()),
        "MISSING_PASSWORD" => IdentityError::InvalidInput("Password is required".to_string()),
        _ => IdentityError::Rejected(message),
    }
}
