use crate::domain::user::UserProfile;
use serde::{Deserialize, Serialize};

/// Email + password for sign-up and sign-in
#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Refresh token request
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Issued tokens plus the user they belong to
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    SignedOut,
    Guest,
    Authenticated,
}

/// Response for GET /auth/session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

impl SessionResponse {
    pub fn signed_out() -> Self {
        Self {
            state: SessionState::SignedOut,
            user: None,
        }
    }
}
