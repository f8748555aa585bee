use super::dto::{SessionResponse, SessionState, TokenResponse};
use super::error::AuthServiceError;
use super::jwt::{generate_refresh_token, JwtManager};
use crate::domain::user::{User, UserProfile};
use crate::infrastructure::identity::{IdentityAccount, IdentityProvider};
use crate::infrastructure::repositories::{RefreshTokenRepository, UserRepository};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct AuthService {
    user_repo: Arc<UserRepository>,
    refresh_token_repo: Arc<RefreshTokenRepository>,
    identity: Option<Arc<dyn IdentityProvider>>,
    jwt: Arc<JwtManager>,
    refresh_token_expiration_days: i64,
}

impl AuthService {
    /// `identity` is `None` when no identity provider key is configured;
    /// sign-up and sign-in then fail with `NotConfigured` while refresh,
    /// sign-out and session lookups keep working.
    pub fn new(
        user_repo: Arc<UserRepository>,
        refresh_token_repo: Arc<RefreshTokenRepository>,
        identity: Option<Arc<dyn IdentityProvider>>,
        jwt: Arc<JwtManager>,
        refresh_token_expiration_days: i64,
    ) -> Self {
        Self {
            user_repo,
            refresh_token_repo,
            identity,
            jwt,
            refresh_token_expiration_days,
        }
    }
}

#[async_trait]
pub trait AuthServiceApi: Send + Sync {
    /// Register a new email/password account and open a session
    async fn sign_up(&self, email: &str, password: &str)
        -> Result<TokenResponse, AuthServiceError>;

    async fn sign_in(&self, email: &str, password: &str)
        -> Result<TokenResponse, AuthServiceError>;

    /// Open a guest session backed by an anonymous provider account
    async fn sign_in_anonymously(&self) -> Result<TokenResponse, AuthServiceError>;

    /// Rotate a refresh token: the old one is revoked, a new pair is issued
    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AuthServiceError>;

    async fn sign_out(&self, refresh_token: &str) -> Result<(), AuthServiceError>;

    /// Revoke every refresh token of the user, ending all their sessions
    async fn sign_out_all(&self, user_id: Uuid) -> Result<(), AuthServiceError>;

    /// Describe the session behind an optional access token. Missing,
    /// invalid or expired tokens are reported as signed out.
    async fn session(&self, access_token: Option<&str>)
        -> Result<SessionResponse, AuthServiceError>;
}

#[async_trait]
impl AuthServiceApi for AuthService {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, AuthServiceError> {
        let (email, password) = validate_credentials(email, password)?;
        let account = self.identity()?.sign_up(email, password).await?;
        tracing::info!(provider_id = %account.provider_id, "Account registered");
        self.open_session(account).await
    }

    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, AuthServiceError> {
        let (email, password) = validate_credentials(email, password)?;
        let account = self.identity()?.sign_in(email, password).await?;
        self.open_session(account).await
    }

    async fn sign_in_anonymously(&self) -> Result<TokenResponse, AuthServiceError> {
        let account = self.identity()?.sign_in_anonymously().await?;
        self.open_session(account).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, AuthServiceError> {
        match self
            .refresh_token_repo
            .check_token_status(refresh_token)
            .await?
        {
            Some((revoked, expired)) if revoked || expired => {
                return Err(AuthServiceError::Expired)
            }
            Some(_) => {}
            None => return Err(AuthServiceError::Invalid),
        }

        let (user_id, _expires_at) = self
            .refresh_token_repo
            .find_valid(refresh_token)
            .await?
            .ok_or(AuthServiceError::Invalid)?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthServiceError::Unauthorized("User not found".to_string()))?;

        self.refresh_token_repo.revoke(refresh_token).await?;
        self.issue_tokens(&user).await
    }

    async fn sign_out(&self, refresh_token: &str) -> Result<(), AuthServiceError> {
        self.refresh_token_repo.revoke(refresh_token).await?;
        Ok(())
    }

    async fn sign_out_all(&self, user_id: Uuid) -> Result<(), AuthServiceError> {
        self.refresh_token_repo.revoke_all_for_user(user_id).await?;
        tracing::info!(user_id = %user_id, "Signed out of all sessions");
        Ok(())
    }

    async fn session(
        &self,
        access_token: Option<&str>,
    ) -> Result<SessionResponse, AuthServiceError> {
        let Some(token) = access_token else {
            return Ok(SessionResponse::signed_out());
        };
        let Ok(claims) = self.jwt.validate_token(token) else {
            return Ok(SessionResponse::signed_out());
        };
        let Ok(user_id) = claims.user_id() else {
            return Ok(SessionResponse::signed_out());
        };

        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            return Ok(SessionResponse::signed_out());
        };

        let state = if user.is_guest {
            SessionState::Guest
        } else {
            SessionState::Authenticated
        };
        Ok(SessionResponse {
            state,
            user: Some(UserProfile::from(&user)),
        })
    }
}

impl AuthService {
    fn identity(&self) -> Result<&Arc<dyn IdentityProvider>, AuthServiceError> {
        self.identity.as_ref().ok_or(AuthServiceError::NotConfigured)
    }

    async fn open_session(
        &self,
        account: IdentityAccount,
    ) -> Result<TokenResponse, AuthServiceError> {
        let user = self
            .user_repo
            .upsert_from_identity(
                &account.provider_id,
                account.email.as_deref(),
                account.is_anonymous,
            )
            .await?;

        tracing::info!(user_id = %user.id, guest = user.is_guest, "Session opened");
        self.issue_tokens(&user).await
    }

    async fn issue_tokens(&self, user: &User) -> Result<TokenResponse, AuthServiceError> {
        let token = self.jwt.generate_token(user)?;
        let refresh_token = generate_refresh_token();

        self.refresh_token_repo
            .create(user.id, &refresh_token, self.refresh_token_expiration_days)
            .await?;

        Ok(TokenResponse {
            token,
            refresh_token,
            expires_in: self.jwt.expires_in(),
            user: UserProfile::from(user),
        })
    }
}

fn validate_credentials<'a>(
    email: &'a str,
    password: &'a str,
) -> Result<(&'a str, &'a str), AuthServiceError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AuthServiceError::InvalidInput(
            "Email and password are required".to_string(),
        ));
    }
    Ok((email, password))
}
