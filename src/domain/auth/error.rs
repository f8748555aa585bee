use crate::error::AppError;
use crate::infrastructure::identity::IdentityError;

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("invalid refresh token")]
    Invalid,
    #[error("token expired")]
    Expired,
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error("sign-in is not configured")]
    NotConfigured,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for AuthServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::InvalidRefreshToken => AuthServiceError::Invalid,
            AppError::RefreshTokenExpired => AuthServiceError::Expired,
            AppError::Unauthorized(msg) => AuthServiceError::Unauthorized(msg),
            _ => AuthServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<IdentityError> for AuthServiceError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::EmailExists => {
                AuthServiceError::Conflict("An account with this email already exists".to_string())
            }
            IdentityError::InvalidCredentials => {
                AuthServiceError::Unauthorized("Invalid email or password".to_string())
            }
            IdentityError::InvalidInput(msg) => AuthServiceError::InvalidInput(msg),
            IdentityError::Rejected(_) | IdentityError::Transport(_) => {
                AuthServiceError::Dependency(err.to_string())
            }
        }
    }
}

impl From<AuthServiceError> for AppError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::Invalid => AppError::InvalidRefreshToken,
            AuthServiceError::Expired => AppError::RefreshTokenExpired,
            AuthServiceError::Unauthorized(msg) => AppError::Unauthorized(msg),
            AuthServiceError::InvalidInput(msg) => AppError::BadRequest(msg),
            AuthServiceError::Conflict(msg) => AppError::Conflict(msg),
            AuthServiceError::NotConfigured => AppError::Unavailable(err.to_string()),
            AuthServiceError::Dependency(msg) => AppError::ExternalService(msg),
            AuthServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
