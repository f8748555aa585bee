use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::auth::JwtManager, error::AppError, infrastructure::repositories::UserRepository,
};

/// What the bearer-auth layer needs to resolve a caller
pub struct AuthState {
    pub user_repo: Arc<UserRepository>,
    pub jwt: Arc<JwtManager>,
}

/// Caller identity injected into request extensions. Guests are allowed
/// through; handlers that care can look at `is_guest`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub is_guest: bool,
}

/// Token from an `Authorization: Bearer <token>` header, if any
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn auth_middleware(
    State(state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if request.headers().get(AUTHORIZATION).is_none() {
        return Err(AppError::Unauthorized(
            "Missing authorization header".to_string(),
        ));
    }
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization format".to_string()))?;

    let claims = state.jwt.validate_token(token)?;
    let user = state
        .user_repo
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    request.extensions_mut().insert(AuthUser {
        user_id: user.id,
        email: user.email,
        is_guest: user.is_guest,
    });

    Ok(next.run(request).await)
}
