use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use std::sync::Arc;

use crate::domain::auth::{
    AuthService, AuthServiceApi, CredentialsRequest, RefreshTokenRequest, SessionResponse,
    TokenResponse,
};
use crate::{
    error::AppResult,
    infrastructure::auth::{bearer_token, AuthUser},
};

pub struct AuthController {
    auth_service: Arc<AuthService>,
}

impl AuthController {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }

    /// POST /auth/sign-up
    pub async fn sign_up(
        State(controller): State<Arc<AuthController>>,
        Json(request): Json<CredentialsRequest>,
    ) -> AppResult<(StatusCode, Json<TokenResponse>)> {
        let response = controller
            .auth_service
            .sign_up(&request.email, &request.password)
            .await?;
        Ok((StatusCode::CREATED, Json(response)))
    }

    /// POST /auth/sign-in
    pub async fn sign_in(
        State(controller): State<Arc<AuthController>>,
        Json(request): Json<CredentialsRequest>,
    ) -> AppResult<Json<TokenResponse>> {
        let response = controller
            .auth_service
            .sign_in(&request.email, &request.password)
            .await?;
        Ok(Json(response))
    }

    /// POST /auth/anonymous - Guest session
    pub async fn sign_in_anonymously(
        State(controller): State<Arc<AuthController>>,
    ) -> AppResult<Json<TokenResponse>> {
        let response = controller.auth_service.sign_in_anonymously().await?;
        Ok(Json(response))
    }

    /// POST /auth/refresh - Rotate the refresh token
    pub async fn refresh(
        State(controller): State<Arc<AuthController>>,
        Json(request): Json<RefreshTokenRequest>,
    ) -> AppResult<Json<TokenResponse>> {
        let response = controller
            .auth_service
            .refresh(&request.refresh_token)
            .await?;
        Ok(Json(response))
    }

    /// POST /auth/sign-out - Revoke a refresh token
    pub async fn sign_out(
        State(controller): State<Arc<AuthController>>,
        Json(request): Json<RefreshTokenRequest>,
    ) -> AppResult<StatusCode> {
        controller
            .auth_service
            .sign_out(&request.refresh_token)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// POST /auth/sign-out/all - Sign out of every device
    pub async fn sign_out_all(
        State(controller): State<Arc<AuthController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<StatusCode> {
        controller
            .auth_service
            .sign_out_all(auth_user.user_id)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /auth/session - Who is calling, if anyone
    pub async fn session(
        State(controller): State<Arc<AuthController>>,
        headers: HeaderMap,
    ) -> AppResult<Json<SessionResponse>> {
        let response = controller
            .auth_service
            .session(bearer_token(&headers))
            .await?;
        Ok(Json(response))
    }
}
