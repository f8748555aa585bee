use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{any, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{
    auth::AuthController, extraction::ExtractionController, health::HealthController,
    library::LibraryController, playback::PlaybackController, summary::SummaryController,
};
use crate::error::AppError;
use crate::infrastructure::auth::{auth_middleware, request_id_middleware, AuthState};
use crate::infrastructure::config::Config;

/// Multipart framing on top of the file itself, so an oversized file still
/// reaches the extraction service and gets its size error
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Controllers that need the database. Absent in demo mode.
pub struct AccountControllers {
    pub auth: Arc<AuthController>,
    pub library: Arc<LibraryController>,
    pub auth_state: Arc<AuthState>,
}

pub struct Controllers {
    pub health: Arc<HealthController>,
    pub extraction: Arc<ExtractionController>,
    pub summary: Arc<SummaryController>,
    pub playback: Arc<PlaybackController>,
    pub accounts: Option<AccountControllers>,
}

/// Assemble every route. Used by the binary and by the end-to-end tests.
pub fn build_router(controllers: Controllers, config: &Config) -> Router {
    let health_routes = Router::new()
        .route("/health", get(HealthController::health))
        .route("/health/ready", get(HealthController::ready))
        .with_state(controllers.health);

    let extraction_routes = Router::new()
        .route("/extract-url", post(ExtractionController::extract_url))
        .route(
            "/extract-pdf",
            post(ExtractionController::extract_pdf).layer(DefaultBodyLimit::max(
                config.max_pdf_bytes + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .with_state(controllers.extraction);

    let summary_routes = Router::new()
        .route("/summarize", post(SummaryController::summarize))
        .with_state(controllers.summary);

    let playback_routes = Router::new()
        .route("/api/playback/plan", post(PlaybackController::plan))
        .with_state(controllers.playback);

    let account_routes = match controllers.accounts {
        Some(accounts) => account_routes(accounts),
        None => {
            tracing::warn!("DATABASE_URL not set: auth and library routes answer 503");
            Router::new()
                .route("/auth/*rest", any(accounts_unavailable))
                .route("/api/library", any(accounts_unavailable))
                .route("/api/library/*rest", any(accounts_unavailable))
        }
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(health_routes)
        .merge(extraction_routes)
        .merge(summary_routes)
        .merge(playback_routes)
        .merge(account_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn account_routes(accounts: AccountControllers) -> Router {
    // Public auth routes; the session lookup reads the bearer itself
    let auth_routes = Router::new()
        .route("/auth/sign-up", post(AuthController::sign_up))
        .route("/auth/sign-in", post(AuthController::sign_in))
        .route("/auth/anonymous", post(AuthController::sign_in_anonymously))
        .route("/auth/refresh", post(AuthController::refresh))
        .route("/auth/sign-out", post(AuthController::sign_out))
        .route("/auth/session", get(AuthController::session))
        .with_state(accounts.auth.clone());

    let auth_protected_routes = Router::new()
        .route("/auth/sign-out/all", post(AuthController::sign_out_all))
        .with_state(accounts.auth)
        .layer(middleware::from_fn_with_state(
            accounts.auth_state.clone(),
            auth_middleware,
        ));

    let library_routes = Router::new()
        .route(
            "/api/library",
            get(LibraryController::list).post(LibraryController::save),
        )
        .route(
            "/api/library/:id",
            get(LibraryController::get).delete(LibraryController::delete),
        )
        .route(
            "/api/library/:id/accessed",
            put(LibraryController::mark_accessed),
        )
        .with_state(accounts.library)
        .layer(middleware::from_fn_with_state(
            accounts.auth_state,
            auth_middleware,
        ));

    auth_routes
        .merge(auth_protected_routes)
        .merge(library_routes)
}

async fn accounts_unavailable() -> AppError {
    AppError::Unavailable("Accounts are not configured on this server".to_string())
}

/// Bind and serve until the process is stopped
pub async fn start_http_server(
    router: Router,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
