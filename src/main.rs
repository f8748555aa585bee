use async_openai::{config::OpenAIConfig, Client};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use speakit_backend::controllers::{
    auth::AuthController, extraction::ExtractionController, health::HealthController,
    library::LibraryController, playback::PlaybackController, summary::SummaryController,
};
use speakit_backend::domain::{
    auth::{AuthService, JwtManager},
    extraction::ExtractionService,
    library::LibraryService,
    summary::SummaryService,
};
use speakit_backend::infrastructure::auth::AuthState;
use speakit_backend::infrastructure::config::{Config, LogFormat};
use speakit_backend::infrastructure::db::{check_connection, create_pool, run_migrations, DbPool};
use speakit_backend::infrastructure::http::{
    build_router, start_http_server, AccountControllers, Controllers,
};
use speakit_backend::infrastructure::identity::{FirebaseIdentityClient, IdentityProvider};
use speakit_backend::infrastructure::repositories::{
    HttpPageRepository, OpenAiSummaryRepository, RefreshTokenRepository,
    SavedContentRepository, SummaryRepository, UserRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting Speakit Backend on {}:{}",
        config.host,
        config.port
    );

    let pool = match &config.database_url {
        Some(url) => {
            let pool = create_pool(url).await?;
            check_connection(&pool).await?;
            run_migrations(&pool).await?;
            tracing::info!("Database connection verified and migrations applied");
            Some(Arc::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, running in demo mode without accounts");
            None
        }
    };

    // === DEPENDENCY INJECTION SETUP ===
    let page_repo = Arc::new(HttpPageRepository::new(Duration::from_secs(
        config.fetch_timeout_secs,
    ))?);

    let summary_repo: Option<Arc<dyn SummaryRepository>> = match &config.openai_api_key {
        Some(api_key) => {
            let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
            if let Some(base_url) = &config.openai_base_url {
                openai_config = openai_config.with_api_base(base_url);
            }
            tracing::info!(model = %config.summary_model, "Summarization enabled");
            Some(Arc::new(OpenAiSummaryRepository::new(
                Arc::new(Client::with_config(openai_config)),
                config.summary_model.clone(),
                config.summary_max_tokens,
            )))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set, /summarize answers 503");
            None
        }
    };

    let extraction_service = Arc::new(ExtractionService::new(
        page_repo,
        config.max_pdf_bytes,
        config.extraction_cache_enabled,
    ));
    let summary_service = Arc::new(SummaryService::new(
        summary_repo,
        config.summary_max_words,
    ));

    let health_controller = Arc::new(HealthController::new(
        pool.clone(),
        summary_service.is_configured(),
        config.is_auth_configured(),
    ));

    let controllers = Controllers {
        health: health_controller,
        extraction: Arc::new(ExtractionController::new(extraction_service)),
        summary: Arc::new(SummaryController::new(summary_service)),
        playback: Arc::new(PlaybackController::new(config.base_words_per_minute)),
        accounts: pool
            .map(|pool| account_controllers(&config, pool)),
    };

    let router = build_router(controllers, &config);
    start_http_server(router, &config).await?;

    Ok(())
}

fn account_controllers(config: &Config, pool: Arc<DbPool>) -> AccountControllers {
    let user_repo = Arc::new(UserRepository::new(pool.clone()));
    let refresh_token_repo = Arc::new(RefreshTokenRepository::new(pool.clone()));
    let saved_content_repo = Arc::new(SavedContentRepository::new(pool));

    let identity: Option<Arc<dyn IdentityProvider>> = match &config.firebase_api_key {
        Some(api_key) => Some(Arc::new(FirebaseIdentityClient::new(
            api_key.clone(),
            config.identity_base_url.clone(),
        ))),
        None => {
            tracing::warn!("FIREBASE_API_KEY not set, sign-in and sign-up answer 503");
            None
        }
    };

    let jwt = Arc::new(JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_expiration_hours,
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repo.clone(),
        refresh_token_repo,
        identity,
        jwt.clone(),
        config.refresh_token_expiration_days,
    ));
    let library_service = Arc::new(LibraryService::new(saved_content_repo));

    AccountControllers {
        auth: Arc::new(AuthController::new(auth_service)),
        library: Arc::new(LibraryController::new(library_service)),
        auth_state: Arc::new(AuthState { user_repo, jwt }),
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "speakit_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
