use anyhow::Result;
use async_openai::{config::OpenAIConfig, Client};
use axum::Router;
use once_cell::sync::Lazy;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use testcontainers::{clients::Cli, Container};
use testcontainers_modules::postgres::Postgres;
use tokio::net::TcpListener;
use wiremock::MockServer;

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
use speakit_backend::infrastructure::config::Config;
use speakit_backend::infrastructure::http::{build_router, AccountControllers, Controllers};
use speakit_backend::infrastructure::identity::{FirebaseIdentityClient, IdentityProvider};
use speakit_backend::infrastructure::repositories::{
    HttpPageRepository, OpenAiSummaryRepository, RefreshTokenRepository,
    SavedContentRepository, SummaryRepository, UserRepository,
};

pub mod db_pool;
pub mod fixtures;

use api_client::TestClient;
use db_pool::{DatabasePool, PooledDatabase};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-key-for-testing-only";

/// PDF upload limit used by the test servers
pub const TEST_MAX_PDF_BYTES: usize = 64 * 1024;

static DOCKER: Lazy<Cli> = Lazy::new(Cli::default);

static SHARED_CONTAINER: Lazy<SharedContainer> = Lazy::new(SharedContainer::new);

static DB_POOL: Lazy<DatabasePool> = Lazy::new(|| DatabasePool::new(SHARED_CONTAINER.port));

/// One PostgreSQL container shared by every database-backed test
struct SharedContainer {
    _container: Container<'static, Postgres>,
    port: u16,
}

impl SharedContainer {
    fn new() -> Self {
        let container = DOCKER.run(Postgres::default());
        let port = container.get_host_port_ipv4(5432);
        println!("Started shared PostgreSQL container on port {}", port);
        Self {
            _container: container,
            port,
        }
    }
}

/// Server without a database. The wiremock server stands in for both the
/// pages being extracted and the OpenAI API.
pub struct TestContext {
    pub client: TestClient,
    pub upstream: MockServer,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let upstream = MockServer::start().await;
            let client = spawn_app(&[
                ("OPENAI_API_KEY", "test-openai-key"),
                ("OPENAI_BASE_URL", upstream.uri().as_str()),
            ])
            .await
            .expect("Failed to start app");

            Self { client, upstream }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

/// Server backed by an isolated Postgres database, with the identity
/// provider served by wiremock
pub struct DbTestContext {
    pub client: TestClient,
    #[allow(dead_code)]
    pub pool: PgPool,
    pub identity: MockServer,
    pub fixtures: fixtures::TestFixtures,
    _db: PooledDatabase,
}

impl AsyncTestContext for DbTestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let pooled_db = DB_POOL
                .get_database()
                .await
                .expect("Failed to get database from pool");
            let identity = MockServer::start().await;

            let client = spawn_app(&[
                ("DATABASE_URL", pooled_db.database_url.as_str()),
                ("JWT_SECRET", TEST_JWT_SECRET),
                ("FIREBASE_API_KEY", "test-firebase-key"),
                ("IDENTITY_BASE_URL", identity.uri().as_str()),
            ])
            .await
            .expect("Failed to start app");

            Self {
                client,
                pool: pooled_db.pool.clone(),
                identity,
                fixtures: fixtures::TestFixtures::new(pooled_db.pool.clone()),
                _db: pooled_db,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        // The leased database is cleaned and recycled when dropped
        async {}
    }
}

/// Build a config from `vars` on top of the defaults, wire the app the way
/// the binary does and serve it on an ephemeral port
pub async fn spawn_app(vars: &[(&str, &str)]) -> Result<TestClient> {
    let mut env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    env.entry("MAX_PDF_BYTES".to_string())
        .or_insert_with(|| TEST_MAX_PDF_BYTES.to_string());
    env.entry("FETCH_TIMEOUT_SECS".to_string())
        .or_insert_with(|| "5".to_string());

    let config = Config::from_lookup(|key| env.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Invalid test config: {}", e))?;

    let pool = match &config.database_url {
        Some(url) => Some(Arc::new(PgPool::connect(url).await?)),
        None => None,
    };

    let app = create_app(&config, pool)?;

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let base_url = format!("http://{}", listener.local_addr()?);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    Ok(TestClient::new(&base_url))
}

fn create_app(config: &Config, pool: Option<Arc<PgPool>>) -> Result<Router> {
    let page_repo = Arc::new(HttpPageRepository::new(Duration::from_secs(
        config.fetch_timeout_secs,
    ))?);

    let summary_repo: Option<Arc<dyn SummaryRepository>> =
        config.openai_api_key.as_ref().map(|api_key| {
            let mut openai_config = OpenAIConfig::new().with_api_key(api_key);
            if let Some(base_url) = &config.openai_base_url {
                openai_config = openai_config.with_api_base(base_url);
            }
            Arc::new(OpenAiSummaryRepository::new(
                Arc::new(Client::with_config(openai_config)),
                config.summary_model.clone(),
                config.summary_max_tokens,
            )) as Arc<dyn SummaryRepository>
        });

    let extraction_service = Arc::new(ExtractionService::new(
        page_repo,
        config.max_pdf_bytes,
        false,
    ));
    let summary_service = Arc::new(SummaryService::new(summary_repo, config.summary_max_words));

    let accounts = pool.clone().map(|pool| {
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let refresh_token_repo = Arc::new(RefreshTokenRepository::new(pool.clone()));
        let saved_content_repo = Arc::new(SavedContentRepository::new(pool));
        let identity = config.firebase_api_key.as_ref().map(|key| {
            Arc::new(FirebaseIdentityClient::new(
                key.clone(),
                config.identity_base_url.clone(),
            )) as Arc<dyn IdentityProvider>
        });
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

        AccountControllers {
            auth: Arc::new(AuthController::new(auth_service)),
            library: Arc::new(LibraryController::new(Arc::new(LibraryService::new(
                saved_content_repo,
            )))),
            auth_state: Arc::new(AuthState { user_repo, jwt }),
        }
    });

    let controllers = Controllers {
        health: Arc::new(HealthController::new(
            pool,
            summary_service.is_configured(),
            config.is_auth_configured(),
        )),
        extraction: Arc::new(ExtractionController::new(extraction_service)),
        summary: Arc::new(SummaryController::new(summary_service)),
        playback: Arc::new(PlaybackController::new(config.base_words_per_minute)),
        accounts,
    };

    Ok(build_router(controllers, config))
}
