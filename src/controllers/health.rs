use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::infrastructure::db::{check_connection, DbPool};

pub struct HealthController {
    pool: Option<Arc<DbPool>>,
    summarizer_configured: bool,
    auth_configured: bool,
}

impl HealthController {
    pub fn new(
        pool: Option<Arc<DbPool>>,
        summarizer_configured: bool,
        auth_configured: bool,
    ) -> Self {
        Self {
            pool,
            summarizer_configured,
            auth_configured,
        }
    }

    /// GET /health - Liveness
    pub async fn health() -> impl IntoResponse {
        (StatusCode::OK, "OK")
    }

    /// GET /health/ready - Readiness of the optional backends
    ///
    /// A missing database is not a failure: the server runs in demo mode and
    /// stays ready. A configured database that cannot be reached is.
    pub async fn ready(State(controller): State<Arc<HealthController>>) -> impl IntoResponse {
        let (status, database) = match &controller.pool {
            None => (StatusCode::OK, "not_configured"),
            Some(pool) => match check_connection(pool).await {
                Ok(_) => (StatusCode::OK, "connected"),
                Err(e) => {
                    tracing::warn!(error = %e, "Readiness check could not reach the database");
                    (StatusCode::SERVICE_UNAVAILABLE, "disconnected")
                }
            },
        };

        let summarizer = if controller.summarizer_configured {
            "available"
        } else {
            "not_configured"
        };
        let auth = if controller.auth_configured {
            "available"
        } else {
            "not_configured"
        };

        (
            status,
            Json(json!({
                "status": if status.is_success() { "ready" } else { "not_ready" },
                "database": database,
                "summarizer": summarizer,
                "auth": auth,
            })),
        )
    }
}
