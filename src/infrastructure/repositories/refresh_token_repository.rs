use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;

/// Refresh tokens are opaque to clients and stored only as SHA-256 digests
pub struct RefreshTokenRepository {
    pool: Arc<DbPool>,
}

impl RefreshTokenRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Store a new refresh token
    pub async fn create(&self, user_id: Uuid, token: &str, expiration_days: i64) -> AppResult<()> {
        let pool = self.pool.as_ref();
        let now = Utc::now();
        let expires_at = now + Duration::days(expiration_days);

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token_hash, expires_at, created_at, revoked)
            VALUES ($1, $2, $3, $4, $5, false)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(hash_token(token))
        .bind(expires_at)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Owner of a non-revoked, non-expired token
    pub async fn find_valid(&self, token: &str) -> AppResult<Option<(Uuid, DateTime<Utc>)>> {
        let pool = self.pool.as_ref();
        let result = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            r#"
            SELECT user_id, expires_at
            FROM refresh_tokens
            WHERE token_hash = $1
              AND NOT revoked
              AND expires_at > NOW()
            "#,
        )
        .bind(hash_token(token))
        .fetch_optional(pool)
        .await?;

        Ok(result)
    }

    /// `(revoked, expired)` for a known token, `None` for an unknown one
    pub async fn check_token_status(&self, token: &str) -> AppResult<Option<(bool, bool)>> {
        let pool = self.pool.as_ref();
        let result = sqlx::query_as::<_, (bool, DateTime<Utc>)>(
            r#"
            SELECT revoked, expires_at
            FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(hash_token(token))
        .fetch_optional(pool)
        .await?;

        Ok(result.map(|(revoked, expires_at)| (revoked, expires_at <= Utc::now())))
    }

    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE token_hash = $1")
            .bind(hash_token(token))
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Revoke every live refresh token of a user (sign out everywhere)
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND NOT revoked")
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

/// Hex-encoded SHA-256 of a refresh token
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
