use crate::infrastructure::db::DbPool;
use crate::{domain::user::User, error::AppResult};
use std::sync::Arc;
use uuid::Uuid;

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Insert the user on first sign-in, refresh email and guest flag afterwards
    pub async fn upsert_from_identity(
        &self,
        provider_id: &str,
        email: Option<&str>,
        is_guest: bool,
    ) -> AppResult<User> {
        let pool = self.pool.as_ref();
        let now = chrono::Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, identity_provider_id, email, is_guest, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (identity_provider_id) DO UPDATE
            SET email = EXCLUDED.email,
                is_guest = EXCLUDED.is_guest,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(provider_id)
        .bind(email)
        .bind(is_guest)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}
