use crate::domain::library::{SaveContentRequest, SavedContent};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct SavedContentRepository {
    pool: Arc<DbPool>,
}

impl SavedContentRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Saved items of a user, most recently accessed first
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<SavedContent>> {
        let pool = self.pool.as_ref();
        let items = sqlx::query_as::<_, SavedContent>(
            "SELECT * FROM saved_content WHERE user_id = $1 ORDER BY last_accessed_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(items)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SavedContent>> {
        let pool = self.pool.as_ref();
        let item = sqlx::query_as::<_, SavedContent>("SELECT * FROM saved_content WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(item)
    }

    pub async fn create(&self, user_id: Uuid, request: &SaveContentRequest) -> AppResult<Uuid> {
        let pool = self.pool.as_ref();
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO saved_content
                (id, user_id, title, content, url, content_type, summary, created_at, last_accessed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&request.title)
        .bind(&request.content)
        .bind(&request.url)
        .bind(request.content_type)
        .bind(&request.summary)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(id)
    }

    /// Set `last_accessed_at` to now
    pub async fn touch(&self, id: Uuid) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE saved_content SET last_accessed_at = $1 WHERE id = $2")
            .bind(Utc::now())
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("DELETE FROM saved_content WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}
