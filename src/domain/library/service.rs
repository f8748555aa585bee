use super::dto::{SaveContentRequest, SavedContentResponse};
use super::error::LibraryServiceError;
use super::model::{ContentType, SavedContent};
use crate::infrastructure::repositories::SavedContentRepository;
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct LibraryService {
    saved_content_repo: Arc<SavedContentRepository>,
}

impl LibraryService {
    pub fn new(saved_content_repo: Arc<SavedContentRepository>) -> Self {
        Self { saved_content_repo }
    }
}

#[async_trait]
pub trait LibraryServiceApi: Send + Sync {
    /// Saved items of a user, most recently accessed first
    async fn list(&self, user_id: Uuid) -> Result<Vec<SavedContentResponse>, LibraryServiceError>;

    async fn save(&self, user_id: Uuid, request: SaveContentRequest)
        -> Result<Uuid, LibraryServiceError>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<SavedContentResponse, LibraryServiceError>;

    async fn mark_accessed(&self, user_id: Uuid, id: Uuid) -> Result<(), LibraryServiceError>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), LibraryServiceError>;
}

#[async_trait]
impl LibraryServiceApi for LibraryService {
    async fn list(&self, user_id: Uuid) -> Result<Vec<SavedContentResponse>, LibraryServiceError> {
        let items = self
            .saved_content_repo
            .find_by_user(user_id)
            .await
            .map_err(|e| LibraryServiceError::Dependency(e.to_string()))?;
        Ok(items.into_iter().map(SavedContentResponse::from).collect())
    }

    async fn save(
        &self,
        user_id: Uuid,
        request: SaveContentRequest,
    ) -> Result<Uuid, LibraryServiceError> {
        validate(&request)?;

        let id = self
            .saved_content_repo
            .create(user_id, &request)
            .await
            .map_err(|e| LibraryServiceError::Dependency(e.to_string()))?;

        tracing::info!(
            user_id = %user_id,
            content_id = %id,
            content_type = ?request.content_type,
            text_length = request.content.len(),
            "Content saved to library"
        );

        Ok(id)
    }

    async fn get(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<SavedContentResponse, LibraryServiceError> {
        let item = self.verify_ownership(id, user_id).await?;
        Ok(SavedContentResponse::from(item))
    }

    async fn mark_accessed(&self, user_id: Uuid, id: Uuid) -> Result<(), LibraryServiceError> {
        self.verify_ownership(id, user_id).await?;

        self.saved_content_repo
            .touch(id)
            .await
            .map_err(|e| LibraryServiceError::Dependency(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), LibraryServiceError> {
        self.verify_ownership(id, user_id).await?;

        self.saved_content_repo
            .delete(id)
            .await
            .map_err(|e| LibraryServiceError::Dependency(e.to_string()))?;

        tracing::info!(user_id = %user_id, content_id = %id, "Content removed from library");
        Ok(())
    }
}

impl LibraryService {
    /// Another user's item is reported exactly like a missing one
    async fn verify_ownership(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<SavedContent, LibraryServiceError> {
        let item = self
            .saved_content_repo
            .find_by_id(id)
            .await
            .map_err(|e| LibraryServiceError::Dependency(e.to_string()))?
            .ok_or(LibraryServiceError::NotFound)?;

        if item.user_id != user_id {
            tracing::warn!(user_id = %user_id, content_id = %id, "Library access to another user's item");
            return Err(LibraryServiceError::NotFound);
        }

        Ok(item)
    }
}

fn validate(request: &SaveContentRequest) -> Result<(), LibraryServiceError> {
    if request.title.trim().is_empty() {
        return Err(LibraryServiceError::Invalid("Title is required".to_string()));
    }
    if request.content.trim().is_empty() {
        return Err(LibraryServiceError::Invalid("Content is required".to_string()));
    }
    if request.content_type == ContentType::Url {
        let url = request.url.as_deref().unwrap_or_default();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(LibraryServiceError::Invalid("Invalid URL format".to_string()));
        }
    }
    Ok(())
}
