use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::library::{
    LibraryService, LibraryServiceApi, SaveContentRequest, SaveContentResponse,
    SavedContentResponse,
};
use crate::{error::AppResult, infrastructure::auth::AuthUser};

pub struct LibraryController {
    library_service: Arc<LibraryService>,
}

impl LibraryController {
    pub fn new(library_service: Arc<LibraryService>) -> Self {
        Self { library_service }
    }

    /// GET /api/library
    pub async fn list(
        State(controller): State<Arc<LibraryController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<Vec<SavedContentResponse>>> {
        let items = controller.library_service.list(auth_user.user_id).await?;
        Ok(Json(items))
    }

    /// POST /api/library
    pub async fn save(
        State(controller): State<Arc<LibraryController>>,
        Extension(auth_user): Extension<AuthUser>,
        Json(request): Json<SaveContentRequest>,
    ) -> AppResult<(StatusCode, Json<SaveContentResponse>)> {
        let id = controller
            .library_service
            .save(auth_user.user_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(SaveContentResponse { id })))
    }

    /// GET /api/library/{id}
    pub async fn get(
        State(controller): State<Arc<LibraryController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(id): Path<Uuid>,
    ) -> AppResult<Json<SavedContentResponse>> {
        let item = controller.library_service.get(auth_user.user_id, id).await?;
        Ok(Json(item))
    }

    /// PUT /api/library/{id}/accessed
    pub async fn mark_accessed(
        State(controller): State<Arc<LibraryController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller
            .library_service
            .mark_accessed(auth_user.user_id, id)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// DELETE /api/library/{id}
    pub async fn delete(
        State(controller): State<Arc<LibraryController>>,
        Extension(auth_user): Extension<AuthUser>,
        Path(id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller
            .library_service
            .delete(auth_user.user_id, id)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
