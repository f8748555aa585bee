use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::domain::extraction::{
    ExtractUrlRequest, ExtractedArticle, ExtractedPdf, ExtractionError, ExtractionService,
    ExtractionServiceApi, PdfUpload,
};
use crate::error::{AppError, AppResult};

/// Multipart field carrying the uploaded document
const FILE_FIELD: &str = "file";

pub struct ExtractionController {
    extraction_service: Arc<ExtractionService>,
}

impl ExtractionController {
    pub fn new(extraction_service: Arc<ExtractionService>) -> Self {
        Self { extraction_service }
    }

    /// POST /extract-url - Readable text of a web page
    pub async fn extract_url(
        State(controller): State<Arc<ExtractionController>>,
        Json(request): Json<ExtractUrlRequest>,
    ) -> AppResult<Json<ExtractedArticle>> {
        let article = controller
            .extraction_service
            .extract_url(&request.url)
            .await?;
        Ok(Json(article))
    }

    /// POST /extract-pdf - Text of an uploaded PDF
    pub async fn extract_pdf(
        State(controller): State<Arc<ExtractionController>>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> AppResult<Json<ExtractedPdf>> {
        let mut multipart = multipart.map_err(|_| ExtractionError::MissingFile)?;
        let upload = read_file_field(&mut multipart)
            .await?
            .ok_or(ExtractionError::MissingFile)?;

        let pdf = controller.extraction_service.extract_pdf(upload).await?;
        Ok(Json(pdf))
    }
}

async fn read_file_field(multipart: &mut Multipart) -> AppResult<Option<PdfUpload>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        tracing::debug!(
            file_name = ?file_name,
            content_type = ?content_type,
            size_bytes = bytes.len(),
            "Received upload"
        );

        if bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some(PdfUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Uploaded file is too large".to_string())
    } else {
        AppError::BadRequest(format!("Failed to read upload: {}", err.body_text()))
    }
}
