use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("URL is required")]
    MissingUrl,
    #[error("Invalid URL format")]
    InvalidUrl,
    #[error("File is required")]
    MissingFile,
    #[error("Only PDF files are supported")]
    NotPdf,
    #[error("Unsupported content type: {0}")]
    NotHtml(String),
    #[error("File size must be less than {limit_mb}MB")]
    TooLarge { limit_mb: usize },
    #[error("Failed to fetch URL: {0}")]
    Fetch(String),
    #[error("Failed to fetch URL: upstream answered {0}")]
    UpstreamStatus(u16),
    #[error("Could not extract meaningful content from {0}")]
    InsufficientContent(&'static str),
    #[error("Failed to extract PDF content: {0}")]
    InvalidPdf(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ExtractionError> for AppError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::MissingUrl
            | ExtractionError::InvalidUrl
            | ExtractionError::MissingFile => AppError::BadRequest(err.to_string()),
            ExtractionError::NotPdf | ExtractionError::NotHtml(_) => {
                AppError::UnsupportedMediaType(err.to_string())
            }
            ExtractionError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            ExtractionError::Fetch(_) | ExtractionError::UpstreamStatus(_) => {
                AppError::ExternalService(err.to_string())
            }
            ExtractionError::InsufficientContent(_) | ExtractionError::InvalidPdf(_) => {
                AppError::UnprocessableContent(err.to_string())
            }
            ExtractionError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
