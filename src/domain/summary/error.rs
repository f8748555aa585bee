use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SummaryServiceError {
    #[error("Content is required")]
    MissingContent,
    #[error("summarization is not configured")]
    NotConfigured,
    #[error("Failed to generate summary: {0}")]
    Dependency(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<SummaryServiceError> for AppError {
    fn from(err: SummaryServiceError) -> Self {
        match err {
            SummaryServiceError::MissingContent => AppError::BadRequest(err.to_string()),
            SummaryServiceError::NotConfigured => AppError::Unavailable(err.to_string()),
            SummaryServiceError::Dependency(_) => AppError::ExternalService(err.to_string()),
            SummaryServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
