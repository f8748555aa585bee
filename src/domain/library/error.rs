use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum LibraryServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("saved content not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for LibraryServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => LibraryServiceError::Invalid(msg),
            AppError::NotFound(_) => LibraryServiceError::NotFound,
            _ => LibraryServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<LibraryServiceError> for AppError {
    fn from(err: LibraryServiceError) -> Self {
        match err {
            LibraryServiceError::Invalid(msg) => AppError::BadRequest(msg),
            LibraryServiceError::NotFound => AppError::NotFound("Saved content not found".to_string()),
            LibraryServiceError::Dependency(msg) => AppError::Internal(msg),
            LibraryServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
