use super::state::PlaybackStatus;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaybackError {
    #[error("rate must be a positive number, got {0}")]
    InvalidRate(f64),
    #[error("rate {0} is out of range for the speech timer")]
    RateOutOfRange(f64),
    #[error("words per minute must be a positive number, got {0}")]
    InvalidWordsPerMinute(f64),
    #[error("cannot {action} while {status}")]
    InvalidTransition {
        action: &'static str,
        status: PlaybackStatus,
    },
    #[error("nothing to play: the document is empty")]
    EmptyDocument,
    #[error("unknown voice: {0}")]
    UnknownVoice(String),
    #[error("playback session has shut down")]
    SessionClosed,
}

impl From<PlaybackError> for AppError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::SessionClosed => AppError::Internal(err.to_string()),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}
