use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Idle,
    Loading,
    Playing,
    Paused,
    Ended,
    Errored,
}

impl PlaybackStatus {
    /// An utterance is queued, speaking, or paused mid-way
    pub fn is_engaged(&self) -> bool {
        matches!(
            self,
            PlaybackStatus::Loading | PlaybackStatus::Playing | PlaybackStatus::Paused
        )
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlaybackStatus::Idle => "idle",
            PlaybackStatus::Loading => "loading",
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Ended => "ended",
            PlaybackStatus::Errored => "errored",
        };
        write!(f, "{}", name)
    }
}

/// Point-in-time view of a synchronizer, shaped for progress bars and time labels
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSnapshot {
    pub status: PlaybackStatus,
    pub title: String,
    pub current_word_index: usize,
    pub current_word: Option<String>,
    pub word_count: usize,
    pub rate: f64,
    pub estimated_duration_secs: f64,
    pub elapsed_secs: f64,
    pub elapsed: String,
    pub duration: String,
    pub voice_id: Option<String>,
    pub last_error: Option<String>,
}
