use super::document::Document;
use super::error::PlaybackError;
use super::language::{detect_language, LanguageCode};
use super::model::{format_time, SpeechModel, DEFAULT_RATE};
use serde::{Deserialize, Serialize};

/// Request for POST /api/playback/plan
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaybackPlanRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

/// Timing figures a client needs to drive its own highlight timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackPlan {
    pub word_count: usize,
    pub rate: f64,
    pub words_per_minute: f64,
    pub estimated_duration_secs: f64,
    pub estimated_duration: String,
    pub word_interval_ms: u64,
    pub skip_words: usize,
    pub language: Option<LanguageCode>,
}

pub fn plan_playback(
    content: &str,
    base_words_per_minute: f64,
    rate: Option<f64>,
) -> Result<PlaybackPlan, PlaybackError> {
    let model = SpeechModel::new(base_words_per_minute, rate.unwrap_or(DEFAULT_RATE))?;
    let document = Document::new("", content);
    let estimated_duration_secs = model.estimated_duration(document.word_count());

    Ok(PlaybackPlan {
        word_count: document.word_count(),
        rate: model.rate(),
        words_per_minute: model.base_words_per_minute() * model.rate(),
        estimated_duration_secs,
        estimated_duration: format_time(estimated_duration_secs),
        word_interval_ms: model.word_interval().as_millis() as u64,
        skip_words: model.skip_words(),
        language: detect_language(content),
    })
}
