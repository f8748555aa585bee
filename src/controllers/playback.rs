use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::playback::{plan_playback, PlaybackPlan, PlaybackPlanRequest};
use crate::error::AppResult;

pub struct PlaybackController {
    base_words_per_minute: f64,
}

impl PlaybackController {
    pub fn new(base_words_per_minute: f64) -> Self {
        Self {
            base_words_per_minute,
        }
    }

    /// POST /api/playback/plan - Timing of a read-aloud session
    pub async fn plan(
        State(controller): State<Arc<PlaybackController>>,
        Json(request): Json<PlaybackPlanRequest>,
    ) -> AppResult<Json<PlaybackPlan>> {
        let plan = plan_playback(
            &request.content,
            controller.base_words_per_minute,
            request.rate,
        )?;
        Ok(Json(plan))
    }
}
