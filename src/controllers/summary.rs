use axum::{extract::State, Json};
use std::sync::Arc;

use crate::domain::summary::{
    SummarizeRequest, SummaryResponse, SummaryService, SummaryServiceApi,
};
use crate::error::AppResult;

pub struct SummaryController {
    summary_service: Arc<SummaryService>,
}

impl SummaryController {
    pub fn new(summary_service: Arc<SummaryService>) -> Self {
        Self { summary_service }
    }

    /// POST /summarize
    pub async fn summarize(
        State(controller): State<Arc<SummaryController>>,
        Json(request): Json<SummarizeRequest>,
    ) -> AppResult<Json<SummaryResponse>> {
        let summary = controller
            .summary_service
            .summarize(&request.content)
            .await?;
        Ok(Json(SummaryResponse { summary }))
    }
}
