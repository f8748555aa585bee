use serde::{Deserialize, Serialize};

/// Request for POST /summarize
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}
