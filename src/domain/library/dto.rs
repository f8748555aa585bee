use super::model::{ContentType, SavedContent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/library
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveContentRequest {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveContentResponse {
    pub id: Uuid,
}

/// Response for library endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedContentResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_accessed_at: DateTime<Utc>,
}

impl From<SavedContent> for SavedContentResponse {
    fn from(item: SavedContent) -> Self {
        Self {
            id: item.id,
            title: item.title,
            content: item.content,
            url: item.url,
            content_type: item.content_type,
            summary: item.summary,
            created_at: item.created_at,
            last_accessed_at: item.last_accessed_at,
        }
    }
}
