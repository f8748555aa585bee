use serde::{Deserialize, Serialize};

/// Request for POST /extract-url
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractUrlRequest {
    #[serde(default)]
    pub url: String,
}

/// Readable text pulled out of a web page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedArticle {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

/// Text pulled out of an uploaded PDF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPdf {
    pub title: String,
    pub content: String,
    pub num_pages: usize,
}
