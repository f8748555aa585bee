use super::dto::{ExtractedArticle, ExtractedPdf};
use super::error::ExtractionError;
use super::html::scrape_article;
use super::pdf::parse_pdf;
use crate::infrastructure::repositories::PageRepository;
use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Url;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Extracted text shorter than this is treated as a failed extraction
pub const MIN_CONTENT_CHARS: usize = 100;

const HTML_CONTENT_TYPES: &[&str] = &["text/html", "application/xhtml+xml"];
const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A file received from a client upload
#[derive(Debug, Clone)]
pub struct PdfUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub struct ExtractionService {
    page_repo: Arc<dyn PageRepository>,
    max_pdf_bytes: usize,
    cache: Option<Cache<String, ExtractedArticle>>,
}

impl ExtractionService {
    pub fn new(page_repo: Arc<dyn PageRepository>, max_pdf_bytes: usize, cache_enabled: bool) -> Self {
        let cache = if cache_enabled {
            Some(
                Cache::builder()
                    .max_capacity(100)
                    .time_to_idle(Duration::from_secs(30 * 60))
                    .build(),
            )
        } else {
            None
        };

        Self {
            page_repo,
            max_pdf_bytes,
            cache,
        }
    }
}

#[async_trait]
pub trait ExtractionServiceApi: Send + Sync {
    /// Fetch a web page and pull out its readable text
    ///
    /// Only absolute http(s) URLs are accepted. The page must answer 2xx with
    /// an HTML content type and yield at least `MIN_CONTENT_CHARS` characters.
    async fn extract_url(&self, url: &str) -> Result<ExtractedArticle, ExtractionError>;

    /// Pull the text out of an uploaded PDF
    async fn extract_pdf(&self, upload: PdfUpload) -> Result<ExtractedPdf, ExtractionError>;
}

#[async_trait]
impl ExtractionServiceApi for ExtractionService {
    async fn extract_url(&self, url: &str) -> Result<ExtractedArticle, ExtractionError> {
        let url = parse_url(url)?;
        let key = url.to_string();

        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&key).await {
                tracing::info!(url = %key, "Extraction cache hit");
                return Ok(cached);
            }
        }

        let started = Instant::now();
        let page = self
            .page_repo
            .fetch(&url)
            .await
            .map_err(ExtractionError::Fetch)?;

        if !(200..300).contains(&page.status) {
            tracing::warn!(url = %key, status = page.status, "Upstream answered with an error");
            return Err(ExtractionError::UpstreamStatus(page.status));
        }

        if let Some(content_type) = page.content_type.as_deref() {
            if !HTML_CONTENT_TYPES.contains(&mime_essence(content_type).as_str()) {
                return Err(ExtractionError::NotHtml(content_type.to_string()));
            }
        }

        // parse on a blocking thread
        let body = page.body;
        let article = tokio::task::spawn_blocking(move || scrape_article(&body))
            .await
            .map_err(|e| ExtractionError::Other(anyhow::anyhow!("HTML parsing task failed: {}", e)))?;

        let content_chars = article.content.chars().count();
        if content_chars < MIN_CONTENT_CHARS {
            tracing::warn!(url = %key, content_chars, "Page yielded too little text");
            return Err(ExtractionError::InsufficientContent("URL"));
        }

        tracing::info!(
            url = %key,
            title = %article.title,
            text_length = content_chars,
            latency_ms = started.elapsed().as_millis() as u64,
            "URL content extracted"
        );

        if let Some(cache) = &self.cache {
            cache.insert(key, article.clone()).await;
        }

        Ok(article)
    }

    async fn extract_pdf(&self, upload: PdfUpload) -> Result<ExtractedPdf, ExtractionError> {
        let is_pdf = upload
            .content_type
            .as_deref()
            .map(|ct| mime_essence(ct) == PDF_CONTENT_TYPE)
            .unwrap_or(false);
        if !is_pdf {
            return Err(ExtractionError::NotPdf);
        }

        if upload.bytes.len() > self.max_pdf_bytes {
            return Err(ExtractionError::TooLarge {
                limit_mb: self.max_pdf_bytes / (1024 * 1024),
            });
        }

        let started = Instant::now();
        let size = upload.bytes.len();
        let bytes = upload.bytes;
        let pdf = tokio::task::spawn_blocking(move || parse_pdf(&bytes))
            .await
            .map_err(|e| ExtractionError::Other(anyhow::anyhow!("PDF parsing task failed: {}", e)))??;

        let content_chars = pdf.content.chars().count();
        if content_chars < MIN_CONTENT_CHARS {
            tracing::warn!(
                file_name = ?upload.file_name,
                content_chars,
                "PDF yielded too little text"
            );
            return Err(ExtractionError::InsufficientContent("PDF"));
        }

        tracing::info!(
            file_name = ?upload.file_name,
            size_bytes = size,
            num_pages = pdf.num_pages,
            text_length = content_chars,
            latency_ms = started.elapsed().as_millis() as u64,
            "PDF content extracted"
        );

        Ok(pdf)
    }
}

fn parse_url(raw: &str) -> Result<Url, ExtractionError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ExtractionError::MissingUrl);
    }
    let url = Url::parse(raw).map_err(|_| ExtractionError::InvalidUrl)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ExtractionError::InvalidUrl),
    }
}

/// `text/html; charset=utf-8` -> `text/html`
fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
