use super::error::SummaryServiceError;
use crate::infrastructure::repositories::SummaryRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

const SUMMARY_PROMPT: &str = "Summarize the following article in 3-5 concise sentences. Focus on the main points and key takeaways:";

pub struct SummaryService {
    summary_repo: Option<Arc<dyn SummaryRepository>>,
    max_words: usize,
}

impl SummaryService {
    /// `summary_repo` is `None` when no provider is configured; every call
    /// then fails with `NotConfigured`.
    pub fn new(summary_repo: Option<Arc<dyn SummaryRepository>>, max_words: usize) -> Self {
        Self {
            summary_repo,
            max_words,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.summary_repo.is_some()
    }
}

#[async_trait]
pub trait SummaryServiceApi: Send + Sync {
    /// Summarize article text in a few sentences
    async fn summarize(&self, content: &str) -> Result<String, SummaryServiceError>;
}

#[async_trait]
impl SummaryServiceApi for SummaryService {
    async fn summarize(&self, content: &str) -> Result<String, SummaryServiceError> {
        if content.trim().is_empty() {
            return Err(SummaryServiceError::MissingContent);
        }
        let repo = self
            .summary_repo
            .as_ref()
            .ok_or(SummaryServiceError::NotConfigured)?;

        let truncated = truncate_words(content, self.max_words);
        let prompt = build_prompt(&truncated);

        let started = Instant::now();
        let summary = repo
            .summarize(&prompt)
            .await
            .map_err(SummaryServiceError::Dependency)?;

        tracing::info!(
            text_length = content.len(),
            prompt_length = prompt.len(),
            summary_length = summary.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "Summary generated"
        );

        Ok(summary.trim().to_string())
    }
}

/// Keep at most `max_words` whitespace-separated words
pub fn truncate_words(content: &str, max_words: usize) -> String {
    content
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_prompt(content: &str) -> String {
    format!("{}\n\n{}", SUMMARY_PROMPT, content)
}
