use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Desktop browser identity; some publishers refuse unknown clients
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Raw result of fetching a page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

/// Source of web pages for content extraction.
///
/// Transport failures are reported as `Err`; any HTTP answer, including
/// non-2xx statuses, is returned as a `FetchedPage` for the caller to judge.
#[async_trait]
pub trait PageRepository: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, String>;
}

/// reqwest-backed page fetcher
pub struct HttpPageRepository {
    http_client: reqwest::Client,
}

impl HttpPageRepository {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl PageRepository for HttpPageRepository {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, String> {
        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| e.to_string())?;

        Ok(FetchedPage {
            status,
            content_type,
            body,
        })
    }
}
