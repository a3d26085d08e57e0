use reqwest::Client;

use crate::error::ApiError;

/// Downloads the raw tabular title feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: Client,
}

impl FeedClient {
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Fetch the feed body as text. Parsing is left to the caller.
    pub async fn fetch(&self, url: &str) -> Result<String, ApiError> {
        tracing::debug!(operation = "feed", url, "fetching title feed");
        let resp = self.http.get(url).send().await?;
        let resp = crate::check_status("feed", resp).await?;
        Ok(resp.text().await?)
    }
}
