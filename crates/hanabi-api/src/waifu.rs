use reqwest::Client;
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
struct ManyResponse {
    files: Vec<String>,
}

/// Batch image feed for the gallery view.
#[derive(Debug, Clone)]
pub struct WaifuClient {
    endpoint: String,
    http: Client,
}

impl WaifuClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    /// Fetch the next batch of image URLs.
    pub async fn batch(&self) -> Result<Vec<String>, ApiError> {
        tracing::debug!(operation = "images", "image batch request");
        let resp = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "exclude": [] }))
            .send()
            .await?;
        let resp = crate::check_status("images", resp).await?;
        let body: ManyResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(body.files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_batch() {
        let json = r#"{ "files": ["https://i.waifu.pics/a.jpg", "https://i.waifu.pics/b.png"] }"#;
        let resp: ManyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.files.len(), 2);
    }

    #[test]
    fn test_missing_files_is_error() {
        assert!(serde_json::from_str::<ManyResponse>(r#"{ "message": "nope" }"#).is_err());
    }
}
