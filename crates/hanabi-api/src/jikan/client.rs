use reqwest::Client;

use hanabi_core::models::AiringItem;
use hanabi_core::schedule::Season;

use super::types::{JikanAnime, SeasonResponse};
use crate::error::ApiError;

/// Seasonal listings from the Jikan (MyAnimeList) API.
#[derive(Debug, Clone)]
pub struct JikanClient {
    base_url: String,
    http: Client,
}

impl JikanClient {
    /// `base_url` is the seasons endpoint, e.g. `https://api.jikan.moe/v4/seasons`.
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    pub fn season_url(&self, year: i32, season: Season) -> String {
        format!("{}/{year}/{season}", self.base_url.trim_end_matches('/'))
    }

    /// Fetch the first page of titles airing in `season` of `year`.
    pub async fn season(&self, year: i32, season: Season) -> Result<Vec<AiringItem>, ApiError> {
        let url = self.season_url(year, season);
        tracing::debug!(operation = "season", %url, "Jikan request");

        let resp = self.http.get(&url).send().await?;
        let resp = crate::check_status("season", resp).await?;
        let body: SeasonResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(body
            .data
            .into_iter()
            .map(JikanAnime::into_airing_item)
            .collect())
    }
}
