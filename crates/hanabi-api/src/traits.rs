//! The remote-content interface the runtime is written against.
//!
//! [`RemoteSources`] implements it over HTTP; tests substitute an
//! in-memory source so no network is needed.

use std::future::Future;

use hanabi_core::config::AppConfig;
use hanabi_core::models::{AiringItem, RankedTitle};
use hanabi_core::schedule::Season;

use crate::{http_client, AniListClient, ApiError, FeedClient, JikanClient, WaifuClient};

/// Every remote resource the catalog front-end reads.
pub trait CatalogSource: Send + Sync {
    /// Raw feed text at `url`.
    fn fetch_feed(&self, url: &str) -> impl Future<Output = Result<String, ApiError>> + Send;

    /// Titles airing in `season` of `year`.
    fn season(
        &self,
        year: i32,
        season: Season,
    ) -> impl Future<Output = Result<Vec<AiringItem>, ApiError>> + Send;

    /// Top-rated titles by descending score.
    fn top_rated(
        &self,
        per_page: u32,
    ) -> impl Future<Output = Result<Vec<RankedTitle>, ApiError>> + Send;

    /// Next batch of gallery image URLs.
    fn image_batch(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;
}

/// HTTP-backed sources, one client per service sharing a connection pool.
#[derive(Debug, Clone)]
pub struct RemoteSources {
    pub feed: FeedClient,
    pub jikan: JikanClient,
    pub anilist: AniListClient,
    pub images: WaifuClient,
}

impl RemoteSources {
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        let http = http_client(config.network.timeout_secs)?;
        Ok(Self {
            feed: FeedClient::new(http.clone()),
            jikan: JikanClient::new(http.clone(), &config.sources.schedule_url),
            anilist: AniListClient::new(http.clone(), &config.sources.ranking_url),
            images: WaifuClient::new(http, &config.sources.images_url),
        })
    }
}

impl CatalogSource for RemoteSources {
    async fn fetch_feed(&self, url: &str) -> Result<String, ApiError> {
        self.feed.fetch(url).await
    }

    async fn season(&self, year: i32, season: Season) -> Result<Vec<AiringItem>, ApiError> {
        self.jikan.season(year, season).await
    }

    async fn top_rated(&self, per_page: u32) -> Result<Vec<RankedTitle>, ApiError> {
        self.anilist.top_rated(per_page).await
    }

    async fn image_batch(&self) -> Result<Vec<String>, ApiError> {
        self.images.batch().await
    }
}
