pub mod anilist;
pub mod error;
pub mod feed;
pub mod jikan;
pub mod traits;
pub mod waifu;

pub use anilist::AniListClient;
pub use error::ApiError;
pub use feed::FeedClient;
pub use jikan::JikanClient;
pub use traits::{CatalogSource, RemoteSources};
pub use waifu::WaifuClient;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

/// Build the shared HTTP client with a request timeout.
pub fn http_client(timeout_secs: u64) -> Result<Client, ApiError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("hanabi/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ApiError::from)
}

/// Map a non-success response to an [`ApiError`], passing successes through.
pub(crate) async fn check_status(operation: &str, resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        tracing::debug!(operation, status = %status, "response received");
        return Ok(resp);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        tracing::warn!(operation, "rate limited");
        return Err(ApiError::RateLimited);
    }
    let status_code = status.as_u16();
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(operation, status = status_code, "API error");
    Err(ApiError::Api {
        status: status_code,
        message: body,
    })
}
