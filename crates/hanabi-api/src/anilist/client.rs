use reqwest::Client;

use hanabi_core::models::RankedTitle;

use super::types::{AniListMedia, GraphQLResponse, PageResponse};
use crate::error::ApiError;

const RANKING_QUERY: &str = r#"
query ($page: Int, $perPage: Int, $sort: [MediaSort]) {
    Page(page: $page, perPage: $perPage) {
        media(type: ANIME, sort: $sort) {
            id
            title { romaji english }
            coverImage { extraLarge color }
            averageScore
            genres
        }
    }
}
"#;

/// Read-only AniList client for the top-rated list.
#[derive(Debug, Clone)]
pub struct AniListClient {
    endpoint: String,
    http: Client,
}

impl AniListClient {
    pub fn new(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http,
        }
    }

    async fn graphql_request<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, ApiError> {
        tracing::debug!(operation, "AniList GraphQL request");

        let resp = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&serde_json::json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;
        let resp = crate::check_status(operation, resp).await?;

        let body: GraphQLResponse<T> = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        into_data(body)
    }

    /// Fetch the first `per_page` titles ordered by descending score.
    pub async fn top_rated(&self, per_page: u32) -> Result<Vec<RankedTitle>, ApiError> {
        let page: PageResponse = self
            .graphql_request(
                "TopRated",
                RANKING_QUERY,
                serde_json::json!({
                    "page": 1,
                    "perPage": per_page,
                    "sort": "SCORE_DESC",
                }),
            )
            .await?;
        Ok(page
            .page
            .media
            .into_iter()
            .map(AniListMedia::into_ranked)
            .collect())
    }
}

/// Unwrap `data`, turning any reported GraphQL errors into one message.
fn into_data<T>(body: GraphQLResponse<T>) -> Result<T, ApiError> {
    if !body.errors.is_empty() {
        let messages: Vec<&str> = body.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(ApiError::GraphQl(messages.join(", ")));
    }
    body.data
        .ok_or_else(|| ApiError::Parse("response has no data".into()))
}
