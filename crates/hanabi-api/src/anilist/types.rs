use serde::Deserialize;

use hanabi_core::models::RankedTitle;

// ── GraphQL response wrappers ────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GraphQLResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQLError {
    pub message: String,
}

// ── Ranking query ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PageResponse {
    #[serde(rename = "Page")]
    pub page: PageData,
}

#[derive(Debug, Deserialize)]
pub struct PageData {
    pub media: Vec<AniListMedia>,
}

#[derive(Debug, Deserialize)]
pub struct AniListMedia {
    pub id: u64,
    pub title: Option<AniListTitle>,
    #[serde(rename = "coverImage")]
    pub cover_image: Option<CoverImage>,
    #[serde(rename = "averageScore")]
    pub average_score: Option<u32>,
    pub genres: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct AniListTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoverImage {
    #[serde(rename = "extraLarge")]
    pub extra_large: Option<String>,
    pub color: Option<String>,
}

impl AniListMedia {
    pub fn into_ranked(self) -> RankedTitle {
        let (romaji, english) = match self.title {
            Some(t) => (t.romaji.unwrap_or_default(), t.english),
            None => (String::new(), None),
        };
        let (cover_url, cover_color) = match self.cover_image {
            Some(c) => (c.extra_large, c.color),
            None => (None, None),
        };
        RankedTitle {
            id: self.id,
            romaji,
            english,
            cover_url,
            cover_color,
            average_score: self.average_score,
            genres: self.genres.unwrap_or_default(),
        }
    }
}
