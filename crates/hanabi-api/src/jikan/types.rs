use chrono::NaiveDate;
use serde::Deserialize;

use hanabi_core::models::AiringItem;
use hanabi_core::schedule::parse_weekday;

#[derive(Debug, Deserialize)]
pub struct SeasonResponse {
    #[serde(default)]
    pub data: Vec<JikanAnime>,
}

#[derive(Debug, Deserialize)]
pub struct JikanAnime {
    pub mal_id: u64,
    pub title: String,
    pub images: Option<JikanImages>,
    pub episodes: Option<u32>,
    pub broadcast: Option<JikanBroadcast>,
    pub aired: Option<JikanAired>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImages {
    pub jpg: Option<JikanImageSet>,
}

#[derive(Debug, Deserialize)]
pub struct JikanImageSet {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanBroadcast {
    pub day: Option<String>,
    pub time: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct JikanAired {
    pub from: Option<String>,
}

/// Calendar date of an ISO-8601 timestamp such as `2024-04-06T00:00:00+00:00`.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let date = s.get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

impl JikanAnime {
    pub fn into_airing_item(self) -> AiringItem {
        AiringItem {
            id: self.mal_id,
            title: self.title,
            image_url: self
                .images
                .and_then(|i| i.jpg)
                .and_then(|jpg| jpg.image_url.or(jpg.large_image_url)),
            episodes: self.episodes,
            broadcast_day: self
                .broadcast
                .and_then(|b| b.day)
                .as_deref()
                .and_then(parse_weekday),
            premiere: self.aired.and_then(|a| a.from).as_deref().and_then(parse_date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_deserialize_season() {
        let json = r#"{
            "pagination": { "last_visible_page": 1, "has_next_page": false },
            "data": [
                {
                    "mal_id": 52991,
                    "title": "Sousou no Frieren",
                    "images": { "jpg": { "image_url": "https://cdn.myanimelist.net/images/anime/1015/138006.jpg", "small_image_url": null, "large_image_url": null } },
                    "episodes": 28,
                    "broadcast": { "day": "Fridays", "time": "23:00", "timezone": "Asia/Tokyo", "string": "Fridays at 23:00 (JST)" },
                    "aired": { "from": "2023-09-29T00:00:00+00:00", "to": null, "string": "Sep 29, 2023 to ?" }
                },
                {
                    "mal_id": 1,
                    "title": "Mystery",
                    "images": null,
                    "episodes": null,
                    "broadcast": { "day": null, "time": null, "timezone": null, "string": "Unknown" },
                    "aired": { "from": null, "to": null }
                }
            ]
        }"#;

        let resp: SeasonResponse = serde_json::from_str(json).unwrap();
        let items: Vec<AiringItem> = resp
            .data
            .into_iter()
            .map(JikanAnime::into_airing_item)
            .collect();

        assert_eq!(items[0].id, 52991);
        assert_eq!(items[0].episodes, Some(28));
        assert_eq!(items[0].broadcast_day, Some(Weekday::Fri));
        assert_eq!(items[0].premiere, NaiveDate::from_ymd_opt(2023, 9, 29));
        assert!(items[0].image_url.as_deref().unwrap().ends_with("138006.jpg"));

        assert_eq!(items[1].broadcast_day, None);
        assert_eq!(items[1].premiere, None);
        assert_eq!(items[1].image_url, None);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-01-07"), NaiveDate::from_ymd_opt(2024, 1, 7));
        assert_eq!(parse_date("garbage"), None);
        assert_eq!(parse_date(""), None);
    }
}
