use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A currently-airing title from the seasonal API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiringItem {
    pub id: u64,
    pub title: String,
    pub image_url: Option<String>,
    /// Total episode count, when announced.
    pub episodes: Option<u32>,
    pub broadcast_day: Option<Weekday>,
    pub premiere: Option<NaiveDate>,
}

/// An airing item placed on a specific calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    pub id: u64,
    pub title: String,
    pub image_url: Option<String>,
    pub episode: u32,
}

/// One cell of the Monday-first month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub in_month: bool,
}
