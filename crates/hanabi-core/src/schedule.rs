//! Monthly airing calendar built from seasonal listings.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{AiringItem, CalendarDay, ScheduledEntry};

/// Cells in the month grid (six Monday-first weeks).
pub const GRID_CELLS: usize = 42;

/// Anime season, as used by the seasonal listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    /// Season containing the 1-based calendar `month`.
    pub fn from_month(month: u32) -> Self {
        match month {
            1..=3 => Self::Winter,
            4..=6 => Self::Spring,
            7..=9 => Self::Summer,
            _ => Self::Fall,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Fall => "fall",
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a plural broadcast day such as `"Mondays"`.
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.trim().to_lowercase().as_str() {
        "mondays" => Some(Weekday::Mon),
        "tuesdays" => Some(Weekday::Tue),
        "wednesdays" => Some(Weekday::Wed),
        "thursdays" => Some(Weekday::Thu),
        "fridays" => Some(Weekday::Fri),
        "saturdays" => Some(Weekday::Sat),
        "sundays" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Previous calendar month as `(year, month)`.
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Next calendar month as `(year, month)`.
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (ny, nm) = next_month(year, month);
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

/// Project weekly airings onto the days of `month`.
///
/// Items without a broadcast day or premiere date are skipped. Episode
/// numbers count whole weeks since the premiere; a known total caps them.
pub fn project_month(
    items: &[AiringItem],
    year: i32,
    month: u32,
) -> BTreeMap<u32, Vec<ScheduledEntry>> {
    let mut schedule: BTreeMap<u32, Vec<ScheduledEntry>> = BTreeMap::new();
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return schedule;
    };

    for item in items {
        let (Some(weekday), Some(premiere)) = (item.broadcast_day, item.premiere) else {
            continue;
        };
        let total = item.episodes.filter(|&n| n > 0);

        for date in first.iter_days().take_while(|d| d.month() == month) {
            if date.weekday() != weekday || date < premiere {
                continue;
            }
            let weeks = (date - premiere).num_days() / 7;
            let episode = if total == Some(1) {
                1
            } else {
                u32::try_from(weeks).unwrap_or(u32::MAX).saturating_add(1)
            };
            if total.is_some_and(|t| episode > t) {
                continue;
            }

            let day = schedule.entry(date.day()).or_default();
            if !day.iter().any(|e| e.id == item.id) {
                day.push(ScheduledEntry {
                    id: item.id,
                    title: item.title.clone(),
                    image_url: item.image_url.clone(),
                    episode,
                });
            }
        }
    }
    schedule
}

/// One month of the airing calendar, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSchedule {
    pub year: i32,
    pub month: u32,
    pub season: Season,
    pub days: BTreeMap<u32, Vec<ScheduledEntry>>,
    pub grid: Vec<CalendarDay>,
}

impl MonthSchedule {
    pub fn build(year: i32, month: u32, items: &[AiringItem]) -> Self {
        Self {
            year,
            month,
            season: Season::from_month(month),
            days: project_month(items, year, month),
            grid: calendar_grid(year, month),
        }
    }

    /// Entries airing on `day` of this month.
    pub fn entries(&self, day: u32) -> &[ScheduledEntry] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Monday-first grid for `month`, padded with adjacent-month days to 42 cells.
pub fn calendar_grid(year: i32, month: u32) -> Vec<CalendarDay> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let leading = first.weekday().num_days_from_monday();
    let (py, pm) = previous_month(year, month);
    let prev_days = days_in_month(py, pm);
    let days = days_in_month(year, month);

    let mut grid = Vec::with_capacity(GRID_CELLS);
    grid.extend((0..leading).map(|i| CalendarDay {
        day: prev_days - leading + 1 + i,
        in_month: false,
    }));
    grid.extend((1..=days).map(|day| CalendarDay { day, in_month: true }));
    let mut next = 1;
    while grid.len() < GRID_CELLS {
        grid.push(CalendarDay {
            day: next,
            in_month: false,
        });
        next += 1;
    }
    grid
}
