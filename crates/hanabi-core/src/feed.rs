//! Feed parser: turns the row-per-episode CSV feed into grouped titles.
//!
//! The feed is denormalized: every row repeats the show name. Rows are
//! grouped by name in first-seen order and episodes keep arrival order.

use std::collections::HashMap;
use std::io::Read;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::HanabiError;
use crate::models::{Episode, Title};

/// Episode number, optionally prefixed by `Tập` / `Episode`.
static RE_EPISODE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:Tập|Episode)?\s*(\d+(?:\.\d+)?)").unwrap());

const COL_NAME: &str = "name";
const COL_EPISODE: &str = "episodes";
const COL_URL: &str = "url";
const COL_LINK: &str = "link";

/// Column positions resolved from the header row.
struct Columns {
    name: usize,
    episode: usize,
    url: Option<usize>,
    link: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, HanabiError> {
        let find = |wanted: &str| {
            headers.iter().position(|h| {
                h.trim_start_matches('\u{feff}')
                    .trim()
                    .eq_ignore_ascii_case(wanted)
            })
        };
        let name = find(COL_NAME).ok_or_else(|| missing_column(COL_NAME))?;
        let episode = find(COL_EPISODE).ok_or_else(|| missing_column(COL_EPISODE))?;
        Ok(Self {
            name,
            episode,
            url: find(COL_URL),
            link: find(COL_LINK),
        })
    }
}

fn missing_column(column: &str) -> HanabiError {
    HanabiError::FeedUnavailable(format!("feed has no `{column}` column"))
}

/// Parse a CSV feed into titles.
///
/// Rows with a blank name or episode title are skipped. Any syntax error
/// fails the whole parse; a partial result is never returned.
pub fn parse_feed<R: Read>(reader: R) -> Result<Vec<Title>, HanabiError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = csv
        .headers()
        .map_err(|e| HanabiError::FeedUnavailable(e.to_string()))?
        .clone();
    let columns = Columns::from_headers(&headers)?;

    let mut titles: Vec<Title> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for record in csv.records() {
        let record = record.map_err(|e| HanabiError::FeedUnavailable(e.to_string()))?;
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };

        let name = field(Some(columns.name));
        let episode_title = field(Some(columns.episode));
        if name.is_empty() || episode_title.is_empty() {
            skipped += 1;
            continue;
        }

        let episode = Episode {
            name: name.clone(),
            episode_title,
            url: field(columns.url),
            link: field(columns.link),
        };

        match index.get(&name) {
            Some(&pos) => titles[pos].episodes.push(episode),
            None => {
                index.insert(name.clone(), titles.len());
                let mut title = Title::new(name);
                title.episodes.push(episode);
                titles.push(title);
            }
        }
    }

    tracing::debug!(titles = titles.len(), skipped, "feed parsed");
    Ok(titles)
}

/// Parse a feed already held in memory.
pub fn parse_feed_str(text: &str) -> Result<Vec<Title>, HanabiError> {
    parse_feed(text.as_bytes())
}

/// Extract the numeric part of an episode title such as `"Tập 12"` or `"Episode 7.5"`.
pub fn episode_number(title: &str) -> Option<f64> {
    RE_EPISODE_NUMBER
        .captures(title)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "name,episodes,url,link\n";

    #[test]
    fn test_groups_by_name_in_first_seen_order() {
        let feed = format!(
            "{HEADER}A,Ep1,,https://p/a1\nB,Ep1,,https://p/b1\nA,Ep2,,https://p/a2\n"
        );
        let titles = parse_feed_str(&feed).unwrap();

        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].name, "A");
        assert_eq!(titles[1].name, "B");
        let a: Vec<_> = titles[0].episodes.iter().map(|e| e.episode_title.as_str()).collect();
        assert_eq!(a, ["Ep1", "Ep2"]);
        assert_eq!(titles[1].episodes.len(), 1);
    }

    #[test]
    fn test_blank_name_or_episode_rows_are_dropped() {
        let feed = format!(
            "{HEADER}A,Ep1,,l1\n,Ep9,,l9\n   ,Ep8,,l8\nC,,,l7\nC,  ,,l6\nA,Ep2,,l2\n"
        );
        let titles = parse_feed_str(&feed).unwrap();

        assert_eq!(titles.len(), 1);
        assert_eq!(titles[0].episode_count(), 2);
        assert!(titles.iter().all(|t| t.episode_count() > 0));
    }

    #[test]
    fn test_columns_are_located_by_header_name() {
        let feed = "link,name,url,episodes\nhttps://p/1,Frieren,https://src/1,Tập 1\n";
        let titles = parse_feed_str(feed).unwrap();
        let ep = &titles[0].episodes[0];
        assert_eq!(ep.name, "Frieren");
        assert_eq!(ep.episode_title, "Tập 1");
        assert_eq!(ep.url, "https://src/1");
        assert_eq!(ep.link, "https://p/1");
    }

    #[test]
    fn test_missing_optional_columns_default_to_empty() {
        let titles = parse_feed_str("name,episodes\nA,Ep1\n").unwrap();
        assert_eq!(titles[0].episodes[0].link, "");
    }

    #[test]
    fn test_bom_prefixed_header() {
        let titles = parse_feed_str("\u{feff}name,episodes,url,link\nA,Ep1,,l\n").unwrap();
        assert_eq!(titles.len(), 1);
    }

    #[test]
    fn test_missing_required_column_is_feed_unavailable() {
        let err = parse_feed_str("title,episodes\nA,Ep1\n").unwrap_err();
        assert!(matches!(err, HanabiError::FeedUnavailable(msg) if msg.contains("name")));
    }

    #[test]
    fn test_invalid_utf8_fails_without_partial_result() {
        let mut bytes = b"name,episodes,url,link\nA,Ep1,,l\n".to_vec();
        bytes.extend_from_slice(b"B,\xff\xfe,,l\n");
        assert!(matches!(
            parse_feed(bytes.as_slice()),
            Err(HanabiError::FeedUnavailable(_))
        ));
    }

    #[test]
    fn test_episode_number_extraction() {
        assert_eq!(episode_number("Tập 12"), Some(12.0));
        assert_eq!(episode_number("tập 3"), Some(3.0));
        assert_eq!(episode_number("Episode 7.5"), Some(7.5));
        assert_eq!(episode_number("24"), Some(24.0));
        assert_eq!(episode_number("OVA"), None);
    }
}
