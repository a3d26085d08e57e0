use serde::{Deserialize, Serialize};

use crate::feed::episode_number;

/// One row of the feed: a single playable episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub name: String,
    #[serde(rename = "episodeTitle")]
    pub episode_title: String,
    pub url: String,
    pub link: String,
}

impl Episode {
    /// Numeric episode label parsed from the title, if any.
    pub fn number(&self) -> Option<f64> {
        episode_number(&self.episode_title)
    }
}

/// A show grouped by name, episodes in feed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub name: String,
    pub episodes: Vec<Episode>,
}

impl Title {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            episodes: Vec::new(),
        }
    }

    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// Popularity tier, always derived from the current episode count.
    pub fn tier(&self) -> Tier {
        Tier::for_count(self.episode_count())
    }

    /// The episode with the highest parsed number.
    ///
    /// Unnumbered episodes rank below numbered ones; among equals the
    /// earliest in feed order wins.
    pub fn latest_episode(&self) -> Option<&Episode> {
        let key = |ep: &Episode| ep.number().unwrap_or(-1.0);
        let mut best: Option<&Episode> = None;
        for ep in &self.episodes {
            match best {
                Some(current) if key(ep) <= key(current) => {}
                _ => best = Some(ep),
            }
        }
        best
    }
}

/// Coarse popularity bucket in `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tier(u8);

impl Tier {
    pub const MIN: Tier = Tier(1);
    pub const MAX: Tier = Tier(4);

    pub fn for_count(count: usize) -> Self {
        match count {
            101.. => Tier(4),
            24..=100 => Tier(3),
            12..=23 => Tier(2),
            _ => Tier(1),
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ep(title: &str) -> Episode {
        Episode {
            name: "Show".into(),
            episode_title: title.into(),
            url: String::new(),
            link: format!("https://player.example/{title}"),
        }
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Tier::for_count(0).get(), 1);
        assert_eq!(Tier::for_count(11).get(), 1);
        assert_eq!(Tier::for_count(12).get(), 2);
        assert_eq!(Tier::for_count(23).get(), 2);
        assert_eq!(Tier::for_count(24).get(), 3);
        assert_eq!(Tier::for_count(100).get(), 3);
        assert_eq!(Tier::for_count(101).get(), 4);
    }

    #[test]
    fn test_tier_follows_episode_count() {
        let mut title = Title::new("Show");
        for i in 0..11 {
            title.episodes.push(ep(&format!("Episode {i}")));
        }
        assert_eq!(title.tier(), Tier::MIN);
        title.episodes.push(ep("Episode 11"));
        assert_eq!(title.tier().get(), 2);
    }

    #[test]
    fn test_latest_episode_picks_highest_number() {
        let mut title = Title::new("Show");
        title.episodes = vec![ep("Tập 2"), ep("Tập 10"), ep("Special"), ep("Tập 9.5")];
        assert_eq!(title.latest_episode().unwrap().episode_title, "Tập 10");
    }

    #[test]
    fn test_latest_episode_without_numbers_keeps_feed_order() {
        let mut title = Title::new("Show");
        title.episodes = vec![ep("OVA"), ep("Movie")];
        assert_eq!(title.latest_episode().unwrap().episode_title, "OVA");
        assert!(Title::new("Empty").latest_episode().is_none());
    }
}
