//! Recommendation order: tier descending, then episode count descending.

use std::cmp::Reverse;

use crate::models::{Tier, Title};

/// Tier for a raw episode count.
pub fn tier(count: usize) -> u8 {
    Tier::for_count(count).get()
}

/// Return the titles sorted into recommendation order.
///
/// The sort is stable, so titles with equal tier and count keep their
/// input order. The input is left untouched.
pub fn recommend(titles: &[Title]) -> Vec<Title> {
    let mut ranked = titles.to_vec();
    ranked.sort_by_key(|t| (Reverse(t.tier()), Reverse(t.episode_count())));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::parse_feed_str;
    use crate::models::Episode;

    fn title(name: &str, count: usize) -> Title {
        Title {
            name: name.into(),
            episodes: (1..=count)
                .map(|i| Episode {
                    name: name.into(),
                    episode_title: format!("Tập {i}"),
                    url: String::new(),
                    link: format!("https://p/{name}/{i}"),
                })
                .collect(),
        }
    }

    fn names(titles: &[Title]) -> Vec<&str> {
        titles.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_tier_values() {
        assert_eq!(tier(24), 3);
        assert_eq!(tier(23), 2);
        assert_eq!(tier(12), 2);
        assert_eq!(tier(11), 1);
        assert_eq!(tier(100), 3);
        assert_eq!(tier(101), 4);
    }

    #[test]
    fn test_tier_then_count_descending() {
        let input = vec![
            title("short", 3),
            title("long", 120),
            title("mid", 24),
            title("mid+", 30),
        ];
        let ranked = recommend(&input);
        assert_eq!(names(&ranked), ["long", "mid+", "mid", "short"]);
    }

    #[test]
    fn test_equal_keys_keep_input_order() {
        let input = vec![title("x", 5), title("y", 5), title("big", 13), title("z", 5)];
        let ranked = recommend(&input);
        assert_eq!(names(&ranked), ["big", "x", "y", "z"]);
    }

    #[test]
    fn test_idempotent_and_input_untouched() {
        let input = vec![title("a", 1), title("b", 40), title("c", 12)];
        let once = recommend(&input);
        let twice = recommend(&once);
        assert_eq!(once, twice);
        assert_eq!(names(&input), ["a", "b", "c"]);
    }

    #[test]
    fn test_parse_then_rank_scenario() {
        let feed = "name,episodes,url,link\nA,Ep1,,l\nB,Ep1,,l\nA,Ep2,,l\n";
        let titles = parse_feed_str(feed).unwrap();
        let ranked = recommend(&titles);
        assert_eq!(names(&ranked), ["A", "B"]);
        assert_eq!(ranked[0].tier(), ranked[1].tier());
    }
}
