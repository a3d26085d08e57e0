use serde::{Deserialize, Serialize};

/// An entry of the top-rated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTitle {
    pub id: u64,
    pub romaji: String,
    pub english: Option<String>,
    pub cover_url: Option<String>,
    pub cover_color: Option<String>,
    /// Average score on a 0-100 scale.
    pub average_score: Option<u32>,
    pub genres: Vec<String>,
}

impl RankedTitle {
    /// English title when available, romaji otherwise.
    pub fn display_title(&self) -> &str {
        self.english
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(&self.romaji)
    }

    /// Score on a 0-10 scale with one decimal, e.g. `"9.1"`.
    pub fn display_score(&self) -> Option<String> {
        self.average_score
            .map(|s| format!("{:.1}", f64::from(s) / 10.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frieren() -> RankedTitle {
        RankedTitle {
            id: 154587,
            romaji: "Sousou no Frieren".into(),
            english: Some("Frieren: Beyond Journey's End".into()),
            cover_url: None,
            cover_color: None,
            average_score: Some(91),
            genres: vec!["Adventure".into()],
        }
    }

    #[test]
    fn test_display_score_one_decimal() {
        assert_eq!(frieren().display_score().as_deref(), Some("9.1"));
        let mut r = frieren();
        r.average_score = Some(80);
        assert_eq!(r.display_score().as_deref(), Some("8.0"));
        r.average_score = None;
        assert!(r.display_score().is_none());
    }

    #[test]
    fn test_display_title_prefers_english() {
        assert_eq!(frieren().display_title(), "Frieren: Beyond Journey's End");
        let mut r = frieren();
        r.english = None;
        assert_eq!(r.display_title(), "Sousou no Frieren");
    }
}
