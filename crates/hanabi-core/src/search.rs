use crate::models::Title;

/// Maximum number of suggestions returned by [`prefix_search`].
pub const MAX_SUGGESTIONS: usize = 10;

/// Case-insensitive prefix match on title names, in catalog order.
pub fn prefix_search<'a>(titles: &'a [Title], query: &str) -> Vec<&'a Title> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    titles
        .iter()
        .filter(|t| t.name.to_lowercase().starts_with(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(names: &[&str]) -> Vec<Title> {
        names.iter().map(|n| Title::new(*n)).collect()
    }

    #[test]
    fn test_prefix_is_case_insensitive() {
        let titles = catalog(&["Frieren", "Fire Force", "Bocchi", "frieren 2"]);
        let hits: Vec<_> = prefix_search(&titles, "FRI").iter().map(|t| t.name.as_str()).collect();
        assert_eq!(hits, ["Frieren", "frieren 2"]);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        assert!(prefix_search(&catalog(&["A"]), "").is_empty());
    }

    #[test]
    fn test_limits_suggestions() {
        let names: Vec<String> = (0..25).map(|i| format!("Show {i}")).collect();
        let titles: Vec<Title> = names.iter().map(Title::new).collect();
        assert_eq!(prefix_search(&titles, "show").len(), MAX_SUGGESTIONS);
    }
}
