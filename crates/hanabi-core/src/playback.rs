use url::Url;

/// How an embedded video is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Full player: starts muted and playing.
    Player,
    /// Hover preview on a catalog card: no controls, looping.
    Preview,
}

impl Mode {
    fn params(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Player => &[("autoplay", "1"), ("mute", "1")],
            Self::Preview => &[
                ("autoplay", "1"),
                ("mute", "1"),
                ("controls", "0"),
                ("loop", "1"),
            ],
        }
    }
}

/// Build the embed URL for an episode link.
///
/// Existing values for the playback parameters are replaced; other query
/// pairs are kept in order. Links that do not parse as absolute URLs get
/// the parameters appended verbatim.
pub fn playback_url(link: &str, mode: Mode) -> String {
    let params = mode.params();
    match Url::parse(link) {
        Ok(mut url) => {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(k, _)| !params.iter().any(|(p, _)| k == p))
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            {
                let mut query = url.query_pairs_mut();
                query.clear();
                query.extend_pairs(kept);
                query.extend_pairs(params.iter().copied());
            }
            url.to_string()
        }
        Err(e) => {
            tracing::debug!(link, error = %e, "unparsable episode link, appending query");
            let sep = if link.contains('?') { '&' } else { '?' };
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{link}{sep}{}", query.join("&"))
        }
    }
}
