use thiserror::Error;

/// Errors from the remote catalog, schedule, ranking and image services.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by remote service")]
    RateLimited,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("GraphQL error: {0}")]
    GraphQl(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Text suitable for showing inline in the affected view.
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited => {
                "Too many requests were sent. Please wait a moment and try again.".into()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_message_is_friendly() {
        let msg = ApiError::RateLimited.user_message();
        assert!(msg.contains("Too many requests"));
    }

    #[test]
    fn test_other_errors_render_display() {
        let err = ApiError::Api {
            status: 503,
            message: "down".into(),
        };
        assert_eq!(err.user_message(), "API error (status 503): down");
    }
}
