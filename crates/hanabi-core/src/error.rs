use thiserror::Error;

#[derive(Debug, Error)]
pub enum HanabiError {
    #[error("feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("stored settings are corrupt: {0}")]
    SettingsCorrupt(String),

    #[error("failed to persist settings: {0}")]
    PersistenceWriteFailed(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
