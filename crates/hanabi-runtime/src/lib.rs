pub mod audio;
mod db;
pub mod logging;
mod supersede;

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use hanabi_api::{ApiError, CatalogSource, RemoteSources};
use hanabi_core::config::AppConfig;
use hanabi_core::error::HanabiError;
use hanabi_core::feed::parse_feed_str;
use hanabi_core::gallery::{file_name, Advance, ImageReel};
use hanabi_core::models::{RankedTitle, Title};
use hanabi_core::player::{PlayerLayout, PlayerSession};
use hanabi_core::ranker::recommend;
use hanabi_core::schedule::{MonthSchedule, Season};
use hanabi_core::search::prefix_search;
use hanabi_core::settings::{Settings, SettingsField, SettingsPatch, SettingsStore};
use hanabi_core::storage::Storage;
use hanabi_core::theme::{ThemeCatalog, ThemeResolver, ThemeTokens};
use hanabi_core::view::{View, ViewController, ViewState};

pub use audio::{AmbientAudio, SilentAudio};
pub use db::SettingsHandle;
pub use supersede::{Supersede, Ticket};

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(String),
    #[error("database error: {0}")]
    Database(String),
    #[error(transparent)]
    Core(#[from] HanabiError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Load state of one piece of remote content.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Remote<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    /// User-visible message.
    Failed(String),
}

impl<T> Remote<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Gallery reel plus the last fetch error, if any.
#[derive(Debug, Clone)]
pub struct Gallery {
    pub reel: ImageReel,
    pub error: Option<String>,
}

/// Result of a settings change.
#[derive(Debug, Clone)]
pub struct SettingsUpdate {
    pub settings: Settings,
    pub theme: ThemeTokens,
    /// The effective feed source changed; the catalog should be reloaded.
    pub reload_catalog: bool,
}

#[derive(Debug, Clone)]
struct SettingsSnapshot {
    settings: Settings,
    theme: ThemeTokens,
}

const FEED_KEY: &str = "feed";
const SCHEDULE_KEY: &str = "schedule";
const RANKING_KEY: &str = "ranking";
const IMAGES_KEY: &str = "images";

/// One interactive session: settings, navigation and remote content.
pub struct Session<S = RemoteSources> {
    config: AppConfig,
    sources: S,
    settings: SettingsHandle,
    resolver: ThemeResolver,
    snapshot: RwLock<SettingsSnapshot>,
    view: RwLock<ViewController>,
    player: RwLock<Option<PlayerSession>>,
    audio: Arc<dyn AmbientAudio>,
    supersede: Supersede,
    catalog: RwLock<Remote<Vec<Title>>>,
    schedule: RwLock<Remote<MonthSchedule>>,
    ranking: RwLock<Remote<Vec<RankedTitle>>>,
    gallery: RwLock<Gallery>,
}

impl Session<RemoteSources> {
    /// Load config, open the settings database and build HTTP clients.
    pub fn new() -> Result<Self, RuntimeError> {
        let config = AppConfig::load().map_err(|e| RuntimeError::Config(e.to_string()))?;
        let db_path =
            AppConfig::ensure_db_path().map_err(|e| RuntimeError::Config(e.to_string()))?;
        let storage = Storage::open(&db_path)?;
        let sources = RemoteSources::from_config(&config)?;
        Self::with_parts(
            config,
            sources,
            SettingsStore::open(storage),
            Arc::new(SilentAudio),
        )
    }
}

impl<S: CatalogSource> Session<S> {
    pub fn with_parts(
        config: AppConfig,
        sources: S,
        store: SettingsStore<Storage>,
        audio: Arc<dyn AmbientAudio>,
    ) -> Result<Self, RuntimeError> {
        let resolver = ThemeResolver::new(ThemeCatalog::builtin(), &config.theme);
        let settings = store.current().clone();
        let theme = resolver.resolve(&settings);
        let handle = SettingsHandle::spawn(store)
            .ok_or_else(|| RuntimeError::Database("failed to start settings store".into()))?;
        let reel = ImageReel::new(config.images.prefetch_distance);

        Ok(Self {
            config,
            sources,
            settings: handle,
            resolver,
            snapshot: RwLock::new(SettingsSnapshot { settings, theme }),
            view: RwLock::new(ViewController::new()),
            player: RwLock::new(None),
            audio,
            supersede: Supersede::new(),
            catalog: RwLock::new(Remote::Idle),
            schedule: RwLock::new(Remote::Idle),
            ranking: RwLock::new(Remote::Idle),
            gallery: RwLock::new(Gallery { reel, error: None }),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ── Remote content ───────────────────────────────────────────

    /// Load the title feed, falling back to the default source once if a
    /// custom source fails.
    pub async fn load_catalog(&self) -> Remote<Vec<Title>> {
        let override_url = self
            .snapshot
            .read()
            .await
            .settings
            .feed_override()
            .map(str::to_owned);
        let default_url = self.config.sources.feed_url.clone();

        let ticket = self.supersede.issue(FEED_KEY).await;
        *self.catalog.write().await = Remote::Loading;

        let result = load_feed(&self.sources, override_url.as_deref(), &default_url).await;
        let state = match result {
            Ok(titles) => {
                tracing::info!(titles = titles.len(), "catalog loaded");
                Remote::Ready(recommend(&titles))
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog unavailable");
                Remote::Failed(e.to_string())
            }
        };
        self.apply(&ticket, &self.catalog, state).await
    }

    /// Load the airing calendar for `month` (1-based) of `year`.
    pub async fn load_schedule(&self, year: i32, month: u32) -> Remote<MonthSchedule> {
        let ticket = self.supersede.issue(SCHEDULE_KEY).await;
        *self.schedule.write().await = Remote::Loading;

        let season = Season::from_month(month);
        let state = match self.sources.season(year, season).await {
            Ok(items) => Remote::Ready(MonthSchedule::build(year, month, &items)),
            Err(e) => {
                tracing::warn!(year, %season, error = %e, "schedule unavailable");
                Remote::Failed(e.user_message())
            }
        };
        self.apply(&ticket, &self.schedule, state).await
    }

    pub async fn load_ranking(&self) -> Remote<Vec<RankedTitle>> {
        let ticket = self.supersede.issue(RANKING_KEY).await;
        *self.ranking.write().await = Remote::Loading;

        let state = match self.sources.top_rated(self.config.ranking.per_page).await {
            Ok(titles) => Remote::Ready(titles),
            Err(e) => {
                tracing::warn!(error = %e, "ranking unavailable");
                Remote::Failed(e.user_message())
            }
        };
        self.apply(&ticket, &self.ranking, state).await
    }

    /// Fetch a gallery batch. The initial batch replaces the reel; later
    /// ones append. Returns `false` when a batch is already in flight.
    pub async fn load_images(&self, initial: bool) -> bool {
        {
            let mut gallery = self.gallery.write().await;
            if !gallery.reel.begin_load(initial) {
                return false;
            }
            gallery.error = None;
        }
        let ticket = self.supersede.issue(IMAGES_KEY).await;

        let result = self.sources.image_batch().await;
        if !self.supersede.is_current(&ticket).await {
            tracing::debug!(key = ticket.key(), "dropping superseded response");
            return true;
        }

        let mut gallery = self.gallery.write().await;
        match result {
            Ok(batch) => gallery.reel.complete_load(batch, initial),
            Err(e) => {
                tracing::warn!(error = %e, "image batch unavailable");
                gallery.reel.fail_load();
                gallery.error = Some(e.user_message());
            }
        }
        true
    }

    /// Load every view's content concurrently.
    pub async fn refresh_all(&self, year: i32, month: u32) {
        futures::join!(
            self.load_catalog(),
            self.load_schedule(year, month),
            self.load_ranking(),
            self.load_images(true),
        );
    }

    async fn apply<T: Clone>(
        &self,
        ticket: &Ticket,
        slot: &RwLock<Remote<T>>,
        state: Remote<T>,
    ) -> Remote<T> {
        if !self.supersede.is_current(ticket).await {
            tracing::debug!(key = ticket.key(), "dropping superseded response");
            return slot.read().await.clone();
        }
        *slot.write().await = state.clone();
        state
    }

    pub async fn catalog(&self) -> Remote<Vec<Title>> {
        self.catalog.read().await.clone()
    }

    pub async fn schedule(&self) -> Remote<MonthSchedule> {
        self.schedule.read().await.clone()
    }

    pub async fn ranking(&self) -> Remote<Vec<RankedTitle>> {
        self.ranking.read().await.clone()
    }

    pub async fn gallery(&self) -> Gallery {
        self.gallery.read().await.clone()
    }

    /// Step the gallery forward; the caller fetches more on `FetchMore`
    /// or when [`Self::gallery_needs_prefetch`] reports so.
    pub async fn gallery_next(&self) -> Advance {
        self.gallery.write().await.reel.next()
    }

    pub async fn gallery_previous(&self) -> bool {
        self.gallery.write().await.reel.previous()
    }

    pub async fn gallery_needs_prefetch(&self) -> bool {
        self.gallery.read().await.reel.needs_prefetch()
    }

    /// Suggested download filename for the image under the cursor.
    pub async fn gallery_file_name(&self) -> Option<String> {
        self.gallery.read().await.reel.current().map(|url| file_name(url).to_owned())
    }

    /// Prefix search over the loaded catalog.
    pub async fn search(&self, query: &str) -> Vec<Title> {
        match self.catalog.read().await.ready() {
            Some(titles) => prefix_search(titles, query).into_iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    // ── Navigation ───────────────────────────────────────────────

    pub async fn view_state(&self) -> ViewState {
        self.view.read().await.state().clone()
    }

    pub async fn select_title(&self, title: Title) {
        let cue = self.view.write().await.select_title(title.clone());
        *self.player.write().await = Some(PlayerSession::open(title));
        audio::apply_cue(self.audio.as_ref(), &self.config.audio, cue);
    }

    pub async fn close_player(&self) {
        let (cue, open) = {
            let mut view = self.view.write().await;
            let cue = view.close_player();
            (cue, view.state().player_open())
        };
        if !open {
            *self.player.write().await = None;
        }
        audio::apply_cue(self.audio.as_ref(), &self.config.audio, cue);
    }

    pub async fn navigate(&self, target: View) {
        let cue = self.view.write().await.navigate(target);
        *self.player.write().await = None;
        tracing::debug!(view = %target, "navigate");
        audio::apply_cue(self.audio.as_ref(), &self.config.audio, cue);
    }

    pub async fn player(&self) -> Option<PlayerSession> {
        self.player.read().await.clone()
    }

    pub async fn select_episode(&self, index: usize) -> bool {
        match self.player.write().await.as_mut() {
            Some(player) => player.select_episode(index),
            None => false,
        }
    }

    pub async fn next_episode(&self) -> bool {
        match self.player.write().await.as_mut() {
            Some(player) => player.next_episode(),
            None => false,
        }
    }

    pub async fn previous_episode(&self) -> bool {
        match self.player.write().await.as_mut() {
            Some(player) => player.previous_episode(),
            None => false,
        }
    }

    // ── Settings & theme ─────────────────────────────────────────

    pub async fn settings(&self) -> Settings {
        self.snapshot.read().await.settings.clone()
    }

    pub async fn theme(&self) -> ThemeTokens {
        self.snapshot.read().await.theme.clone()
    }

    pub async fn player_layout(&self) -> PlayerLayout {
        PlayerLayout::from_settings(&self.snapshot.read().await.settings)
    }

    pub async fn update_settings(
        &self,
        patch: SettingsPatch,
    ) -> Result<SettingsUpdate, RuntimeError> {
        let settings = self.settings.update(patch).await?;
        Ok(self.replace_snapshot(settings).await)
    }

    pub async fn reset_setting(
        &self,
        field: SettingsField,
    ) -> Result<SettingsUpdate, RuntimeError> {
        let settings = self.settings.reset(field).await?;
        Ok(self.replace_snapshot(settings).await)
    }

    pub async fn welcome_seen(&self) -> Result<bool, RuntimeError> {
        self.settings.welcome_seen().await
    }

    pub async fn mark_welcome_seen(&self) -> Result<(), RuntimeError> {
        self.settings.mark_welcome_seen().await
    }

    async fn replace_snapshot(&self, settings: Settings) -> SettingsUpdate {
        let theme = self.resolver.resolve(&settings);
        let mut snapshot = self.snapshot.write().await;
        let reload_catalog = snapshot.settings.feed_override() != settings.feed_override();
        *snapshot = SettingsSnapshot {
            settings: settings.clone(),
            theme: theme.clone(),
        };
        SettingsUpdate {
            settings,
            theme,
            reload_catalog,
        }
    }
}

/// Fetch and parse the feed from `override_url` when set, retrying once
/// against `default_url` on failure.
async fn load_feed<S: CatalogSource>(
    sources: &S,
    override_url: Option<&str>,
    default_url: &str,
) -> Result<Vec<Title>, HanabiError> {
    let Some(url) = override_url.filter(|url| *url != default_url) else {
        return fetch_and_parse(sources, default_url).await;
    };
    match fetch_and_parse(sources, url).await {
        Ok(titles) => Ok(titles),
        Err(first) => {
            tracing::warn!(url, error = %first, "custom feed failed, using default source");
            fetch_and_parse(sources, default_url).await.map_err(|second| {
                HanabiError::FeedUnavailable(format!(
                    "custom source: {}; default source: {}",
                    reason(first),
                    reason(second)
                ))
            })
        }
    }
}

async fn fetch_and_parse<S: CatalogSource>(
    sources: &S,
    url: &str,
) -> Result<Vec<Title>, HanabiError> {
    let body = sources
        .fetch_feed(url)
        .await
        .map_err(|e| HanabiError::FeedUnavailable(e.to_string()))?;
    parse_feed_str(&body)
}

fn reason(e: HanabiError) -> String {
    match e {
        HanabiError::FeedUnavailable(message) => message,
        other => other.to_string(),
    }
}
