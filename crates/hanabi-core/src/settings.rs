//! Persisted user settings.
//!
//! One record, serialised as JSON under a single key. Loading is total:
//! absent or unreadable state yields [`Settings::default`]. Every update is
//! written through immediately; a failed write is logged and the in-memory
//! value stays authoritative for the session.

use serde::{Deserialize, Serialize};

use crate::error::HanabiError;
use crate::theme::Color;

/// Storage key holding the serialised settings record.
pub const SETTINGS_KEY: &str = "hanabi.settings";

/// Storage key of the once-per-installation welcome flag.
pub const WELCOME_SEEN_KEY: &str = "hanabi.welcome_seen";

/// Theme identifier that selects the user's own palette.
pub const CUSTOM_THEME: &str = "custom";

pub const DEFAULT_THEME: &str = "green-screen";
pub const DEFAULT_FONT_FAMILY: &str = "Inter, sans-serif";

/// Key-value persistence used by [`SettingsStore`].
pub trait SettingsBackend {
    fn read(&self, key: &str) -> Result<Option<String>, HanabiError>;
    fn write(&self, key: &str, value: &str) -> Result<(), HanabiError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Dark,
    Light,
}

/// Where the primary navigation bar is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl HeaderPosition {
    pub const ALL: &[HeaderPosition] = &[Self::Top, Self::Bottom, Self::Left, Self::Right];

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// The five stops of a user palette, as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPalette {
    pub lightest: String,
    pub mint: String,
    pub lime: String,
    pub olive: String,
    pub darkest: String,
}

impl Default for CustomPalette {
    fn default() -> Self {
        Self {
            lightest: "#ECFDFF".into(),
            mint: "#41F0D1".into(),
            lime: "#A8FFC8".into(),
            olive: "#008B8B".into(),
            darkest: "#012A29".into(),
        }
    }
}

impl CustomPalette {
    fn stops(&self) -> [(&'static str, &str); 5] {
        [
            ("lightest", &self.lightest),
            ("mint", &self.mint),
            ("lime", &self.lime),
            ("olive", &self.olive),
            ("darkest", &self.darkest),
        ]
    }

    fn stops_mut(&mut self) -> [(&'static str, &mut String); 5] {
        [
            ("lightest", &mut self.lightest),
            ("mint", &mut self.mint),
            ("lime", &mut self.lime),
            ("olive", &mut self.olive),
            ("darkest", &mut self.darkest),
        ]
    }

    fn apply(&mut self, patch: PalettePatch) {
        if let Some(v) = patch.lightest {
            self.lightest = v;
        }
        if let Some(v) = patch.mint {
            self.mint = v;
        }
        if let Some(v) = patch.lime {
            self.lime = v;
        }
        if let Some(v) = patch.olive {
            self.olive = v;
        }
        if let Some(v) = patch.darkest {
            self.darkest = v;
        }
    }
}

/// Named stop of a [`CustomPalette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteStop {
    Lightest,
    Mint,
    Lime,
    Olive,
    Darkest,
}

/// The full settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub color_mode: ColorMode,
    pub theme: String,
    pub is_text_bolder: bool,
    pub is_text_italic: bool,
    pub font_family: String,
    pub disable_popup_player: bool,
    pub block_new_tabs: bool,
    pub show_notes: bool,
    pub header_position: HeaderPosition,
    pub resizable_panes: bool,
    pub show_calendar: bool,
    pub show_todo_list: bool,
    pub show_stopwatch: bool,
    pub avatar_url: String,
    pub enable_hover_animation: bool,
    pub custom_anime_data_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme_colors: Option<CustomPalette>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Dark,
            theme: DEFAULT_THEME.into(),
            is_text_bolder: false,
            is_text_italic: false,
            font_family: DEFAULT_FONT_FAMILY.into(),
            disable_popup_player: false,
            block_new_tabs: true,
            show_notes: true,
            header_position: HeaderPosition::Top,
            resizable_panes: false,
            show_calendar: false,
            show_todo_list: false,
            show_stopwatch: false,
            avatar_url: String::new(),
            enable_hover_animation: true,
            custom_anime_data_url: String::new(),
            custom_theme_colors: None,
        }
    }
}

impl Settings {
    /// Parse and validate a stored record.
    pub fn from_json(json: &str) -> Result<Self, HanabiError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| HanabiError::SettingsCorrupt(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, HanabiError> {
        serde_json::to_string(self).map_err(|e| HanabiError::PersistenceWriteFailed(e.to_string()))
    }

    fn validate(&self) -> Result<(), HanabiError> {
        if self.theme.trim().is_empty() {
            return Err(HanabiError::SettingsCorrupt("empty theme identifier".into()));
        }
        if self.font_family.trim().is_empty() {
            return Err(HanabiError::SettingsCorrupt("empty font family".into()));
        }
        if let Some(palette) = &self.custom_theme_colors {
            for (stop, value) in palette.stops() {
                if Color::from_hex(value).is_none() {
                    return Err(HanabiError::SettingsCorrupt(format!(
                        "custom color `{stop}` is not a hex color: {value}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Put back the `previous` value of every field `validate` would reject.
    fn keep_valid_fields(&mut self, previous: &Settings) {
        if self.theme.trim().is_empty() {
            tracing::warn!("ignoring empty theme identifier");
            self.theme = previous.theme.clone();
        }
        if self.font_family.trim().is_empty() {
            tracing::warn!("ignoring empty font family");
            self.font_family = previous.font_family.clone();
        }
        if let Some(palette) = &mut self.custom_theme_colors {
            let fallback = previous.custom_theme_colors.clone().unwrap_or_default();
            for ((stop, value), (_, old)) in palette.stops_mut().into_iter().zip(fallback.stops()) {
                if Color::from_hex(value).is_none() {
                    tracing::warn!(stop, value = %value, "ignoring non-hex custom color");
                    *value = old.to_string();
                }
            }
        }
    }

    /// Shallow merge; the custom palette merges stop by stop.
    pub fn apply(&mut self, patch: SettingsPatch) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(v) = patch.$field {
                    self.$field = v;
                })*
            };
        }
        merge!(
            color_mode,
            theme,
            is_text_bolder,
            is_text_italic,
            font_family,
            disable_popup_player,
            block_new_tabs,
            show_notes,
            header_position,
            resizable_panes,
            show_calendar,
            show_todo_list,
            show_stopwatch,
            avatar_url,
            enable_hover_animation,
            custom_anime_data_url,
        );
        if let Some(palette_patch) = patch.custom_theme_colors {
            self.custom_theme_colors
                .get_or_insert_with(CustomPalette::default)
                .apply(palette_patch);
        }
    }

    /// Restore one field to its default value.
    pub fn reset_field(&mut self, field: SettingsField) {
        let d = Settings::default();
        match field {
            SettingsField::ColorMode => self.color_mode = d.color_mode,
            SettingsField::Theme => self.theme = d.theme,
            SettingsField::IsTextBolder => self.is_text_bolder = d.is_text_bolder,
            SettingsField::IsTextItalic => self.is_text_italic = d.is_text_italic,
            SettingsField::FontFamily => self.font_family = d.font_family,
            SettingsField::DisablePopupPlayer => self.disable_popup_player = d.disable_popup_player,
            SettingsField::BlockNewTabs => self.block_new_tabs = d.block_new_tabs,
            SettingsField::ShowNotes => self.show_notes = d.show_notes,
            SettingsField::HeaderPosition => self.header_position = d.header_position,
            SettingsField::ResizablePanes => self.resizable_panes = d.resizable_panes,
            SettingsField::ShowCalendar => self.show_calendar = d.show_calendar,
            SettingsField::ShowTodoList => self.show_todo_list = d.show_todo_list,
            SettingsField::ShowStopwatch => self.show_stopwatch = d.show_stopwatch,
            SettingsField::AvatarUrl => self.avatar_url = d.avatar_url,
            SettingsField::EnableHoverAnimation => {
                self.enable_hover_animation = d.enable_hover_animation
            }
            SettingsField::CustomAnimeDataUrl => {
                self.custom_anime_data_url = d.custom_anime_data_url
            }
            SettingsField::CustomThemeColors => self.custom_theme_colors = d.custom_theme_colors,
        }
    }

    /// The feed override, if one is set.
    pub fn feed_override(&self) -> Option<&str> {
        Some(self.custom_anime_data_url.trim()).filter(|s| !s.is_empty())
    }
}

/// Field selector for [`SettingsStore::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingsField {
    ColorMode,
    Theme,
    IsTextBolder,
    IsTextItalic,
    FontFamily,
    DisablePopupPlayer,
    BlockNewTabs,
    ShowNotes,
    HeaderPosition,
    ResizablePanes,
    ShowCalendar,
    ShowTodoList,
    ShowStopwatch,
    AvatarUrl,
    EnableHoverAnimation,
    CustomAnimeDataUrl,
    CustomThemeColors,
}

/// Partial palette change; unset stops keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalettePatch {
    pub lightest: Option<String>,
    pub mint: Option<String>,
    pub lime: Option<String>,
    pub olive: Option<String>,
    pub darkest: Option<String>,
}

/// Partial settings change; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub color_mode: Option<ColorMode>,
    pub theme: Option<String>,
    pub is_text_bolder: Option<bool>,
    pub is_text_italic: Option<bool>,
    pub font_family: Option<String>,
    pub disable_popup_player: Option<bool>,
    pub block_new_tabs: Option<bool>,
    pub show_notes: Option<bool>,
    pub header_position: Option<HeaderPosition>,
    pub resizable_panes: Option<bool>,
    pub show_calendar: Option<bool>,
    pub show_todo_list: Option<bool>,
    pub show_stopwatch: Option<bool>,
    pub avatar_url: Option<String>,
    pub enable_hover_animation: Option<bool>,
    pub custom_anime_data_url: Option<String>,
    pub custom_theme_colors: Option<PalettePatch>,
}

impl SettingsPatch {
    /// Change one custom palette stop and switch to the custom theme.
    pub fn custom_color(stop: PaletteStop, hex: impl Into<String>) -> Self {
        let hex = Some(hex.into());
        let mut palette = PalettePatch::default();
        match stop {
            PaletteStop::Lightest => palette.lightest = hex,
            PaletteStop::Mint => palette.mint = hex,
            PaletteStop::Lime => palette.lime = hex,
            PaletteStop::Olive => palette.olive = hex,
            PaletteStop::Darkest => palette.darkest = hex,
        }
        Self {
            theme: Some(CUSTOM_THEME.into()),
            custom_theme_colors: Some(palette),
            ..Default::default()
        }
    }
}

/// Owner of the session's settings, writing through to a backend.
pub struct SettingsStore<B> {
    backend: B,
    current: Settings,
}

impl<B: SettingsBackend> SettingsStore<B> {
    /// Open the store, loading persisted settings (or defaults).
    pub fn open(backend: B) -> Self {
        let current = load_from(&backend);
        Self { backend, current }
    }

    /// Read the persisted record. Never fails: falls back to defaults.
    pub fn load(&self) -> Settings {
        load_from(&self.backend)
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// Merge `patch`, persist the result and return it.
    pub fn update(&mut self, patch: SettingsPatch) -> Settings {
        let mut next = self.current.clone();
        next.apply(patch);
        next.keep_valid_fields(&self.current);
        self.commit(next)
    }

    /// Restore one field to its default and persist.
    pub fn reset(&mut self, field: SettingsField) -> Settings {
        let mut next = self.current.clone();
        next.reset_field(field);
        self.commit(next)
    }

    /// Whether onboarding content was already shown on this installation.
    pub fn welcome_seen(&self) -> bool {
        match self.backend.read(WELCOME_SEEN_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                tracing::warn!(error = %e, "cannot read welcome flag");
                false
            }
        }
    }

    pub fn mark_welcome_seen(&self) {
        if let Err(e) = self.backend.write(WELCOME_SEEN_KEY, "true") {
            tracing::warn!(error = %e, "cannot persist welcome flag");
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn commit(&mut self, next: Settings) -> Settings {
        self.current = next;
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "settings kept in memory only");
        }
        self.current.clone()
    }

    fn persist(&self) -> Result<(), HanabiError> {
        let json = self.current.to_json()?;
        self.backend
            .write(SETTINGS_KEY, &json)
            .map_err(|e| HanabiError::PersistenceWriteFailed(e.to_string()))
    }
}

fn load_from<B: SettingsBackend>(backend: &B) -> Settings {
    let stored = match backend.read(SETTINGS_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return Settings::default(),
        Err(e) => {
            tracing::warn!(error = %e, "cannot read settings, using defaults");
            return Settings::default();
        }
    };
    match Settings::from_json(&stored) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "discarding stored settings");
            Settings::default()
        }
    }
}
