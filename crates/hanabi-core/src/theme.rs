//! Theme resolution: settings in, presentation tokens out.
//!
//! Consumers read [`ThemeTokens`] and never compare raw theme identifiers.
//! The built-in palettes are embedded from a TOML catalog.

mod colors;
mod layout;

pub use colors::*;
pub use layout::*;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::ThemeConfig;
use crate::error::HanabiError;
use crate::settings::{ColorMode, CustomPalette, Settings, CUSTOM_THEME};

/// Embedded built-in theme catalog.
pub(crate) const BUILTIN_THEMES_TOML: &str = include_str!("../assets/themes.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    themes: Vec<BuiltinTheme>,
}

/// A named palette shipped with the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinTheme {
    pub id: String,
    pub name: String,
    pub palette: Palette,
}

/// All built-in themes, in display order.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: Vec<BuiltinTheme>,
}

impl ThemeCatalog {
    pub fn from_toml(toml_str: &str) -> Result<Self, HanabiError> {
        let file: CatalogFile = toml::from_str(toml_str)
            .map_err(|e| HanabiError::Config(format!("theme catalog parse error: {e}")))?;
        if file.themes.is_empty() {
            return Err(HanabiError::Config("theme catalog is empty".into()));
        }
        Ok(Self {
            themes: file.themes,
        })
    }

    pub fn builtin() -> Self {
        Self::from_toml(BUILTIN_THEMES_TOML).expect("embedded theme catalog is valid TOML")
    }

    pub fn get(&self, id: &str) -> Option<&BuiltinTheme> {
        self.themes.iter().find(|t| t.id == id)
    }

    pub fn themes(&self) -> &[BuiltinTheme] {
        &self.themes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Typography {
    pub font_family: String,
    pub bold: bool,
    pub italic: bool,
}

/// Everything the presentation layer needs to style itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeTokens {
    /// Identifier actually in effect after fallback.
    pub theme_id: String,
    pub palette: Palette,
    pub is_glass_style: bool,
    pub color_mode: ColorMode,
    pub layout: LayoutOffsets,
    pub typography: Typography,
    pub hover_animation: bool,
}

/// Pure mapping from [`Settings`] to [`ThemeTokens`].
#[derive(Debug, Clone)]
pub struct ThemeResolver {
    catalog: ThemeCatalog,
    default_id: String,
    glass: BTreeSet<String>,
}

impl ThemeResolver {
    pub fn new(catalog: ThemeCatalog, config: &ThemeConfig) -> Self {
        Self {
            catalog,
            default_id: config.default.clone(),
            glass: config.glass.iter().cloned().collect(),
        }
    }

    pub fn catalog(&self) -> &ThemeCatalog {
        &self.catalog
    }

    pub fn resolve(&self, settings: &Settings) -> ThemeTokens {
        let (theme_id, palette) = if settings.theme == CUSTOM_THEME {
            let fallback =
                Palette::from_custom(&CustomPalette::default(), &self.fallback().palette);
            let palette = settings
                .custom_theme_colors
                .as_ref()
                .map(|custom| Palette::from_custom(custom, &fallback))
                .unwrap_or(fallback);
            (CUSTOM_THEME.to_string(), palette)
        } else {
            let theme = match self.catalog.get(&settings.theme) {
                Some(theme) => theme,
                None => {
                    tracing::debug!(theme = %settings.theme, "unknown theme, using default");
                    self.fallback()
                }
            };
            (theme.id.clone(), theme.palette)
        };

        ThemeTokens {
            is_glass_style: self.glass.contains(&theme_id),
            theme_id,
            palette,
            color_mode: settings.color_mode,
            layout: LayoutOffsets::for_position(settings.header_position),
            typography: Typography {
                font_family: settings.font_family.clone(),
                bold: settings.is_text_bolder,
                italic: settings.is_text_italic,
            },
            hover_animation: settings.enable_hover_animation,
        }
    }

    /// The designated default theme, or the first catalog entry if the
    /// configured default is not in the catalog.
    fn fallback(&self) -> &BuiltinTheme {
        self.catalog
            .get(&self.default_id)
            .unwrap_or(&self.catalog.themes[0])
    }
}

impl Default for ThemeResolver {
    fn default() -> Self {
        Self::new(
            ThemeCatalog::builtin(),
            &crate::config::AppConfig::default().theme,
        )
    }
}
