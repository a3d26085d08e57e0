//! Colors and five-stop palettes.
//!
//! Palettes are serde-deserializable from the TOML catalog via hex strings.

use serde::{Deserialize, Serialize};

use crate::settings::CustomPalette;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize, len: usize| u8::from_str_radix(&hex[i..i + len], 16).ok();
        match hex.len() {
            6 => Some(Self::from_rgb8(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => {
                let expand = |v: u8| v * 17;
                Some(Self::from_rgb8(
                    expand(channel(0, 1)?),
                    expand(channel(1, 1)?),
                    expand(channel(2, 1)?),
                ))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ── Hex color serde ─────────────────────────────────────────────────

mod hex_color {
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::Color;

    pub fn serialize<S>(color: &Color, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s}")))
    }
}

/// Five color stops, lightest to darkest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(with = "hex_color")]
    pub lightest: Color,
    #[serde(with = "hex_color")]
    pub mint: Color,
    #[serde(with = "hex_color")]
    pub lime: Color,
    #[serde(with = "hex_color")]
    pub olive: Color,
    #[serde(with = "hex_color")]
    pub darkest: Color,
}

impl Palette {
    pub fn stops(&self) -> [Color; 5] {
        [self.lightest, self.mint, self.lime, self.olive, self.darkest]
    }

    /// Build from a user palette; unparsable stops take the value from `fallback`.
    pub fn from_custom(custom: &CustomPalette, fallback: &Palette) -> Self {
        let pick = |hex: &str, default: Color| Color::from_hex(hex).unwrap_or(default);
        Self {
            lightest: pick(&custom.lightest, fallback.lightest),
            mint: pick(&custom.mint, fallback.mint),
            lime: pick(&custom.lime, fallback.lime),
            olive: pick(&custom.olive, fallback.olive),
            darkest: pick(&custom.darkest, fallback.darkest),
        }
    }
}
