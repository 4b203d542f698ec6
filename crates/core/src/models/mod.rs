//! Shared domain models.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::CatalogError;

/// One entry of the game catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Unique identifier within the catalog.
    pub id: u32,
    /// Display name.
    pub title: String,
    /// Free-text release status (e.g. `Launch Q2 December 2025`).
    #[serde(default)]
    pub release: String,
    /// Free-text summary.
    #[serde(default)]
    pub description: String,
    /// Platform names, in display order.
    #[serde(default)]
    pub platforms: Vec<String>,
    /// Category labels, in display order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Thematic accent colour.
    #[serde(default)]
    pub color: AccentColor,
}

impl GameRecord {
    /// Platforms joined the way the detail view lists them.
    pub fn platform_line(&self) -> String {
        self.platforms.join(", ")
    }
}

/// Opaque sRGB colour used for thematic styling of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccentColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl AccentColor {
    /// Build a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel, e.g. for translucent chip borders.
    pub fn with_alpha(self, alpha: u8) -> TintedColor {
        TintedColor { base: self, alpha }
    }

    /// Parse `#rrggbb`, `#rgb` or the same without the leading `#`.
    pub fn parse_hex(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            }
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
                Some(Self::new(r, g, b))
            }
            _ => None,
        }
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        // #1e40af
        Self::new(0x1e, 0x40, 0xaf)
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for AccentColor {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s).ok_or_else(|| CatalogError::InvalidColor(s.to_string()))
    }
}

impl Serialize for AccentColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccentColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// An accent colour at reduced opacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TintedColor {
    /// Opaque colour being tinted.
    pub base: AccentColor,
    /// Opacity, `0` transparent to `255` opaque.
    pub alpha: u8,
}

impl TintedColor {
    /// Composite over an opaque background colour.
    pub fn blend_over(&self, background: AccentColor) -> AccentColor {
        let mix = |fg: u8, bg: u8| -> u8 {
            let alpha = u32::from(self.alpha);
            let value = (u32::from(fg) * alpha + u32::from(bg) * (255 - alpha) + 127) / 255;
            value as u8
        };
        AccentColor::new(
            mix(self.base.r, background.r),
            mix(self.base.g, background.g),
            mix(self.base.b, background.b),
        )
    }
}

impl fmt::Display for TintedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:02x}", self.base, self.alpha)
    }
}
