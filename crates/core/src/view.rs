#![allow(missing_docs)]

//! View models consumed by presentation layers.
//!
//! Frontends draw from these structures only; they never format raw
//! [`GameRecord`] fields themselves.

use crate::models::{AccentColor, GameRecord, TintedColor};

/// Opacity applied to chip borders (`0x50`, roughly 31%).
pub const CHIP_BORDER_ALPHA: u8 = 0x50;
/// Number of platforms represented by an icon on a card.
pub const MAX_PLATFORM_ICONS: usize = 3;
/// Lines of description shown on a card before clamping.
pub const DESCRIPTION_LINE_CLAMP: usize = 3;
/// Suffix appended to the title in the wiki header.
pub const WIKI_HEADER_SUFFIX: &str = " - Official Wiki";

const KNOWN_PLATFORMS: &[(&str, &str)] = &[("Roblox", "🧱")];

/// A category label chip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagChip {
    /// Label text.
    pub label: String,
    /// Border colour, the record accent at reduced opacity.
    pub border: TintedColor,
}

/// Platform indicator on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformIcon {
    /// Glyph for recognised platforms; `None` renders an empty icon.
    pub glyph: Option<&'static str>,
    /// Always the platform name.
    pub tooltip: String,
}

impl PlatformIcon {
    /// Resolve the icon for a platform name.
    pub fn for_platform(name: &str) -> Self {
        let glyph = KNOWN_PLATFORMS
            .iter()
            .find(|(needle, _)| name.contains(needle))
            .map(|(_, glyph)| *glyph);
        Self {
            glyph,
            tooltip: name.to_string(),
        }
    }
}

/// Compact summary of one record in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    /// Record bound to this card's click handler.
    pub id: u32,
    pub title: String,
    pub release: String,
    pub accent: AccentColor,
    /// Full text; frontends clamp it to `line_clamp` lines when drawing.
    pub description: String,
    pub line_clamp: usize,
    pub platforms: Vec<PlatformIcon>,
    pub tags: Vec<TagChip>,
}

impl CardView {
    /// Build the card for `record`.
    pub fn from_record(record: &GameRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            release: record.release.clone(),
            accent: record.color,
            description: record.description.clone(),
            line_clamp: DESCRIPTION_LINE_CLAMP,
            platforms: record
                .platforms
                .iter()
                .take(MAX_PLATFORM_ICONS)
                .map(|name| PlatformIcon::for_platform(name))
                .collect(),
            tags: tag_chips(record),
        }
    }
}

/// Full attributes of the record shown in the detail modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub id: u32,
    pub title: String,
    pub title_color: AccentColor,
    /// `Release: <release>`.
    pub release_line: String,
    pub description: String,
    /// Platforms joined with `", "`.
    pub platforms: String,
    pub tags: Vec<TagChip>,
    /// Title handed to the wiki modal by the primary action.
    pub action_title: String,
}

impl DetailView {
    /// Build the detail view for `record`.
    pub fn from_record(record: &GameRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            title_color: record.color,
            release_line: format!("Release: {}", record.release),
            description: record.description.clone(),
            platforms: record.platform_line(),
            tags: tag_chips(record),
            action_title: record.title.clone(),
        }
    }
}

/// Placeholder wiki overlay content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiView {
    pub header: String,
}

impl WikiView {
    /// Header-only view for the given game title.
    pub fn for_title(title: &str) -> Self {
        Self {
            header: format!("{title}{WIKI_HEADER_SUFFIX}"),
        }
    }
}

fn tag_chips(record: &GameRecord) -> Vec<TagChip> {
    let border = record.color.with_alpha(CHIP_BORDER_ALPHA);
    record
        .tags
        .iter()
        .map(|tag| TagChip {
            label: tag.clone(),
            border,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::record;

    #[test]
    fn only_first_three_platforms_get_icons() {
        let mut game = record(1, "Many");
        game.platforms = ["Roblox", "PC", "Switch", "Xbox"]
            .into_iter()
            .map(String::from)
            .collect();
        let card = CardView::from_record(&game);
        assert_eq!(card.platforms.len(), 3);
        assert_eq!(card.platforms[0].glyph, Some("🧱"));
        assert_eq!(card.platforms[1].glyph, None);
        assert_eq!(card.platforms[1].tooltip, "PC");
        assert_eq!(card.platforms[2].tooltip, "Switch");
    }

    #[test]
    fn platform_match_is_substring_based() {
        assert_eq!(PlatformIcon::for_platform("Roblox Studio").glyph, Some("🧱"));
        assert_eq!(PlatformIcon::for_platform("roblox").glyph, None);
    }

    #[test]
    fn card_keeps_full_description_and_tints_chips() {
        let game = record(4, "Tint");
        let card = CardView::from_record(&game);
        assert_eq!(card.description, game.description);
        assert_eq!(card.line_clamp, DESCRIPTION_LINE_CLAMP);
        assert_eq!(card.tags.len(), 1);
        assert_eq!(card.tags[0].border, game.color.with_alpha(0x50));
    }

    #[test]
    fn empty_fields_degrade_gracefully() {
        let mut game = record(5, "Bare");
        game.tags.clear();
        game.platforms.clear();
        let card = CardView::from_record(&game);
        assert!(card.tags.is_empty());
        assert!(card.platforms.is_empty());
        let detail = DetailView::from_record(&game);
        assert_eq!(detail.platforms, "");
        assert!(detail.tags.is_empty());
    }

    #[test]
    fn detail_and_wiki_text() {
        let mut game = record(6, "PETS");
        game.release = "Launch Q2 December 2025".to_string();
        game.platforms = vec!["Roblox".to_string(), "PC".to_string()];
        let detail = DetailView::from_record(&game);
        assert_eq!(detail.release_line, "Release: Launch Q2 December 2025");
        assert_eq!(detail.platforms, "Roblox, PC");
        assert_eq!(detail.action_title, "PETS");
        assert_eq!(WikiView::for_title("PETS").header, "PETS - Official Wiki");
    }
}
