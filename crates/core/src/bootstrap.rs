//! Initial wiring of catalog, list and overlays onto a surface.

use std::time::Instant;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    catalog::Catalog,
    config::AppConfig,
    modal::{DetailModal, ModalHit, WikiModal},
    render::{ListRenderer, ListView},
    surface::{ElementId, Surface},
};

/// Fatal initialisation failures.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The surface lacks a required structural element.
    #[error("required element `{0}` is missing from the surface")]
    MissingElement(ElementId),
}

/// Which overlay an interaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    /// The record detail modal.
    Detail,
    /// The placeholder wiki modal.
    Wiki,
}

/// Verify `surface`, render the list and build both overlays.
pub fn bootstrap<S: Surface + ?Sized>(
    surface: &S,
    catalog: Catalog,
    config: &AppConfig,
) -> Result<Showcase, BootstrapError> {
    if let Some(missing) = surface.first_missing() {
        warn!(element = %missing, "Bootstrap aborted");
        return Err(BootstrapError::MissingElement(missing));
    }
    let showcase = Showcase::new(catalog, config);
    info!(
        cards = showcase.list().cards().len(),
        transition_ms = config.transition_ms,
        "Showcase bootstrapped"
    );
    Ok(showcase)
}

/// The catalog together with its rendered list and both overlays.
#[derive(Debug, Clone)]
pub struct Showcase {
    catalog: Catalog,
    list: ListView,
    detail: DetailModal,
    wiki: WikiModal,
}

impl Showcase {
    fn new(catalog: Catalog, config: &AppConfig) -> Self {
        let list = ListRenderer::render(&catalog);
        Self {
            catalog,
            list,
            detail: DetailModal::new(config.transition()),
            wiki: WikiModal::new(config.transition()),
        }
    }

    /// Active catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Most recent list render.
    pub fn list(&self) -> &ListView {
        &self.list
    }

    /// Detail overlay.
    pub fn detail(&self) -> &DetailModal {
        &self.detail
    }

    /// Wiki overlay.
    pub fn wiki(&self) -> &WikiModal {
        &self.wiki
    }

    /// Clear and rebuild the list from the current catalog.
    pub fn rerender(&mut self) {
        self.list = ListRenderer::render(&self.catalog);
    }

    /// Swap in a new catalog and rebuild the list.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.rerender();
    }

    /// Card click handler: open the detail overlay for `id`.
    pub fn click_card(&mut self, id: u32) -> bool {
        self.detail.open(&self.catalog, id)
    }

    /// Open the card at `index` of the current list.
    pub fn activate_card(&mut self, index: usize) -> bool {
        match self.list.card_id(index) {
            Some(id) => self.click_card(id),
            None => false,
        }
    }

    /// Primary action button: close the detail overlay and open the wiki.
    pub fn primary_action(&mut self, now: Instant) -> bool {
        let Some(title) = self.detail.primary_action(now) else {
            return false;
        };
        self.wiki.open(&title);
        true
    }

    /// Close button of `overlay`.
    pub fn close(&mut self, overlay: Overlay, now: Instant) -> bool {
        match overlay {
            Overlay::Detail => self.detail.close(now),
            Overlay::Wiki => self.wiki.close(now),
        }
    }

    /// A click on `overlay`, classified by the surface.
    pub fn click(&mut self, overlay: Overlay, hit: ModalHit, now: Instant) -> bool {
        match overlay {
            Overlay::Detail => self.detail.click(hit, now),
            Overlay::Wiki => self.wiki.click(hit, now),
        }
    }

    /// Topmost visible overlay. The wiki stacks above the detail modal.
    pub fn top_overlay(&self) -> Option<Overlay> {
        if self.wiki.modal().is_visible() {
            Some(Overlay::Wiki)
        } else if self.detail.modal().is_visible() {
            Some(Overlay::Detail)
        } else {
            None
        }
    }

    /// Close the topmost visible overlay.
    pub fn dismiss_top(&mut self, now: Instant) -> bool {
        match self.top_overlay() {
            Some(overlay) => self.close(overlay, now),
            None => false,
        }
    }

    /// Apply due hides. Returns whether anything changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let detail = self.detail.poll(now);
        let wiki = self.wiki.poll(now);
        detail || wiki
    }

    /// Earliest pending hide across both overlays.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (
            self.detail.modal().next_deadline(),
            self.wiki.modal().next_deadline(),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, time::Duration};

    use super::*;
    use crate::{
        catalog::tests::record,
        models::{AccentColor, GameRecord},
        modal::ModalState,
    };
    use anyhow::Result;

    struct FakeSurface {
        missing: HashSet<ElementId>,
    }

    impl FakeSurface {
        fn complete() -> Self {
            Self {
                missing: HashSet::new(),
            }
        }
    }

    impl Surface for FakeSurface {
        fn has_element(&self, element: ElementId) -> bool {
            !self.missing.contains(&element)
        }
    }

    fn pets() -> GameRecord {
        GameRecord {
            id: 1,
            title: "PETS".to_string(),
            release: "Launch Q2 December 2025".to_string(),
            description: "Adopt and train virtual pets.".to_string(),
            platforms: vec!["Roblox".to_string()],
            tags: vec!["Roblox".to_string(), "Simulation".to_string()],
            color: AccentColor::new(0x1e, 0x40, 0xaf),
        }
    }

    fn boot(catalog: Catalog) -> Result<Showcase> {
        Ok(bootstrap(
            &FakeSurface::complete(),
            catalog,
            &AppConfig::default(),
        )?)
    }

    #[test]
    fn missing_element_aborts_bootstrap() {
        let mut surface = FakeSurface::complete();
        surface.missing.insert(ElementId::WikiClose);
        let err = bootstrap(&surface, Catalog::builtin(), &AppConfig::default()).unwrap_err();
        assert!(matches!(err, BootstrapError::MissingElement(ElementId::WikiClose)));
        assert_eq!(
            err.to_string(),
            "required element `close-wiki-btn` is missing from the surface"
        );
    }

    #[test]
    fn pets_walkthrough() -> Result<()> {
        let now = Instant::now();
        let mut showcase = boot(Catalog::from_records(vec![pets()])?)?;

        let cards = showcase.list().cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "PETS");

        assert!(showcase.activate_card(0));
        let detail = showcase.detail().modal().content().expect("detail shown");
        assert_eq!(detail.platforms, "Roblox");
        assert_eq!(detail.tags.len(), 2);
        assert_eq!(showcase.top_overlay(), Some(Overlay::Detail));

        assert!(showcase.primary_action(now));
        assert_eq!(showcase.detail().modal().state(), ModalState::Closing);
        assert_eq!(showcase.wiki().modal().state(), ModalState::Open);
        assert_eq!(
            showcase.wiki().modal().content().map(|w| w.header.as_str()),
            Some("PETS - Official Wiki")
        );
        assert_eq!(showcase.top_overlay(), Some(Overlay::Wiki));

        let transition = showcase.detail().modal().transition();
        assert_eq!(showcase.next_deadline(), Some(now + transition));
        assert!(showcase.poll(now + transition));
        assert_eq!(showcase.detail().modal().state(), ModalState::Closed);
        assert_eq!(showcase.wiki().modal().state(), ModalState::Open);
        Ok(())
    }

    #[test]
    fn rerender_does_not_duplicate_cards() -> Result<()> {
        let mut showcase = boot(Catalog::from_records(vec![record(1, "A"), record(2, "B")])?)?;
        let before = showcase.list().clone();
        showcase.rerender();
        showcase.rerender();
        assert_eq!(showcase.list(), &before);
        assert_eq!(showcase.list().cards().len(), 2);
        Ok(())
    }

    #[test]
    fn replacing_catalog_rebuilds_list() -> Result<()> {
        let mut showcase = boot(Catalog::builtin())?;
        showcase.replace_catalog(Catalog::default());
        assert!(showcase.list().shows_empty_state());
        assert!(!showcase.activate_card(0));
        assert!(!showcase.click_card(1));
        Ok(())
    }

    #[test]
    fn dismiss_top_closes_wiki_before_detail() -> Result<()> {
        let now = Instant::now();
        let mut showcase = boot(Catalog::builtin())?;
        assert!(!showcase.dismiss_top(now));

        showcase.click_card(1);
        showcase.primary_action(now);
        assert!(showcase.dismiss_top(now));
        assert_eq!(showcase.wiki().modal().state(), ModalState::Closing);

        let later = now + Duration::from_secs(1);
        showcase.poll(later);
        assert_eq!(showcase.top_overlay(), None);
        Ok(())
    }

    #[test]
    fn backdrop_click_routes_to_overlay() -> Result<()> {
        let now = Instant::now();
        let mut showcase = boot(Catalog::builtin())?;
        showcase.click_card(1);
        assert!(!showcase.click(Overlay::Detail, ModalHit::Content, now));
        assert!(showcase.click(Overlay::Detail, ModalHit::Backdrop, now));
        assert!(!showcase.click(Overlay::Wiki, ModalHit::Backdrop, now));
        Ok(())
    }
}
