//! List rendering.

use tracing::debug;

use crate::{catalog::Catalog, view::CardView};

/// Output of a list render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// The catalog is empty; only the empty-state indicator is shown.
    Empty,
    /// One card per record, in catalog order.
    Cards(Vec<CardView>),
}

impl ListView {
    /// Cards to draw; empty for [`ListView::Empty`].
    pub fn cards(&self) -> &[CardView] {
        match self {
            ListView::Empty => &[],
            ListView::Cards(cards) => cards,
        }
    }

    /// Whether the empty-state indicator should be visible.
    pub fn shows_empty_state(&self) -> bool {
        matches!(self, ListView::Empty)
    }

    /// Id bound to the card at `index`.
    pub fn card_id(&self, index: usize) -> Option<u32> {
        self.cards().get(index).map(|card| card.id)
    }
}

/// Converts a catalog into card views. Every call rebuilds from scratch.
pub struct ListRenderer;

impl ListRenderer {
    /// Render `catalog`.
    pub fn render(catalog: &Catalog) -> ListView {
        if catalog.is_empty() {
            debug!("Catalog empty; showing empty state");
            return ListView::Empty;
        }
        let cards: Vec<CardView> = catalog.games().iter().map(CardView::from_record).collect();
        debug!(cards = cards.len(), "List rendered");
        ListView::Cards(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::record;
    use anyhow::Result;

    #[test]
    fn one_card_per_record_in_order() -> Result<()> {
        let catalog =
            Catalog::from_records(vec![record(3, "C"), record(1, "A"), record(2, "B")])?;
        let view = ListRenderer::render(&catalog);
        let cards = view.cards();
        assert_eq!(cards.len(), 3);
        let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["C", "A", "B"]);
        assert_eq!(cards[0].release, "C release");
        assert_eq!(view.card_id(1), Some(1));
        assert!(!view.shows_empty_state());
        Ok(())
    }

    #[test]
    fn empty_catalog_shows_empty_state() {
        let view = ListRenderer::render(&Catalog::default());
        assert!(view.shows_empty_state());
        assert!(view.cards().is_empty());
        assert_eq!(view.card_id(0), None);
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let catalog = Catalog::builtin();
        let first = ListRenderer::render(&catalog);
        let second = ListRenderer::render(&catalog);
        assert_eq!(first, second);
        assert_eq!(second.cards().len(), 1);
    }
}
