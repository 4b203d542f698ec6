//! Contract between the core and whatever frontend hosts it.

use std::fmt;

/// Structural elements a frontend must expose before bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    /// Container holding the rendered cards.
    GameList,
    /// Indicator revealed when the catalog is empty.
    EmptyState,
    /// Detail overlay root (its backdrop).
    DetailModal,
    /// Detail overlay content panel.
    DetailContent,
    /// Detail close button.
    DetailClose,
    /// Detail primary action button.
    DetailAction,
    /// Wiki overlay root (its backdrop).
    WikiModal,
    /// Wiki overlay content panel.
    WikiContent,
    /// Wiki close button.
    WikiClose,
}

impl ElementId {
    /// Every element bootstrap requires.
    pub const ALL: [ElementId; 9] = [
        ElementId::GameList,
        ElementId::EmptyState,
        ElementId::DetailModal,
        ElementId::DetailContent,
        ElementId::DetailClose,
        ElementId::DetailAction,
        ElementId::WikiModal,
        ElementId::WikiContent,
        ElementId::WikiClose,
    ];

    /// Stable identifier used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::GameList => "game-list",
            ElementId::EmptyState => "empty-state",
            ElementId::DetailModal => "detail-modal",
            ElementId::DetailContent => "modal-content",
            ElementId::DetailClose => "close-modal-btn",
            ElementId::DetailAction => "wiki-btn",
            ElementId::WikiModal => "wiki-modal",
            ElementId::WikiContent => "wiki-content",
            ElementId::WikiClose => "close-wiki-btn",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A frontend able to host the catalog list and both overlays.
pub trait Surface {
    /// Whether `element` is available.
    fn has_element(&self, element: ElementId) -> bool;

    /// First required element the surface lacks.
    fn first_missing(&self) -> Option<ElementId> {
        ElementId::ALL
            .into_iter()
            .find(|element| !self.has_element(*element))
    }
}
