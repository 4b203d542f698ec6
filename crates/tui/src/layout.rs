use ratatui::layout::{Constraint, Direction, Layout, Rect};
use showcase_core::{ElementId, Overlay, Surface};

const DETAIL_WIDTH: u16 = 72;
const DETAIL_HEIGHT: u16 = 20;
const WIKI_WIDTH: u16 = 60;
const WIKI_HEIGHT: u16 = 9;
const MIN_CONTENT_WIDTH: u16 = 24;
const MIN_CONTENT_HEIGHT: u16 = 6;

pub const CLOSE_LABEL: &str = "[x]";
pub const ACTION_LABEL: &str = "[ Wiki ]";

/// Regions of one overlay.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayLayout {
    /// Whole screen; clicks outside `content` land on the backdrop.
    pub root: Rect,
    pub content: Rect,
    pub close: Rect,
    pub action: Option<Rect>,
}

impl OverlayLayout {
    /// Regions while the overlay shrinks during its close transition.
    pub fn shrunk(&self) -> Self {
        if self.content.is_empty() {
            return *self;
        }
        place_controls(self.root, shrink(self.content), self.action.is_some())
    }
}

/// Screen regions standing in for the page structure.
#[derive(Debug, Clone, Copy)]
pub struct ScreenLayout {
    pub header: Rect,
    pub list: Rect,
    pub status: Rect,
    pub detail: OverlayLayout,
    pub wiki: OverlayLayout,
}

impl ScreenLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: rows[0],
            list: rows[1],
            status: rows[2],
            detail: overlay(area, DETAIL_WIDTH, DETAIL_HEIGHT, true),
            wiki: overlay(area, WIKI_WIDTH, WIKI_HEIGHT, false),
        }
    }

    pub fn overlay(&self, overlay: Overlay) -> &OverlayLayout {
        match overlay {
            Overlay::Detail => &self.detail,
            Overlay::Wiki => &self.wiki,
        }
    }
}

impl Surface for ScreenLayout {
    fn has_element(&self, element: ElementId) -> bool {
        match element {
            ElementId::GameList | ElementId::EmptyState => !self.list.is_empty(),
            ElementId::DetailModal => !self.detail.root.is_empty(),
            ElementId::DetailContent => !self.detail.content.is_empty(),
            ElementId::DetailClose => !self.detail.close.is_empty(),
            ElementId::DetailAction => self.detail.action.is_some_and(|rect| !rect.is_empty()),
            ElementId::WikiModal => !self.wiki.root.is_empty(),
            ElementId::WikiContent => !self.wiki.content.is_empty(),
            ElementId::WikiClose => !self.wiki.close.is_empty(),
        }
    }
}

fn overlay(area: Rect, width: u16, height: u16, with_action: bool) -> OverlayLayout {
    let content = centered_rect(
        width.min(area.width.saturating_sub(4)),
        height.min(area.height.saturating_sub(2)),
        area,
    );
    if content.width < MIN_CONTENT_WIDTH || content.height < MIN_CONTENT_HEIGHT {
        return OverlayLayout {
            root: area,
            ..OverlayLayout::default()
        };
    }

    place_controls(area, content, with_action)
}

fn place_controls(root: Rect, content: Rect, with_action: bool) -> OverlayLayout {
    let close_width = CLOSE_LABEL.len() as u16;
    let close = Rect::new(
        content.x + content.width - close_width - 2,
        content.y,
        close_width,
        1,
    );
    let action = with_action.then(|| {
        let width = ACTION_LABEL.len() as u16;
        Rect::new(
            content.x + (content.width - width) / 2,
            content.y + content.height - 2,
            width,
            1,
        )
    });

    OverlayLayout {
        root,
        content,
        close,
        action,
    }
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn shrink(rect: Rect) -> Rect {
    let dx = (rect.width / 40).max(1);
    let dy = u16::from(rect.height > MIN_CONTENT_HEIGHT);
    Rect::new(
        rect.x + dx,
        rect.y + dy,
        rect.width.saturating_sub(dx * 2),
        rect.height.saturating_sub(dy * 2),
    )
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roomy_terminal_exposes_every_element() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 120, 40));
        assert_eq!(layout.first_missing(), None);
        let detail = layout.detail;
        assert!(contains(detail.content, detail.close.x, detail.close.y));
        let action = detail.action.expect("detail has an action button");
        assert!(contains(detail.content, action.x, action.y));
        assert!(layout.wiki.action.is_none());
    }

    #[test]
    fn tiny_terminal_lacks_overlay_content() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 20, 6));
        assert_eq!(layout.first_missing(), Some(ElementId::DetailContent));
    }

    #[test]
    fn contains_excludes_far_edges() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(contains(rect, 2, 3));
        assert!(contains(rect, 5, 4));
        assert!(!contains(rect, 6, 4));
        assert!(!contains(rect, 5, 5));
    }

    #[test]
    fn shrink_stays_inside() {
        let rect = Rect::new(10, 5, 60, 18);
        let inner = shrink(rect);
        assert!(inner.width < rect.width && inner.height < rect.height);
        assert!(contains(rect, inner.x, inner.y));
    }

    #[test]
    fn shrunk_controls_follow_the_smaller_panel() {
        let detail = ScreenLayout::compute(Rect::new(0, 0, 120, 40)).detail;
        let shrunk = detail.shrunk();
        assert_eq!(shrunk.root, detail.root);
        assert!(shrunk.content.width < detail.content.width);
        let action = shrunk.action.expect("shrunk detail keeps its action button");
        assert!(contains(shrunk.content, action.x, action.y));
        assert!(contains(shrunk.content, shrunk.close.x, shrunk.close.y));
        assert_ne!(Some(action), detail.action);
        assert_ne!(shrunk.close, detail.close);
    }
}
