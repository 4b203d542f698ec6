//! Modal overlay state machines.
//!
//! Each modal moves `Closed -> Open -> Closing -> Closed`. Opening is
//! immediate; closing starts a shrink transition and the modal is hidden once
//! its [`DeferredHide`] fires. The hide is owned by the modal instance and is
//! cancelled whenever the modal is opened again.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{
    catalog::Catalog,
    view::{DetailView, WikiView},
};

/// Default length of the close transition.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// Visual state of a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    /// Hidden.
    Closed,
    /// Fully shown.
    Open,
    /// Still visible, shrinking until the pending hide fires.
    Closing,
}

/// Where a click landed relative to a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalHit {
    /// The dimmed region around the content panel.
    Backdrop,
    /// Inside the content panel.
    Content,
}

/// A cancellable one-shot hide.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeferredHide {
    deadline: Option<Instant>,
}

impl DeferredHide {
    /// Schedule (or reschedule) the hide for `now + delay`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Drop any pending hide. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// When the pending hide is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the hide if it is due at `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Generic overlay holding the view it was last opened with.
#[derive(Debug, Clone)]
pub struct Modal<V> {
    name: &'static str,
    state: ModalState,
    content: Option<V>,
    hide: DeferredHide,
    transition: Duration,
}

impl<V> Modal<V> {
    /// New closed modal. `name` is used in log output only.
    pub fn new(name: &'static str, transition: Duration) -> Self {
        Self {
            name,
            state: ModalState::Closed,
            content: None,
            hide: DeferredHide::default(),
            transition,
        }
    }

    /// Current state.
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Last populated content. Retained after closing.
    pub fn content(&self) -> Option<&V> {
        self.content.as_ref()
    }

    /// Whether the overlay occupies the screen (open or shrinking).
    pub fn is_visible(&self) -> bool {
        self.state != ModalState::Closed
    }

    /// Configured close transition.
    pub fn transition(&self) -> Duration {
        self.transition
    }

    /// Pending hide deadline, if closing.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.hide.deadline()
    }

    /// Populate and show immediately, cancelling any pending hide.
    pub fn show(&mut self, content: V) {
        if self.hide.cancel() {
            debug!(modal = self.name, "Pending hide cancelled by reopen");
        }
        self.content = Some(content);
        self.state = ModalState::Open;
        info!(modal = self.name, "Modal opened");
    }

    /// Start the close transition. Restarts the timer while already closing.
    pub fn close(&mut self, now: Instant) -> bool {
        if self.state == ModalState::Closed {
            return false;
        }
        self.hide.schedule(now, self.transition);
        self.state = ModalState::Closing;
        debug!(modal = self.name, delay_ms = self.transition.as_millis() as u64, "Modal closing");
        true
    }

    /// Apply a due hide. Returns whether the modal became hidden.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.hide.fire(now) {
            return false;
        }
        self.state = ModalState::Closed;
        info!(modal = self.name, "Modal hidden");
        true
    }

    /// Backdrop clicks close; content clicks are ignored.
    pub fn click(&mut self, hit: ModalHit, now: Instant) -> bool {
        match hit {
            ModalHit::Backdrop => self.close(now),
            ModalHit::Content => false,
        }
    }
}

/// Detail overlay for a single catalog record.
#[derive(Debug, Clone)]
pub struct DetailModal {
    modal: Modal<DetailView>,
}

impl DetailModal {
    /// New closed detail modal.
    pub fn new(transition: Duration) -> Self {
        Self {
            modal: Modal::new("detail", transition),
        }
    }

    /// Underlying state machine.
    pub fn modal(&self) -> &Modal<DetailView> {
        &self.modal
    }

    /// Show `id`. Unknown ids leave the modal untouched.
    pub fn open(&mut self, catalog: &Catalog, id: u32) -> bool {
        let Some(record) = catalog.lookup(id) else {
            debug!(id, "Detail requested for unknown game");
            return false;
        };
        self.modal.show(DetailView::from_record(record));
        true
    }

    /// See [`Modal::close`].
    pub fn close(&mut self, now: Instant) -> bool {
        self.modal.close(now)
    }

    /// See [`Modal::poll`].
    pub fn poll(&mut self, now: Instant) -> bool {
        self.modal.poll(now)
    }

    /// See [`Modal::click`].
    pub fn click(&mut self, hit: ModalHit, now: Instant) -> bool {
        self.modal.click(hit, now)
    }

    /// Trigger the primary action: close this modal and hand back the title
    /// the wiki modal should open with.
    pub fn primary_action(&mut self, now: Instant) -> Option<String> {
        if !self.modal.is_visible() {
            return None;
        }
        let title = self.modal.content()?.action_title.clone();
        self.modal.close(now);
        Some(title)
    }
}

/// Placeholder wiki overlay.
#[derive(Debug, Clone)]
pub struct WikiModal {
    modal: Modal<WikiView>,
}

impl WikiModal {
    /// New closed wiki modal.
    pub fn new(transition: Duration) -> Self {
        Self {
            modal: Modal::new("wiki", transition),
        }
    }

    /// Underlying state machine.
    pub fn modal(&self) -> &Modal<WikiView> {
        &self.modal
    }

    /// Show the wiki header for `title`.
    pub fn open(&mut self, title: &str) {
        self.modal.show(WikiView::for_title(title));
    }

    /// See [`Modal::close`].
    pub fn close(&mut self, now: Instant) -> bool {
        self.modal.close(now)
    }

    /// See [`Modal::poll`].
    pub fn poll(&mut self, now: Instant) -> bool {
        self.modal.poll(now)
    }

    /// See [`Modal::click`].
    pub fn click(&mut self, hit: ModalHit, now: Instant) -> bool {
        self.modal.click(hit, now)
    }
}
