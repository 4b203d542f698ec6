#![warn(clippy::all, missing_docs)]

//! Core domain logic for the showcase catalog browser.
//!
//! This crate hosts the game catalog, the view models derived from it,
//! the modal state machines and the bootstrap contract used by the
//! terminal UI and any future frontends.

pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod modal;
pub mod models;
pub mod render;
pub mod surface;
pub mod view;

pub use bootstrap::{bootstrap, BootstrapError, Overlay, Showcase};
pub use catalog::{Catalog, CatalogError, CatalogSource};
pub use config::AppConfig;
pub use modal::{DetailModal, Modal, ModalHit, ModalState, WikiModal};
pub use models::{AccentColor, GameRecord};
pub use render::{ListRenderer, ListView};
pub use surface::{ElementId, Surface};
