use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use showcase_core::CatalogSource;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::app::AppEvent;

/// Keeps the file watcher alive; dropping it stops reloads.
pub struct CatalogWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl CatalogWatcher {
    /// Watch the source's backing file. Returns `None` for in-memory catalogs.
    pub fn spawn(source: CatalogSource, sender: mpsc::Sender<AppEvent>) -> Result<Option<Self>> {
        let Some(path) = source.path() else {
            return Ok(None);
        };
        // Editors often replace the file, so watch the directory and filter.
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();
        let file_name = path.file_name().map(|name| name.to_os_string());

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    error!(?err, "Catalog watcher error");
                    return;
                }
            };
            if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                return;
            }
            let touches_catalog = event
                .paths
                .iter()
                .any(|changed| changed.file_name().map(|n| n.to_os_string()) == file_name);
            if !touches_catalog {
                return;
            }
            debug!(paths = ?event.paths, "Catalog file changed");
            let message = match source.reload() {
                Ok(revision) => AppEvent::CatalogReloaded(revision),
                Err(err) => AppEvent::CatalogFailed(err.to_string()),
            };
            forward(&sender, message);
        })
        .context("failed to create catalog watcher")?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", dir.display()))?;

        Ok(Some(Self {
            _watcher: watcher,
            path,
        }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Hand an event to the UI loop. Returns false once the loop has gone away.
fn forward(sender: &mpsc::Sender<AppEvent>, message: AppEvent) -> bool {
    if sender.blocking_send(message).is_err() {
        debug!("UI loop closed; dropping catalog event");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_reaches_open_loop() {
        let (sender, mut receiver) = mpsc::channel(1);
        assert!(forward(&sender, AppEvent::CatalogReloaded(2)));
        assert!(matches!(receiver.try_recv(), Ok(AppEvent::CatalogReloaded(2))));
    }

    #[test]
    fn forward_to_closed_loop_is_dropped() {
        let (sender, receiver) = mpsc::channel(1);
        drop(receiver);
        assert!(!forward(&sender, AppEvent::CatalogFailed("gone".into())));
    }
}
