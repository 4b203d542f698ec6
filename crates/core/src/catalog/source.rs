use std::{path::PathBuf, sync::Arc};

use parking_lot::RwLock;
use tracing::{info, warn};

use super::{Catalog, CatalogError};

/// Thread-safe catalog handle shared between the UI and the file watcher.
#[derive(Clone)]
pub struct CatalogSource {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    path: Option<PathBuf>,
    catalog: Catalog,
    revision: u64,
}

impl CatalogSource {
    /// Load from `path` when given, otherwise use the built-in catalog.
    pub fn open(path: Option<PathBuf>) -> Result<Self, CatalogError> {
        let catalog = match path.as_ref() {
            Some(path) => Catalog::load(path)?,
            None => Catalog::builtin(),
        };
        info!(
            path = ?path,
            total = catalog.len(),
            "Catalog opened"
        );
        Ok(Self {
            inner: Arc::new(RwLock::new(Inner {
                path,
                catalog,
                revision: 0,
            })),
        })
    }

    /// Wrap an already built catalog that has no backing file.
    pub fn in_memory(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                path: None,
                catalog,
                revision: 0,
            })),
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<PathBuf> {
        self.inner.read().path.clone()
    }

    /// Snapshot of the current catalog.
    pub fn snapshot(&self) -> Catalog {
        self.inner.read().catalog.clone()
    }

    /// Incremented on every successful reload.
    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    /// Re-read the backing file. On failure the previous catalog stays active.
    pub fn reload(&self) -> Result<u64, CatalogError> {
        let Some(path) = self.path() else {
            return Ok(self.revision());
        };
        match Catalog::load(&path) {
            Ok(catalog) => {
                let mut inner = self.inner.write();
                inner.catalog = catalog;
                inner.revision += 1;
                info!(
                    path = %path.display(),
                    revision = inner.revision,
                    total = inner.catalog.len(),
                    "Catalog reloaded"
                );
                Ok(inner.revision)
            }
            Err(err) => {
                warn!(path = %path.display(), "Catalog reload failed: {err}");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn without_path_uses_builtin() -> Result<()> {
        let source = CatalogSource::open(None)?;
        assert_eq!(source.snapshot(), Catalog::builtin());
        assert_eq!(source.reload()?, 0);
        Ok(())
    }

    #[test]
    fn reload_picks_up_changes_and_keeps_old_on_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("games.json");
        fs::write(&path, r##"[{"id": 1, "title": "One", "color": "#111111"}]"##)?;

        let source = CatalogSource::open(Some(path.clone()))?;
        assert_eq!(source.snapshot().len(), 1);

        fs::write(
            &path,
            r##"[{"id": 1, "title": "One", "color": "#111111"},
                 {"id": 2, "title": "Two", "color": "#222222"}]"##,
        )?;
        assert_eq!(source.reload()?, 1);
        assert_eq!(source.snapshot().len(), 2);

        fs::write(&path, "garbage")?;
        assert!(source.reload().is_err());
        assert_eq!(source.snapshot().len(), 2);
        assert_eq!(source.revision(), 1);
        Ok(())
    }
}
