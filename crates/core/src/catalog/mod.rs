//! The static, ordered game catalog.

use std::{collections::HashSet, fs, io, path::Path, path::PathBuf};

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::debug;

use crate::models::{AccentColor, GameRecord};

/// Shared, reloadable handle to a catalog.
pub mod source;

pub use source::CatalogSource;

/// Errors raised while building or loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two records share the same id.
    #[error("duplicate game id {0}")]
    DuplicateId(u32),
    /// A colour value could not be parsed.
    #[error("invalid colour {0:?}")]
    InvalidColor(String),
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The catalog file is not a JSON array of records.
    #[error("failed to parse catalog {path}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

static BUILTIN: Lazy<Vec<GameRecord>> = Lazy::new(|| {
    vec![GameRecord {
        id: 1,
        title: "PETS".to_string(),
        release: "Launch Q2 December 2025".to_string(),
        description: "A heartwarming and engaging life simulation game where you adopt, \
            train, and compete with virtual pets exclusively on the Roblox platform. From \
            fluffy dogs to exotic parrots, build an unforgettable bond and become the top \
            pet owner in the metaverse!"
            .to_string(),
        platforms: vec!["Roblox".to_string()],
        tags: ["Roblox", "Simulation", "Life Sim", "Casual", "Virtual Pet"]
            .into_iter()
            .map(String::from)
            .collect(),
        color: AccentColor::new(0x1e, 0x40, 0xaf),
    }]
});

/// Immutable ordered sequence of [`GameRecord`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    games: Vec<GameRecord>,
}

impl Catalog {
    /// The catalog shipped with the binary.
    pub fn builtin() -> Self {
        Self {
            games: BUILTIN.clone(),
        }
    }

    /// Build a catalog, rejecting duplicate ids.
    pub fn from_records(games: Vec<GameRecord>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(games.len());
        for game in &games {
            if !seen.insert(game.id) {
                return Err(CatalogError::DuplicateId(game.id));
            }
        }
        Ok(Self { games })
    }

    /// Read a JSON array of records from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let games: Vec<GameRecord> =
            serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), total = games.len(), "Catalog file parsed");
        Self::from_records(games)
    }

    /// All records, in catalog order.
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    /// Find a record by id.
    pub fn lookup(&self, id: u32) -> Option<&GameRecord> {
        self.games.iter().find(|game| game.id == id)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
