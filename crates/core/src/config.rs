//! Application configuration.
//!
//! Values are layered: built-in defaults, then `config.toml` under the user's
//! config directory, then `SHOWCASE_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR: &str = "showcase";
/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "SHOWCASE";

const DEFAULT_CONFIG: &str = r#"# Showcase configuration

# JSON file with an array of game records. Uses the built-in catalog when unset.
# catalog_path = "/path/to/games.json"

# Length of the modal close transition in milliseconds.
transition_ms = 300

# Input poll interval in milliseconds.
tick_ms = 250

# Reload the catalog file when it changes on disk.
watch_catalog = true
"#;

/// Errors raised while resolving or loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory could be determined.
    #[error("could not determine the user config directory")]
    NoConfigDir,
    /// Reading or merging configuration sources failed.
    #[error("failed to load configuration")]
    Load(#[from] config::ConfigError),
    /// Writing the default configuration failed.
    #[error("failed to write default configuration to {path}")]
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Optional catalog file replacing the built-in data.
    pub catalog_path: Option<PathBuf>,
    /// Close transition length in milliseconds.
    pub transition_ms: u64,
    /// Input poll interval in milliseconds.
    pub tick_ms: u64,
    /// Watch `catalog_path` for changes.
    pub watch_catalog: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            transition_ms: 300,
            tick_ms: 250,
            watch_catalog: true,
        }
    }
}

impl AppConfig {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(config_path()?)
    }

    /// Load from `path` (optional) layered with environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        let loaded: AppConfig = config.try_deserialize()?;
        info!(path = %path.display(), ?loaded, "Configuration loaded");
        Ok(loaded)
    }

    /// Close transition as a [`Duration`].
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Input poll interval as a [`Duration`]. Never zero.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Default path of `config.toml`.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR).join("config.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Write the default configuration if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf, ConfigError> {
    let path = config_path()?;
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Write the default configuration to `path` unless the file exists.
pub fn ensure_default_config_at(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Ok(());
    }
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, DEFAULT_CONFIG).map_err(write_err)?;
    info!(path = %path.display(), "Default configuration written");
    Ok(())
}
