mod app;
mod layout;
mod watch;

use anyhow::{Context, Result};
use clap::Parser;
use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
};

use showcase_core::{
    config::{self, AppConfig},
    CatalogSource,
};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Browse the studio's game catalog in the terminal.
#[derive(Debug, Parser)]
#[command(name = "showcase", version, about)]
struct Cli {
    /// JSON catalog file to show instead of the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Configuration file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let mut config = match cli.config.as_ref() {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => {
            config::ensure_default_config()?;
            AppConfig::load()?
        }
    };
    if let Some(catalog) = cli.catalog {
        config.catalog_path = Some(catalog);
    }

    let source =
        CatalogSource::open(config.catalog_path.clone()).context("failed to open catalog")?;
    info!(games = source.snapshot().len(), "Starting showcase");
    app::run(source, config).await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("showcase.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the terminal UI, so only the file layer is installed.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(std::sync::Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
