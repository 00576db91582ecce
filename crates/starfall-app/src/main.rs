use std::path::PathBuf;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use starfall_app::config::AppConfig;
use starfall_app::headless;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(&PathBuf::from(path))?,
        None => AppConfig::default(),
    };

    info!("STARFALL starting");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    headless::run(config)?;

    info!("STARFALL shutdown complete");
    Ok(())
}
