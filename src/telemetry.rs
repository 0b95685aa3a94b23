//! Log setup. The terminal belongs to the game, so logs go to a file.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::cli::Config;

pub fn init_telemetry(config: &Config) -> Result<()> {
    let filter = match config.log_level.as_deref() {
        Some(level) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log filter '{level}'"))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("could not open log file {}", config.log_file.display()))?;

    let fmt_layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("logging already initialised")?;
    Ok(())
}
