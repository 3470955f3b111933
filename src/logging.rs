//! Tracing subscriber setup
//!
//! `RUST_LOG` wins over the configured level when it is set.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };

    installed.map_err(|err| anyhow!("Failed to install tracing subscriber: {err}"))
}
