//! Structured logging setup for the `occupancy` binary.

use std::env;
use std::io;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive for this tool.
pub const LOG_ENV: &str = "OCCUPANCY_LOG";

/// Install a stderr `fmt` subscriber. Stdout stays reserved for command output.
pub fn init_logging() -> Result<()> {
    let filter = build_filter()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logging subscriber: {e}"))
}

/// `OCCUPANCY_LOG` wins over `RUST_LOG`; with neither set only warnings show.
fn build_filter() -> Result<EnvFilter> {
    if let Ok(spec) = env::var(LOG_ENV) {
        if !spec.trim().is_empty() {
            return EnvFilter::try_new(&spec)
                .with_context(|| format!("invalid {LOG_ENV} filter: {spec}"));
        }
    }

    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new("warn").context("invalid default log filter"),
    }
}
