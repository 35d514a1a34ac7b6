//! Tracing setup.
//!
//! The TUI owns the terminal, so interactive runs log to a file. Export runs
//! log to stderr. `RUST_LOG` overrides the default filter.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "status_sentinel=info";

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Append log lines to `path`.
pub fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to install log subscriber")
}

/// Log to stderr.
pub fn init_stderr() -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to install log subscriber")
}
