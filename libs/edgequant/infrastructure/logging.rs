//! Logging initialization
//!
//! `RUST_LOG` wins over the configured level when set.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize tracing to stdout with the given default level
pub fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .init();
}

/// Initialize tracing to an append-only log file.
///
/// Used while the terminal UI owns stdout.
pub fn init_tracing_to_file(level: &str, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path.as_ref())?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(())
}
