//! Binary runner utilities
//!
//! Provides a standardized way to run non-interactive binaries with startup
//! and shutdown banners and Ctrl+C handling.

use std::time::Duration;
use tracing::info;

/// Configuration for running a binary application
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Name of the binary (for logging)
    pub name: String,
    /// How often to log a status summary, in seconds
    pub status_interval_secs: u64,
    /// How often to poll for events, in milliseconds
    pub poll_interval_ms: u64,
}

impl RunConfig {
    /// Create a new run configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status_interval_secs: 30,
            poll_interval_ms: 250,
        }
    }

    /// Set status summary interval
    pub fn with_status_interval(mut self, secs: u64) -> Self {
        self.status_interval_secs = secs;
        self
    }

    /// Set event poll interval
    pub fn with_poll_interval(mut self, millis: u64) -> Self {
        self.poll_interval_ms = millis;
        self
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.status_interval_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Trait for binary applications
pub trait BinaryRunner {
    /// Run the application main loop
    async fn run(&mut self) -> anyhow::Result<()>;

    /// Get the run configuration
    fn config(&self) -> &RunConfig;

    /// Print startup banner
    fn print_banner(&self) {
        let config = self.config();
        info!("");
        info!("========================================");
        info!("Starting {}", config.name);
        info!("Press Ctrl+C to stop");
        info!("========================================");
        info!("");
    }

    /// Print shutdown banner
    fn print_shutdown(&self, stats: Option<&str>) {
        let config = self.config();
        info!("");
        info!("========================================");
        info!("{} stopped gracefully", config.name);
        if let Some(stats) = stats {
            info!("{}", stats);
        }
        info!("========================================");
    }

    /// Execute the binary with proper initialization and cleanup
    async fn execute(&mut self) -> anyhow::Result<()> {
        self.print_banner();
        let result = self.run().await;
        self.print_shutdown(None);
        result
    }
}

/// Sleep for `duration` unless Ctrl+C arrives first.
///
/// Returns false when interrupted.
pub async fn interruptible_sleep(duration: Duration) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(duration) => true,
        _ = tokio::signal::ctrl_c() => false,
    }
}
