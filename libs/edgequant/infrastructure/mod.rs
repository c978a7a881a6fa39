//! Infrastructure Layer
//!
//! Configuration, logging and the backend clients (REST and live feed).
//! This layer depends on the domain layer but not on the application layer.

pub mod client;
pub mod config;
pub mod logging;

pub use client::{BackendClient, BackendError, FeedMessage, FeedSink, LiveFeed};
pub use config::{ConfigError, DashboardConfig};
pub use logging::{init_tracing, init_tracing_to_file};
