//! EdgeQuant Decision Dashboard
//!
//! Instrument metrics, live trade decisions and ZeroHero suggestions from the
//! EdgeQuant backend, rendered in the terminal.

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used items
pub use application::{App, DashboardState, DataLoader, SharedDashboardState};
pub use domain::{Instrument, Metrics, TradeDecision, ZeroHeroSuggestion};
pub use infrastructure::{
    init_tracing, init_tracing_to_file, BackendClient, BackendError, ConfigError, DashboardConfig, LiveFeed,
};
