//! Application Layer
//!
//! The dashboard session: state, loaders, key handling and rendering.
//! This layer depends on domain and infrastructure layers.

pub mod dashboard;

pub use dashboard::{App, DashboardState, DataLoader, SharedDashboardState};
