//! EdgeQuant Decision Dashboard
//!
//! Terminal UI for instrument metrics, live trade decisions and ZeroHero
//! suggestions. The REST loader and the live feed write into shared state;
//! the UI redraws from it.

pub mod app;
pub mod loader;
pub mod state;
pub mod ui;

pub use app::App;
pub use loader::DataLoader;
pub use state::{DashboardState, SharedDashboardState, MAX_TRADES};
