//! EdgeQuant Decision Dashboard - Main Library
//!
//! This crate re-exports the workspace libraries and the helpers shared by
//! the binaries.
//!
//! ## Architecture
//!
//! - **bin_common**: Common utilities for binary executables (CLI, runners)
//! - **edgequant**: Dashboard domain, backend clients and terminal UI (re-exported from workspace)
//! - **hypersockets**: WebSocket library (re-exported from workspace)
//!
//! ## Usage in Binaries
//!
//! ```rust,ignore
//! use edgequant_dashboard::bin_common::{load_config_from_env, parse_cli, ConfigType};
//! use edgequant_dashboard::edgequant::application::dashboard::App;
//! ```

// Re-export workspace libraries for convenience
pub use edgequant;
pub use hypersockets;

// Binary common utilities
pub mod bin_common {
    //! Common utilities for binary executables

    pub mod cli;
    pub mod runner;

    pub use cli::{load_config_from_env, parse_args, parse_cli, CliArgs, ConfigType};
    pub use runner::{interruptible_sleep, BinaryRunner, RunConfig};
}
