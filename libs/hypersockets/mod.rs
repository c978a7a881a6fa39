//! # HyperSockets
//!
//! A small, modular WebSocket client built around typed message routing.
//!
//! ## Features
//!
//! - **Type-state builder**: URL and router must be set before `build()` compiles
//! - **Ordered parsing**: Frames are parsed on the I/O task in arrival order
//! - **Per-route handler threads**: Each route key gets a dedicated OS thread fed by
//!   an unbounded crossbeam channel, so same-type messages keep their order
//! - **One socket per client**: The I/O task exits when its connection ends;
//!   a new session builds a new client
//! - **Atomic state**: Connection state and counters readable from any thread

pub mod traits;
pub mod core;

// Re-export all traits
pub use traits::*;

// Re-export core client functionality
pub use core::{
    builder, client, config, connection_state,
    builder::{states, RoutingBuilder, WebSocketClientBuilder},
    client::{ClientEvent, Metrics, WebSocketClient},
    config::ClientConfig,
    connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState},
};

/// Type alias for Result with HyperSocketError
pub type Result<T> = std::result::Result<T, traits::HyperSocketError>;
