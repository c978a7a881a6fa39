//! Client core: builder, configuration, connection state and the I/O task.
//!
//! ## Example
//!
//! ```rust,ignore
//! let client = hypersockets::core::builder()
//!     .url("wss://api.example.com/ws")
//!     .router(MyRouter, |routing| {
//!         routing
//!             .handler(Route::Trades, TradeHandler::new())
//!             .handler(Route::Book, BookHandler::new())
//!     })
//!     .build()
//!     .await?;
//!
//! while let Some(event) = client.try_recv_event() {
//!     println!("Event: {:?}", event);
//! }
//!
//! client.shutdown().await?;
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod connection_state;

// Re-export main types
pub use builder::{states, RoutingBuilder, WebSocketClientBuilder};
pub use client::{ClientEvent, Metrics, WebSocketClient};
pub use config::ClientConfig;
pub use connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};

// Re-export traits for convenience
pub use crate::traits::*;

/// Create a new WebSocket client builder
pub fn builder() -> WebSocketClientBuilder<builder::states::NoUrl, builder::states::NoRouter> {
    WebSocketClientBuilder::new()
}
