//! # HyperSockets Traits
//!
//! Core traits and types shared by the client:
//!
//! - **MessageRouter**: Parse raw frames and pick a route key
//! - **MessageHandler**: Consume routed messages on a dedicated thread

pub mod error;
pub mod parser;
pub mod router;

// Re-export commonly used types
pub use error::{HyperSocketError, Result};
pub use parser::WsMessage;
pub use router::{MessageHandler, MessageRouter};
