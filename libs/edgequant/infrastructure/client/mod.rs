//! Clients for the EdgeQuant backend

pub mod backend;
pub mod feed;

pub use backend::{BackendClient, BackendError};
pub use feed::{FeedMessage, FeedSink, LiveFeed};
