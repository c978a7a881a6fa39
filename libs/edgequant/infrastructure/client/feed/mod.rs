//! EdgeQuant live feed
//!
//! Parses `tick`, `decision` and `zerohero` frames and hands them to a
//! [`FeedSink`] on per-type handler threads.
//!
//! # Usage
//!
//! ```rust,ignore
//! let feed = LiveFeed::connect(&config.websocket_url(), state.clone()).await?;
//!
//! // In the UI loop
//! for event in feed.poll_events() { /* update status */ }
//!
//! // On teardown
//! feed.shutdown().await?;
//! ```

mod types;
mod websocket;

pub use types::{parse_frame, FeedMessage, FeedRoute};
pub use websocket::{
    log_client_event, DecisionHandler, FeedRouter, FeedSink, LiveFeed, TickHandler, ZeroHeroHandler,
};
