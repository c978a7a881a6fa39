//! Message Routing System
//!
//! Routers turn raw frames into typed messages and pick a route key for each.
//! Every route key owns one handler thread.
//!
//! ```text
//! WebSocket → Router::parse → Router::route_key → Channel → Handler Thread
//!                                   ↓
//!                             KeyA Channel → KeyA Handler (sequential)
//!                             KeyB Channel → KeyB Handler (sequential)
//! ```
//!
//! Frames are parsed on the I/O task in the order they arrive, so messages
//! sharing a route key reach their handler in wire order. Different keys are
//! processed in parallel.

use crate::{Result, WsMessage};
use async_trait::async_trait;
use std::fmt::Debug;
use std::hash::Hash;

/// Message router that parses WebSocket messages and determines routing
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Route {
///     Trades,
///     Book,
/// }
///
/// struct ExchangeRouter;
///
/// #[async_trait]
/// impl MessageRouter for ExchangeRouter {
///     type Message = ExchangeMessage;
///     type RouteKey = Route;
///
///     async fn parse(&self, message: WsMessage) -> Result<Self::Message> {
///         // Parse JSON and return typed message
///     }
///
///     fn route_key(&self, message: &Self::Message) -> Self::RouteKey {
///         match message {
///             ExchangeMessage::Trade { .. } => Route::Trades,
///             ExchangeMessage::Book { .. } => Route::Book,
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait MessageRouter: Send + Sync + 'static {
    /// The parsed message type
    type Message: Send + Debug + 'static;

    /// The route key type (determines which handler processes the message)
    type RouteKey: Hash + Eq + Clone + Send + Sync + Debug + 'static;

    /// Parse a raw WebSocket message into a typed message
    ///
    /// An `Err` is logged by the client and the frame is dropped; the
    /// connection stays open.
    async fn parse(&self, message: WsMessage) -> Result<Self::Message>;

    /// Extract the route key from a parsed message
    ///
    /// Messages whose key has no registered handler are dropped.
    fn route_key(&self, message: &Self::Message) -> Self::RouteKey;
}

/// Message handler that processes typed messages sequentially
///
/// Runs on a dedicated OS thread, not in an async context. Errors are logged
/// and the thread keeps processing subsequent messages.
pub trait MessageHandler<M>: Send + 'static
where
    M: Send + Debug + 'static,
{
    /// Handle a parsed message
    fn handle(&mut self, message: M) -> Result<()>;
}
