use crate::traits::*;
use std::collections::HashMap;

/// Configuration for a running [`WebSocketClient`](crate::client::WebSocketClient)
///
/// Produced by the type-state builder; shared with the I/O task behind an
/// `Arc`. Dropping the last reference closes every handler channel.
pub struct ClientConfig<R>
where
    R: MessageRouter,
{
    /// WebSocket URL (wss:// or ws://)
    pub(crate) url: String,

    /// Message router for parsing and routing messages
    pub(crate) router: R,

    /// Channel senders mapped by route key
    pub(crate) route_senders: HashMap<R::RouteKey, crossbeam_channel::Sender<R::Message>>,
}

impl<R> ClientConfig<R>
where
    R: MessageRouter,
{
    /// Get a reference to the URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the number of configured handlers
    pub fn handler_count(&self) -> usize {
        self.route_senders.len()
    }
}
