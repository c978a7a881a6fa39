//! Live feed WebSocket client
//!
//! One connection per dashboard session, no reconnection. Frames are parsed
//! in arrival order and each frame type is applied by its own handler thread.

use super::types::{parse_frame, FeedMessage, FeedRoute};
use crate::domain::{TradeDecision, ZeroHeroSuggestion};
use hypersockets::core::*;
use hypersockets::{MessageHandler, MessageRouter, WsMessage};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

// =============================================================================
// FeedSink - Where parsed updates land
// =============================================================================

/// Receiver of live feed updates
///
/// Called from handler threads; implementations must be cheap and must not
/// block on the UI.
pub trait FeedSink: Send + Sync + 'static {
    /// Merge a tick price into the current metrics
    fn on_tick(&self, price: Option<Value>);

    /// Prepend a trade decision
    fn on_decision(&self, decision: TradeDecision);

    /// Replace the ZeroHero suggestion list
    fn on_suggestions(&self, suggestions: Vec<ZeroHeroSuggestion>);
}

// =============================================================================
// Router - Parses WebSocket messages
// =============================================================================

/// Router for live feed frames
pub struct FeedRouter;

impl FeedRouter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FeedRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl MessageRouter for FeedRouter {
    type Message = FeedMessage;
    type RouteKey = FeedRoute;

    async fn parse(&self, message: WsMessage) -> hypersockets::Result<Self::Message> {
        let text = message.text_payload().ok_or_else(|| {
            hypersockets::HyperSocketError::ParseError("binary frame is not valid UTF-8".to_string())
        })?;

        let parsed = parse_frame(text)?;
        if let FeedMessage::Ignored(kind) = &parsed {
            debug!("[Feed WS] Ignoring frame type '{}'", kind);
        }
        Ok(parsed)
    }

    fn route_key(&self, message: &Self::Message) -> Self::RouteKey {
        message.route()
    }
}

// =============================================================================
// Handlers - Apply updates to the sink
// =============================================================================

/// Applies `tick` frames
pub struct TickHandler<S: FeedSink> {
    sink: Arc<S>,
    message_count: u64,
}

impl<S: FeedSink> TickHandler<S> {
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink, message_count: 0 }
    }
}

impl<S: FeedSink> MessageHandler<FeedMessage> for TickHandler<S> {
    fn handle(&mut self, message: FeedMessage) -> hypersockets::Result<()> {
        if let FeedMessage::Tick { price } = message {
            self.message_count += 1;
            if self.message_count % 1000 == 0 {
                debug!("[Feed WS] {} ticks applied", self.message_count);
            }
            self.sink.on_tick(price);
        }
        Ok(())
    }
}

/// Applies `decision` frames
pub struct DecisionHandler<S: FeedSink> {
    sink: Arc<S>,
}

impl<S: FeedSink> DecisionHandler<S> {
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }
}

impl<S: FeedSink> MessageHandler<FeedMessage> for DecisionHandler<S> {
    fn handle(&mut self, message: FeedMessage) -> hypersockets::Result<()> {
        if let FeedMessage::Decision(decision) = message {
            info!(
                "[Feed WS] Decision {} for {}",
                decision.key().unwrap_or("-"),
                decision.symbol.as_deref().unwrap_or("-")
            );
            self.sink.on_decision(decision);
        }
        Ok(())
    }
}

/// Applies `zerohero` frames
pub struct ZeroHeroHandler<S: FeedSink> {
    sink: Arc<S>,
}

impl<S: FeedSink> ZeroHeroHandler<S> {
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }
}

impl<S: FeedSink> MessageHandler<FeedMessage> for ZeroHeroHandler<S> {
    fn handle(&mut self, message: FeedMessage) -> hypersockets::Result<()> {
        if let FeedMessage::ZeroHero(suggestions) = message {
            info!("[Feed WS] {} ZeroHero suggestions received", suggestions.len());
            self.sink.on_suggestions(suggestions);
        }
        Ok(())
    }
}

// =============================================================================
// LiveFeed - Session-scoped connection
// =============================================================================

/// Log a WebSocket client event. Returns false once the connection is gone.
pub fn log_client_event(event: &ClientEvent) -> bool {
    match event {
        ClientEvent::Connected => {
            info!("[Feed WS] Connected to live feed");
            true
        }
        ClientEvent::Disconnected => {
            warn!("[Feed WS] Live feed closed");
            false
        }
        ClientEvent::Error(err) => {
            error!("[Feed WS] Error: {}", err);
            true
        }
    }
}

/// The dashboard's live feed connection
pub struct LiveFeed {
    client: WebSocketClient<FeedRouter>,
}

impl LiveFeed {
    /// Open the session's single connection to `url`
    pub async fn connect<S: FeedSink>(url: &str, sink: Arc<S>) -> hypersockets::Result<Self> {
        info!("[Feed WS] Connecting to {}", url);

        let client = WebSocketClientBuilder::new()
            .url(url)
            .router(FeedRouter::new(), move |routing| {
                routing
                    .handler(FeedRoute::Tick, TickHandler::new(Arc::clone(&sink)))
                    .handler(FeedRoute::Decision, DecisionHandler::new(Arc::clone(&sink)))
                    .handler(FeedRoute::ZeroHero, ZeroHeroHandler::new(sink))
            })
            .build()
            .await?;

        Ok(Self { client })
    }

    pub fn url(&self) -> &str {
        self.client.url()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.client.connection_state()
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    /// Frame and error counters
    pub fn stats(&self) -> Metrics {
        self.client.metrics()
    }

    /// Drain and log pending client events
    pub fn poll_events(&self) -> Vec<ClientEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.client.try_recv_event() {
            log_client_event(&event);
            events.push(event);
        }
        events
    }

    /// Close the socket and join the handler threads
    pub async fn shutdown(self) -> hypersockets::Result<()> {
        info!("[Feed WS] Closing connection");
        self.client.shutdown().await
    }
}
