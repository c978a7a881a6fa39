use crate::config::ClientConfig;
use crate::connection_state::{AtomicConnectionState, AtomicMetrics, ConnectionState};
use crate::traits::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::watch;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info, warn};

type WsStream = tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Events emitted by the I/O task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// Connected to the server
    Connected,
    /// Disconnected from the server
    Disconnected,
    /// Error occurred
    Error(String),
}

/// Client metrics snapshot
#[derive(Debug, Clone)]
pub struct Metrics {
    pub messages_received: u64,
    pub parse_errors: u64,
    pub connection_state: ConnectionState,
}

/// WebSocket client with typed message routing
///
/// One tokio task owns the socket; parsed messages are routed to handler
/// threads. Dropping the client signals shutdown, `shutdown()` additionally
/// waits for the socket to close and the handlers to drain.
pub struct WebSocketClient<R>
where
    R: MessageRouter,
{
    url: String,
    /// Held so handler channels stay open until shutdown completes
    config: Option<Arc<ClientConfig<R>>>,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    shutdown_tx: watch::Sender<bool>,
    event_rx: Receiver<ClientEvent>,
    task_handle: Option<tokio::task::JoinHandle<()>>,
    handler_handles: Vec<JoinHandle<()>>,
}

impl<R> WebSocketClient<R>
where
    R: MessageRouter,
{
    /// Spawn the I/O task. Called by the builder.
    pub(crate) fn new(config: ClientConfig<R>, handler_handles: Vec<JoinHandle<()>>) -> Self {
        let config = Arc::new(config);
        let url = config.url.clone();
        let state = Arc::new(AtomicConnectionState::new(ConnectionState::Disconnected));
        let metrics = Arc::new(AtomicMetrics::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, event_rx) = unbounded();

        let task_handle = {
            let config = Arc::clone(&config);
            let state = Arc::clone(&state);
            let metrics = Arc::clone(&metrics);

            tokio::spawn(async move {
                run_client(config, state, metrics, shutdown_rx, event_tx).await;
            })
        };

        Self {
            url,
            config: Some(config),
            state,
            metrics,
            shutdown_tx,
            event_rx,
            task_handle: Some(task_handle),
            handler_handles,
        }
    }

    /// URL this client connects to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get current connection state
    #[inline]
    pub fn connection_state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Check if connected
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// Get current metrics
    pub fn metrics(&self) -> Metrics {
        Metrics {
            messages_received: self.metrics.messages_received(),
            parse_errors: self.metrics.parse_errors(),
            connection_state: self.state.get(),
        }
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv_event(&self) -> Option<ClientEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Receive an event, waiting at most `timeout`
    pub fn recv_event_timeout(&self, timeout: Duration) -> Option<ClientEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Close the socket, stop the I/O task and join every handler thread
    pub async fn shutdown(mut self) -> Result<()> {
        info!("Shutting down WebSocket client for {}", self.url);

        self.state.set(ConnectionState::ShuttingDown);
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.task_handle.take() {
            if let Err(e) = handle.await {
                warn!("WebSocket I/O task ended abnormally: {}", e);
            }
        }

        // Last reference to the route senders: handler channels close here
        drop(self.config.take());

        let handles = std::mem::take(&mut self.handler_handles);
        debug!("Waiting for {} handler threads to complete", handles.len());
        tokio::task::spawn_blocking(move || {
            for handle in handles {
                let _ = handle.join();
            }
        })
        .await
        .map_err(|e| HyperSocketError::Handler(format!("Failed to join handler threads: {}", e)))?;

        self.state.set(ConnectionState::Disconnected);
        info!("All handlers shut down successfully");
        Ok(())
    }
}

impl<R> Drop for WebSocketClient<R>
where
    R: MessageRouter,
{
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Resolves once shutdown has been requested (or the client is gone)
async fn shutdown_requested(rx: &mut watch::Receiver<bool>) {
    while !*rx.borrow() {
        if rx.changed().await.is_err() {
            return;
        }
    }
}

/// Main client task: open the socket once and read it until it ends.
///
/// The task does not reconnect; a closed connection leaves the client
/// `Disconnected` for good.
async fn run_client<R>(
    config: Arc<ClientConfig<R>>,
    state: Arc<AtomicConnectionState>,
    metrics: Arc<AtomicMetrics>,
    mut shutdown_rx: watch::Receiver<bool>,
    event_tx: Sender<ClientEvent>,
) where
    R: MessageRouter,
{
    if *shutdown_rx.borrow() {
        debug!("Shutdown requested before connecting");
        return;
    }

    state.set(ConnectionState::Connecting);

    let connection_result = tokio::select! {
        result = connect_async(config.url.as_str()) => result,
        _ = shutdown_requested(&mut shutdown_rx) => {
            debug!("Shutdown requested while connecting");
            return;
        }
    };

    match connection_result {
        Ok((ws_stream, _)) => {
            info!("Connected to {}", config.url);
            state.set(ConnectionState::Connected);
            let _ = event_tx.send(ClientEvent::Connected);

            if let Err(e) = handle_connection(ws_stream, &config, &metrics, &mut shutdown_rx).await {
                error!("Connection error: {}", e);
                let _ = event_tx.send(ClientEvent::Error(e.to_string()));
            }

            if !state.is_shutting_down() {
                state.set(ConnectionState::Disconnected);
            }
            let _ = event_tx.send(ClientEvent::Disconnected);
        }
        Err(e) => {
            error!("Failed to connect to {}: {}", config.url, e);
            let _ = event_tx.send(ClientEvent::Error(e.to_string()));
            state.set(ConnectionState::Disconnected);
        }
    }

    info!("Client task exiting");
}

/// Read frames until the peer closes, the stream fails or shutdown is requested
async fn handle_connection<R>(
    ws_stream: WsStream,
    config: &ClientConfig<R>,
    metrics: &AtomicMetrics,
    shutdown_rx: &mut watch::Receiver<bool>,
) -> Result<()>
where
    R: MessageRouter,
{
    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Close(frame))) => {
                        info!("Server closed connection: {:?}", frame);
                        return Err(HyperSocketError::ConnectionClosed("Close frame received".into()));
                    }
                    Some(Ok(msg)) => {
                        metrics.increment_received();
                        if let Some(ws_msg) = tungstenite_to_ws_message(msg) {
                            route_message(config, metrics, ws_msg).await;
                        }
                    }
                    Some(Err(e)) => {
                        return Err(HyperSocketError::WebSocket(e.to_string()));
                    }
                    None => {
                        warn!("WebSocket stream closed");
                        return Err(HyperSocketError::ConnectionClosed("Stream ended".into()));
                    }
                }
            }

            _ = shutdown_requested(shutdown_rx) => {
                debug!("Shutdown requested, closing connection");
                if let Err(e) = write.close().await {
                    debug!("Close handshake failed: {}", e);
                }
                return Ok(());
            }
        }
    }
}

/// Parse a frame in place and hand it to the handler registered for its key
async fn route_message<R>(config: &ClientConfig<R>, metrics: &AtomicMetrics, ws_msg: WsMessage)
where
    R: MessageRouter,
{
    match config.router.parse(ws_msg).await {
        Ok(message) => {
            let route_key = config.router.route_key(&message);
            match config.route_senders.get(&route_key) {
                // A closed channel only happens during shutdown
                Some(sender) => {
                    let _ = sender.send(message);
                }
                None => debug!("No handler configured for route key: {:?}", route_key),
            }
        }
        Err(e) => {
            metrics.increment_parse_errors();
            warn!("Parse error: {}", e);
        }
    }
}

/// Convert tungstenite Message to WsMessage
fn tungstenite_to_ws_message(msg: Message) -> Option<WsMessage> {
    match msg {
        Message::Text(text) => Some(WsMessage::Text(text)),
        Message::Binary(data) => Some(WsMessage::Binary(data)),
        Message::Ping(_) | Message::Pong(_) | Message::Close(_) | Message::Frame(_) => None,
    }
}
