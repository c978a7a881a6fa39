//! Common test utilities for the dashboard integration tests
//!
//! Provides a scripted WebSocket feed server and an HTTP backend mock.

#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

/// Macro for verbose test output (controlled by TEST_VERBOSE env var)
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if std::env::var("TEST_VERBOSE").is_ok() {
            println!($($arg)*);
        }
    };
}

/// Poll `condition` every 10ms until it holds or `timeout` elapses
pub async fn wait_for<F: Fn() -> bool>(timeout: Duration, condition: F) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

// =============================================================================
// Mock live feed
// =============================================================================

/// A WebSocket server that pushes a fixed list of text frames to every client
/// and keeps the socket open until the client closes it
pub struct MockFeedServer {
    pub addr: SocketAddr,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
}

impl MockFeedServer {
    pub async fn start(frames: Vec<String>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let opened = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicUsize::new(0));
        let shutdown = Arc::new(Notify::new());

        {
            let opened = opened.clone();
            let closed = closed.clone();
            let shutdown = shutdown.clone();
            let frames = Arc::new(frames);

            tokio::spawn(async move {
                loop {
                    tokio::select! {
                        result = listener.accept() => {
                            let Ok((stream, _)) = result else { break };
                            let opened = opened.clone();
                            let closed = closed.clone();
                            let shutdown = shutdown.clone();
                            let frames = frames.clone();
                            tokio::spawn(async move {
                                Self::handle_connection(stream, frames, opened, closed, shutdown).await;
                            });
                        }
                        _ = shutdown.notified() => break,
                    }
                }
            });
        }

        Self {
            addr,
            opened,
            closed,
            shutdown,
        }
    }

    async fn handle_connection(
        stream: tokio::net::TcpStream,
        frames: Arc<Vec<String>>,
        opened: Arc<AtomicUsize>,
        closed: Arc<AtomicUsize>,
        shutdown: Arc<Notify>,
    ) {
        use futures_util::{SinkExt, StreamExt};
        use tokio_tungstenite::tungstenite::Message;

        let Ok(ws_stream) = tokio_tungstenite::accept_async(stream).await else {
            return;
        };
        opened.fetch_add(1, Ordering::SeqCst);

        let (mut write, mut read) = ws_stream.split();

        for frame in frames.iter() {
            if write.send(Message::Text(frame.clone())).await.is_err() {
                closed.fetch_add(1, Ordering::SeqCst);
                return;
            }
        }

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(msg)) if msg.is_close() => break,
                        Some(Ok(_)) => {}
                        Some(Err(_)) | None => break,
                    }
                }
                _ = shutdown.notified() => break,
            }
        }

        closed.fetch_add(1, Ordering::SeqCst);
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Drop for MockFeedServer {
    fn drop(&mut self) {
        self.shutdown.notify_waiters();
    }
}

// =============================================================================
// Mock REST backend
// =============================================================================

/// Canned backend responses
#[derive(Default, Clone)]
pub struct BackendScript {
    /// `None` answers `/api/instruments` with a 500
    pub instruments: Option<Value>,
    /// Snapshot bodies by instrument id; unknown ids get a 404
    pub snapshots: HashMap<String, Value>,
    /// Artificial latency per instrument id
    pub snapshot_delays: HashMap<String, Duration>,
}

struct BackendShared {
    script: BackendScript,
    snapshot_requests: AtomicUsize,
}

/// An HTTP server answering `/api/instruments` and `/api/snapshot`
pub struct MockBackend {
    pub addr: SocketAddr,
    shared: Arc<BackendShared>,
    handle: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub async fn start(script: BackendScript) -> Self {
        let shared = Arc::new(BackendShared {
            script,
            snapshot_requests: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/api/instruments", get(instruments))
            .route("/api/snapshot", get(snapshot))
            .with_state(shared.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, shared, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn snapshot_requests(&self) -> usize {
        self.shared.snapshot_requests.load(Ordering::SeqCst)
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn instruments(State(shared): State<Arc<BackendShared>>) -> Response {
    match &shared.script.instruments {
        Some(body) => Json(body.clone()).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "backend down").into_response(),
    }
}

async fn snapshot(
    State(shared): State<Arc<BackendShared>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    shared.snapshot_requests.fetch_add(1, Ordering::SeqCst);
    let id = params.get("instrument_id").cloned().unwrap_or_default();

    if let Some(delay) = shared.script.snapshot_delays.get(&id) {
        tokio::time::sleep(*delay).await;
    }

    match shared.script.snapshots.get(&id) {
        Some(body) => Json(body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "unknown instrument").into_response(),
    }
}
