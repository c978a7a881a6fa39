//! Common test utilities for HyperSockets integration tests
//!
//! Provides a scripted mock WebSocket server that counts how many sockets
//! were opened and closed.

#![allow(dead_code)]

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

/// What the server does after sending its script on a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterScript {
    /// Keep the socket open until the client closes it
    StayOpen,
    /// Send a close frame right away
    Close,
}

/// A mock WebSocket server that pushes a fixed list of text frames to every
/// client that connects
pub struct MockWsServer {
    pub addr: SocketAddr,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
}

impl MockWsServer {
    /// Start a server that sends `frames` to each client, then keeps it open
    pub async fn start(frames: Vec<String>) -> Self {
        Self::start_with(frames, AfterScript::StayOpen).await
    }

    pub async fn start_with(frames: Vec<String>, after: AfterScript) -> Self {
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
                                Self::handle_connection(stream, frames, after, opened, closed, shutdown).await;
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
        after: AfterScript,
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

        if after == AfterScript::Close {
            let _ = write.send(Message::Close(None)).await;
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

    /// Get the WebSocket URL for this server
    pub fn ws_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Poll `condition` every 10ms until it holds or `timeout` elapses
    pub async fn wait_until(&self, timeout: Duration, condition: impl Fn(&Self) -> bool) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if condition(self) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        condition(self)
    }

    /// Shutdown the server
    pub fn shutdown(&self) {
        self.shutdown.notify_waiters();
    }
}

impl Drop for MockWsServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
