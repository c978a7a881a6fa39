//! Lock-free connection state and counters shared between the I/O task and
//! readers on other threads.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Connection lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Disconnected = 0,
    Connecting = 1,
    Connected = 2,
    ShuttingDown = 3,
}

impl ConnectionState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            3 => ConnectionState::ShuttingDown,
            _ => ConnectionState::Disconnected,
        }
    }

    /// Short label for status displays
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::Connected => "Connected",
            ConnectionState::ShuttingDown => "Shutting down",
        }
    }
}

/// Atomic wrapper around [`ConnectionState`]
#[derive(Debug)]
pub struct AtomicConnectionState(AtomicU8);

impl AtomicConnectionState {
    pub fn new(state: ConnectionState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    #[inline]
    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.0.load(Ordering::Acquire))
    }

    #[inline]
    pub fn set(&self, state: ConnectionState) {
        self.0.store(state as u8, Ordering::Release);
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        self.get() == ConnectionState::Connected
    }

    #[inline]
    pub fn is_connecting(&self) -> bool {
        self.get() == ConnectionState::Connecting
    }

    #[inline]
    pub fn is_disconnected(&self) -> bool {
        self.get() == ConnectionState::Disconnected
    }

    #[inline]
    pub fn is_shutting_down(&self) -> bool {
        self.get() == ConnectionState::ShuttingDown
    }
}

/// Monotonic counters for a client
#[derive(Debug, Default)]
pub struct AtomicMetrics {
    messages_received: AtomicU64,
    parse_errors: AtomicU64,
}

impl AtomicMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn increment_received(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_parse_errors(&self) {
        self.parse_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn messages_received(&self) -> u64 {
        self.messages_received.load(Ordering::Relaxed)
    }

    pub fn parse_errors(&self) -> u64 {
        self.parse_errors.load(Ordering::Relaxed)
    }
}
