use thiserror::Error;

/// Main error type for hypersockets
#[derive(Error, Debug)]
pub enum HyperSocketError {
    /// WebSocket transport error
    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// Connection closed by the peer or the stream ended
    #[error("Connection closed: {0}")]
    ConnectionClosed(String),

    /// Message parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Handler failed to process a routed message
    #[error("Handler error: {0}")]
    Handler(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<serde_json::Error> for HyperSocketError {
    fn from(err: serde_json::Error) -> Self {
        HyperSocketError::ParseError(err.to_string())
    }
}

/// Result type for hypersockets operations
pub type Result<T> = std::result::Result<T, HyperSocketError>;
