/// A data frame received from the socket.
///
/// Control frames (ping/pong/close) are handled by the transport and never
/// reach routers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WsMessage {
    Text(String),
    Binary(Vec<u8>),
}

impl WsMessage {
    /// Get the message as text, if it is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            WsMessage::Text(s) => Some(s),
            WsMessage::Binary(_) => None,
        }
    }

    /// Text payload, or the binary payload decoded as UTF-8 when valid
    pub fn text_payload(&self) -> Option<&str> {
        match self {
            WsMessage::Text(s) => Some(s),
            WsMessage::Binary(b) => std::str::from_utf8(b).ok(),
        }
    }
}

impl From<&str> for WsMessage {
    fn from(text: &str) -> Self {
        WsMessage::Text(text.to_string())
    }
}
