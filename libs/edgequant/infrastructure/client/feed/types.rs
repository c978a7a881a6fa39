//! Live feed message types
//!
//! Every frame is a JSON object discriminated by `type`:
//!
//! ```json
//! {"type": "tick", "price": 24012.5}
//! {"type": "decision", "decision": {"id": "d1", "symbol": "NIFTY", "entry": 120}}
//! {"type": "zerohero", "suggestions": [{"id": "z1", "symbol": "BANKNIFTY", "prob": 0.42}]}
//! ```

use crate::domain::{TradeDecision, ZeroHeroSuggestion};
use hypersockets::HyperSocketError;
use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// FeedRoute - Handler routing keys
// =============================================================================

/// Route keys, one handler thread per key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedRoute {
    Tick,
    Decision,
    ZeroHero,
    /// Unrecognized frame types; no handler is registered for this key
    Ignored,
}

// =============================================================================
// FeedMessage - Parsed frames
// =============================================================================

/// A parsed live feed frame
#[derive(Debug, Clone, PartialEq)]
pub enum FeedMessage {
    /// New last price. `None` when the frame carried no price.
    Tick { price: Option<Value> },
    Decision(TradeDecision),
    /// Full replacement list of suggestions
    ZeroHero(Vec<ZeroHeroSuggestion>),
    /// Frame with an unknown or missing `type`
    Ignored(String),
}

impl FeedMessage {
    pub fn route(&self) -> FeedRoute {
        match self {
            FeedMessage::Tick { .. } => FeedRoute::Tick,
            FeedMessage::Decision(_) => FeedRoute::Decision,
            FeedMessage::ZeroHero(_) => FeedRoute::ZeroHero,
            FeedMessage::Ignored(_) => FeedRoute::Ignored,
        }
    }
}

/// Envelope shared by every frame type
#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(default)]
    price: Option<Value>,
    #[serde(default)]
    decision: Option<Value>,
    #[serde(default)]
    suggestions: Option<Value>,
}

/// Parse one text frame
///
/// Fails on invalid JSON, on a frame that is not an object, and on a known
/// frame type whose payload does not match.
pub fn parse_frame(text: &str) -> Result<FeedMessage, HyperSocketError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(HyperSocketError::ParseError(format!(
            "frame is not a JSON object: {}",
            truncate(text)
        )));
    }

    let frame: RawFrame = serde_json::from_value(value)?;
    let kind = frame.kind.as_ref().and_then(Value::as_str).unwrap_or_default();

    match kind {
        "tick" => Ok(FeedMessage::Tick { price: frame.price }),
        "decision" => {
            let decision = frame
                .decision
                .ok_or_else(|| HyperSocketError::ParseError("decision frame without decision".to_string()))?;
            let decision: TradeDecision = serde_json::from_value(decision)?;
            Ok(FeedMessage::Decision(decision))
        }
        "zerohero" => {
            let suggestions = match frame.suggestions {
                None => Vec::new(),
                Some(list) => serde_json::from_value(list)?,
            };
            Ok(FeedMessage::ZeroHero(suggestions))
        }
        other => Ok(FeedMessage::Ignored(other.to_string())),
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= 80 {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(77).collect::<String>())
    }
}
