//! Backend record types
//!
//! Every record is an opaque payload produced by the EdgeQuant backend. Fields
//! are optional and lenient: numbers may arrive as JSON numbers or numeric
//! strings, ids as strings or numbers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Placeholder rendered for any missing value
pub const PLACEHOLDER: &str = "-";

/// Opaque instrument selection key
pub type InstrumentId = String;

// =============================================================================
// Lenient field helpers
// =============================================================================

/// Render a JSON scalar as display text. `null` yields `None`.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(match n.as_f64() {
            Some(f) => format_number(f),
            None => n.to_string(),
        }),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Read a JSON number or numeric string as f64
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Format a number the way the backend's web client prints it:
/// integral values drop the fractional part.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Format optional text, falling back to the placeholder
pub fn display_text(value: Option<&str>) -> String {
    value.map(str::to_string).unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn de_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_text))
}

fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

fn de_id<'de, D>(deserializer: D) -> Result<InstrumentId, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "instrument id must be a string or number, got {}",
            other
        ))),
    }
}

// =============================================================================
// Instrument
// =============================================================================

/// A tradable instrument as listed by `GET /api/instruments`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    #[serde(deserialize_with = "de_id")]
    pub id: InstrumentId,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub exchange: Option<String>,
}

impl Instrument {
    pub fn new(id: impl Into<String>, symbol: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            symbol: Some(symbol.into()),
            exchange: Some(exchange.into()),
        }
    }

    /// Symbol for display, placeholder if missing
    pub fn symbol_or_placeholder(&self) -> String {
        display_text(self.symbol.as_deref())
    }

    /// Selector label: `symbol · exchange`
    pub fn label(&self) -> String {
        format!(
            "{} · {}",
            self.symbol.as_deref().unwrap_or(""),
            self.exchange.as_deref().unwrap_or("")
        )
    }
}

// =============================================================================
// Metrics
// =============================================================================

/// Well-known snapshot fields
pub mod fields {
    pub const LAST_PRICE: &str = "last_price";
    pub const OI: &str = "oi";
    pub const PCR: &str = "pcr";
    pub const VOLUME: &str = "volume";
    pub const VWAP: &str = "vwap";
    pub const DELTA: &str = "delta";
    pub const GAMMA: &str = "gamma";
    pub const OI_CHANGE: &str = "oi_change";
}

/// Free-form metrics for the selected instrument
///
/// A snapshot replaces the whole map; a tick only touches `last_price`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    values: Map<String, Value>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a snapshot body. `null` yields empty metrics.
    pub fn from_snapshot(body: Value) -> Option<Self> {
        match body {
            Value::Object(values) => Some(Self { values }),
            Value::Null => Some(Self::new()),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field).filter(|v| !v.is_null())
    }

    /// Display text for a field, placeholder if missing or null
    pub fn display(&self, field: &str) -> String {
        self.get(field)
            .and_then(value_to_text)
            .unwrap_or_else(|| PLACEHOLDER.to_string())
    }

    pub fn last_price(&self) -> Option<f64> {
        self.get(fields::LAST_PRICE).and_then(value_to_f64)
    }

    /// Merge a tick price. An absent price clears `last_price`.
    pub fn set_last_price(&mut self, price: Option<Value>) {
        match price {
            Some(value) if !value.is_null() => {
                self.values.insert(fields::LAST_PRICE.to_string(), value);
            }
            _ => {
                self.values.remove(fields::LAST_PRICE);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// =============================================================================
// Trade decision
// =============================================================================

/// A trade decision pushed by the backend over the live feed.
///
/// Price levels and greeks are kept as display text, so numbers are
/// formatted once and non-numeric values ("ATM") survive as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeDecision {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub client_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub entry: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub sl: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub tp: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub delta: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub oi_change: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub pcr: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub note: Option<String>,
}

impl TradeDecision {
    /// Identity of the decision: `id`, else `client_id`
    pub fn key(&self) -> Option<&str> {
        self.id.as_deref().or(self.client_id.as_deref())
    }
}

// =============================================================================
// ZeroHero suggestion
// =============================================================================

/// A high-reward trade idea shown in the ZeroHero popup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZeroHeroSuggestion {
    #[serde(default, deserialize_with = "de_opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub expiry: Option<String>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub prob: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub entry: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub sl: Option<String>,
    #[serde(default, deserialize_with = "de_opt_text")]
    pub tp: Option<String>,
}

impl ZeroHeroSuggestion {
    /// Probability as a whole percentage, half rounded up. Missing counts as 0.
    pub fn prob_percent(&self) -> i64 {
        (self.prob.unwrap_or(0.0) * 100.0 + 0.5).floor() as i64
    }
}
