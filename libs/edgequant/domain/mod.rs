//! Domain Layer
//!
//! Backend record types and their display helpers.
//! This layer has no dependencies on infrastructure or application layers.

pub mod models;

pub use models::{
    display_text, fields, format_number, Instrument, InstrumentId, Metrics,
    TradeDecision, ZeroHeroSuggestion, PLACEHOLDER,
};
