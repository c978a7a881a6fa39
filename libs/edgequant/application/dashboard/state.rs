//! State management for the dashboard
//!
//! The REST loader and the live feed handlers write here; render functions
//! only read. Every mutation is a short write-locked update.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Local};
use parking_lot::RwLock;
use serde_json::Value;

use crate::domain::models::value_to_f64;
use crate::domain::{Instrument, InstrumentId, Metrics, TradeDecision, ZeroHeroSuggestion};
use crate::infrastructure::client::feed::FeedSink;

/// Most recent trade decisions kept for display
pub const MAX_TRADES: usize = 10;

/// Dashboard state shared between the UI thread, loader tasks and feed handlers
pub type SharedDashboardState = Arc<RwLock<DashboardState>>;

/// Everything the dashboard renders
#[derive(Debug, Clone)]
pub struct DashboardState {
    instruments: Vec<Instrument>,
    selected: Option<InstrumentId>,
    metrics: Metrics,
    /// Newest first, at most [`MAX_TRADES`]
    trades: VecDeque<TradeDecision>,
    suggestions: Vec<ZeroHeroSuggestion>,
    /// Numeric tick prices, oldest first
    tick_prices: VecDeque<f64>,
    tick_history: usize,
    last_tick_at: Option<DateTime<Local>>,
    /// Set once the instrument request has finished, successfully or not
    pub instruments_loaded: bool,
    /// Latest loader or feed outcome, shown in the footer
    status: Option<String>,
}

impl DashboardState {
    pub fn new(tick_history: usize) -> Self {
        Self {
            instruments: Vec::new(),
            selected: None,
            metrics: Metrics::new(),
            trades: VecDeque::with_capacity(MAX_TRADES + 1),
            suggestions: Vec::new(),
            tick_prices: VecDeque::with_capacity(tick_history),
            tick_history: tick_history.max(1),
            last_tick_at: None,
            instruments_loaded: false,
            status: None,
        }
    }

    pub fn shared(tick_history: usize) -> SharedDashboardState {
        Arc::new(RwLock::new(Self::new(tick_history)))
    }

    // -------------------------------------------------------------------------
    // Instruments and selection
    // -------------------------------------------------------------------------

    /// Store the instrument list and select its first entry.
    ///
    /// Returns the new selection when it changed.
    pub fn set_instruments(&mut self, instruments: Vec<Instrument>) -> Option<InstrumentId> {
        self.instruments = instruments;
        self.instruments_loaded = true;

        let first = self.instruments.first().map(|i| i.id.clone());
        if first.is_some() && first != self.selected {
            self.selected = first.clone();
            return first;
        }
        if first.is_none() {
            self.selected = None;
        }
        None
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_deref()?;
        self.instruments.iter().position(|i| i.id == selected)
    }

    pub fn selected_instrument(&self) -> Option<&Instrument> {
        self.selected_index().map(|idx| &self.instruments[idx])
    }

    /// Select an instrument by id. Returns true when the selection changed.
    pub fn select(&mut self, id: &str) -> bool {
        if self.selected.as_deref() == Some(id) || !self.instruments.iter().any(|i| i.id == id) {
            return false;
        }
        self.selected = Some(id.to_string());
        true
    }

    /// Move the selection down, wrapping. Returns the new selection if it changed.
    pub fn select_next(&mut self) -> Option<InstrumentId> {
        self.step_selection(1)
    }

    /// Move the selection up, wrapping. Returns the new selection if it changed.
    pub fn select_prev(&mut self) -> Option<InstrumentId> {
        self.step_selection(-1)
    }

    fn step_selection(&mut self, step: isize) -> Option<InstrumentId> {
        let len = self.instruments.len();
        if len == 0 {
            return None;
        }

        let next = match self.selected_index() {
            Some(idx) => (idx as isize + step).rem_euclid(len as isize) as usize,
            None => 0,
        };

        let id = self.instruments[next].id.clone();
        if self.select(&id) {
            Some(id)
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // Metrics
    // -------------------------------------------------------------------------

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Replace metrics with a snapshot for `instrument_id`.
    ///
    /// Snapshots for an instrument that is no longer selected are discarded.
    pub fn apply_snapshot(&mut self, instrument_id: &str, metrics: Metrics) -> bool {
        if self.selected.as_deref() != Some(instrument_id) {
            return false;
        }
        self.metrics = metrics;
        true
    }

    /// Merge a tick into `last_price` and the price history
    pub fn apply_tick(&mut self, price: Option<Value>) {
        if let Some(numeric) = price.as_ref().and_then(value_to_f64) {
            if self.tick_prices.len() == self.tick_history {
                self.tick_prices.pop_front();
            }
            self.tick_prices.push_back(numeric);
        }
        self.metrics.set_last_price(price);
        self.last_tick_at = Some(Local::now());
    }

    // -------------------------------------------------------------------------
    // Status line
    // -------------------------------------------------------------------------

    /// Record the latest outcome, stamped with local time. Overwrites the
    /// previous message whichever component wrote it.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(format!("[{}] {}", Local::now().format("%H:%M:%S"), message.into()));
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn tick_prices(&self) -> &VecDeque<f64> {
        &self.tick_prices
    }

    pub fn last_tick_at(&self) -> Option<DateTime<Local>> {
        self.last_tick_at
    }

    // -------------------------------------------------------------------------
    // Trades and suggestions
    // -------------------------------------------------------------------------

    /// Prepend a decision, keeping the newest [`MAX_TRADES`]
    pub fn push_decision(&mut self, decision: TradeDecision) {
        self.trades.push_front(decision);
        self.trades.truncate(MAX_TRADES);
    }

    pub fn trades(&self) -> impl Iterator<Item = &TradeDecision> {
        self.trades.iter()
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    /// Replace the whole suggestion list
    pub fn replace_suggestions(&mut self, suggestions: Vec<ZeroHeroSuggestion>) {
        self.suggestions = suggestions;
    }

    pub fn suggestions(&self) -> &[ZeroHeroSuggestion] {
        &self.suggestions
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(120)
    }
}

impl FeedSink for RwLock<DashboardState> {
    fn on_tick(&self, price: Option<Value>) {
        self.write().apply_tick(price);
    }

    fn on_decision(&self, decision: TradeDecision) {
        self.write().push_decision(decision);
    }

    fn on_suggestions(&self, suggestions: Vec<ZeroHeroSuggestion>) {
        self.write().replace_suggestions(suggestions);
    }
}
