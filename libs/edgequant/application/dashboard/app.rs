//! Main application state and logic for the dashboard

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use hypersockets::{ClientEvent, ConnectionState};
use tokio::runtime::Handle;
use tracing::{error, info, warn};

use super::loader::DataLoader;
use super::state::{DashboardState, SharedDashboardState};
use crate::infrastructure::client::backend::BackendClient;
use crate::infrastructure::client::feed::LiveFeed;
use crate::infrastructure::config::DashboardConfig;

/// Main application state
pub struct App {
    /// Data rendered by the UI
    pub state: SharedDashboardState,
    /// REST loader
    loader: DataLoader,
    /// Live feed for this session
    feed: Option<LiveFeed>,
    /// Whether the ZeroHero popup is shown
    pub popup_open: bool,
    /// Whether to quit
    pub should_quit: bool,
    /// First trade shown when the list does not fit its panel
    pub trade_scroll: usize,
    /// First suggestion shown in the popup
    pub popup_scroll: usize,
}

impl App {
    /// Start a dashboard session: open the live feed and request instruments.
    ///
    /// A feed that cannot be opened is logged and the session continues
    /// without live updates.
    pub async fn initialize(config: &DashboardConfig) -> Result<Self> {
        let state = DashboardState::shared(config.tick_history);

        info!("[Dashboard] Using backend {}", config.rest_base());
        let client = BackendClient::from_config(config)?;
        let loader = DataLoader::new(client, Arc::clone(&state), Handle::current());

        let feed = match LiveFeed::connect(&config.websocket_url(), Arc::clone(&state)).await {
            Ok(feed) => Some(feed),
            Err(e) => {
                error!("[Dashboard] Live feed unavailable: {}", e);
                None
            }
        };

        let app = Self::new(state, loader, feed);
        app.loader.load_instruments();
        Ok(app)
    }

    /// Assemble an app from existing parts without issuing any request
    pub fn new(state: SharedDashboardState, loader: DataLoader, feed: Option<LiveFeed>) -> Self {
        Self {
            state,
            loader,
            feed,
            popup_open: false,
            should_quit: false,
            trade_scroll: 0,
            popup_scroll: 0,
        }
    }

    /// Handle a terminal key event (presses only)
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Press {
            self.on_key(key.code);
        }
    }

    pub fn on_key(&mut self, code: KeyCode) {
        if self.popup_open {
            match code {
                KeyCode::Esc | KeyCode::Char('z') => self.close_popup(),
                KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('j') | KeyCode::Down | KeyCode::PageDown => self.scroll_popup_down(),
                KeyCode::Char('k') | KeyCode::Up | KeyCode::PageUp => self.scroll_popup_up(),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.next_instrument(),
            KeyCode::Char('k') | KeyCode::Up => self.prev_instrument(),
            KeyCode::Char('z') => self.open_popup(),
            KeyCode::Char('r') => self.refresh_snapshot(),
            KeyCode::PageDown => self.scroll_trades_down(),
            KeyCode::PageUp => self.scroll_trades_up(),
            _ => {}
        }
    }

    pub fn next_instrument(&mut self) {
        let changed = self.state.write().select_next();
        if let Some(id) = changed {
            self.loader.load_snapshot(id);
        }
    }

    pub fn prev_instrument(&mut self) {
        let changed = self.state.write().select_prev();
        if let Some(id) = changed {
            self.loader.load_snapshot(id);
        }
    }

    /// Re-request the snapshot for the current selection
    pub fn refresh_snapshot(&mut self) {
        let selected = self.state.read().selected_id().map(str::to_string);
        match selected {
            Some(id) => {
                self.set_status(format!("Refreshing snapshot for {}", id));
                self.loader.load_snapshot(id);
            }
            None => self.set_status("No instrument selected"),
        }
    }

    pub fn scroll_trades_down(&mut self) {
        let last = self.state.read().trade_count().saturating_sub(1);
        self.trade_scroll = (self.trade_scroll + 1).min(last);
    }

    pub fn scroll_trades_up(&mut self) {
        self.trade_scroll = self.trade_scroll.saturating_sub(1);
    }

    pub fn scroll_popup_down(&mut self) {
        let last = self.state.read().suggestions().len().saturating_sub(1);
        self.popup_scroll = (self.popup_scroll + 1).min(last);
    }

    pub fn scroll_popup_up(&mut self) {
        self.popup_scroll = self.popup_scroll.saturating_sub(1);
    }

    pub fn open_popup(&mut self) {
        self.popup_open = true;
        self.popup_scroll = 0;
    }

    pub fn close_popup(&mut self) {
        self.popup_open = false;
    }

    /// Drain live feed events into the status line
    pub fn poll_feed(&mut self) {
        let events = match &self.feed {
            Some(feed) => feed.poll_events(),
            None => return,
        };

        for event in events {
            match event {
                ClientEvent::Connected => self.set_status("Live feed connected"),
                ClientEvent::Disconnected => self.set_status("Live feed closed"),
                ClientEvent::Error(err) => self.set_status(format!("Live feed error: {}", err)),
            }
        }
    }

    /// Connection state of the live feed
    pub fn feed_state(&self) -> ConnectionState {
        self.feed
            .as_ref()
            .map(|feed| feed.connection_state())
            .unwrap_or(ConnectionState::Disconnected)
    }

    /// Footer text: the most recent loader or feed outcome
    pub fn status_line(&self) -> Option<String> {
        self.state.read().status().map(str::to_string)
    }

    fn set_status(&self, message: impl Into<String>) {
        self.state.write().set_status(message);
    }

    /// Close the live feed. Safe to call more than once.
    pub async fn shutdown(&mut self) {
        info!("[Dashboard] Shutting down...");
        if let Some(feed) = self.feed.take() {
            if let Err(e) = feed.shutdown().await {
                warn!("[Dashboard] Error closing live feed: {}", e);
            }
        }
    }
}
