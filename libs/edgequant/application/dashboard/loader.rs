//! REST loading for the dashboard
//!
//! Requests are independent, unretried and unordered. Failures are logged
//! and leave state as it was.

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::state::SharedDashboardState;
use crate::infrastructure::client::backend::BackendClient;

/// Issues backend requests and applies their results to shared state
#[derive(Clone)]
pub struct DataLoader {
    client: BackendClient,
    state: SharedDashboardState,
    runtime: Handle,
}

impl DataLoader {
    pub fn new(client: BackendClient, state: SharedDashboardState, runtime: Handle) -> Self {
        Self { client, state, runtime }
    }

    /// Fetch the instrument list and, when a first instrument exists, its snapshot
    pub fn load_instruments(&self) -> JoinHandle<()> {
        let loader = self.clone();
        self.runtime.spawn(async move {
            if let Some(selected) = loader.fetch_instruments().await {
                loader.fetch_snapshot(&selected).await;
            }
        })
    }

    /// Fetch the snapshot for `instrument_id` in the background
    pub fn load_snapshot(&self, instrument_id: impl Into<String>) -> JoinHandle<()> {
        let loader = self.clone();
        let instrument_id = instrument_id.into();
        self.runtime.spawn(async move {
            loader.fetch_snapshot(&instrument_id).await;
        })
    }

    /// Load instruments into state. Returns the initial selection, if any.
    ///
    /// A failed request stores an empty list.
    pub async fn fetch_instruments(&self) -> Option<String> {
        match self.client.get_instruments().await {
            Ok(instruments) => {
                info!("[Dashboard] Loaded {} instruments", instruments.len());
                let mut state = self.state.write();
                state.set_status(format!("Loaded {} instruments", instruments.len()));
                state.set_instruments(instruments)
            }
            Err(e) => {
                error!("[Dashboard] Failed to load instruments: {}", e);
                let mut state = self.state.write();
                state.set_status("Instrument list unavailable");
                state.set_instruments(Vec::new());
                None
            }
        }
    }

    /// Load the snapshot for `instrument_id` into state.
    ///
    /// Returns true when the snapshot was applied. A failed request, or a
    /// response for an instrument that is no longer selected, changes nothing.
    pub async fn fetch_snapshot(&self, instrument_id: &str) -> bool {
        match self.client.get_snapshot(instrument_id).await {
            Ok(metrics) => {
                let mut state = self.state.write();
                if state.apply_snapshot(instrument_id, metrics) {
                    info!("[Dashboard] Snapshot applied for instrument {}", instrument_id);
                    true
                } else {
                    info!("[Dashboard] Discarding stale snapshot for instrument {}", instrument_id);
                    false
                }
            }
            Err(e) => {
                error!("[Dashboard] Failed to load snapshot for {}: {}", instrument_id, e);
                self.state.write().set_status(format!("Snapshot for {} unavailable", instrument_id));
                false
            }
        }
    }
}
