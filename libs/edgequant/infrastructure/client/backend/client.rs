//! REST client for the EdgeQuant backend
//!
//! Two endpoints, both plain GETs without retries.

use crate::domain::{Instrument, Metrics};
use crate::infrastructure::config::DashboardConfig;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Deserialization failed: {0}")]
    DeserializeFailed(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;

/// Client for `/api/instruments` and `/api/snapshot`
#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    client: Client,
}

impl BackendClient {
    /// Create a client for `base_url` with the given timeouts
    pub fn new(base_url: impl Into<String>, request_timeout: Duration, connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Self::new(config.rest_base(), config.request_timeout(), config.connect_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the instrument list. A `null` body is an empty list.
    pub async fn get_instruments(&self) -> Result<Vec<Instrument>> {
        let url = format!("{}/api/instruments", self.base_url);
        debug!("[Backend] GET {}", url);

        let body = self.get_json(&url, &[]).await?;
        let instruments: Option<Vec<Instrument>> = serde_json::from_value(body)
            .map_err(|e| BackendError::DeserializeFailed(format!("instruments: {}", e)))?;
        let instruments = instruments.unwrap_or_default();

        debug!("[Backend] Fetched {} instruments", instruments.len());
        Ok(instruments)
    }

    /// Fetch the metrics snapshot for one instrument
    pub async fn get_snapshot(&self, instrument_id: &str) -> Result<Metrics> {
        let url = format!("{}/api/snapshot", self.base_url);
        debug!("[Backend] GET {}?instrument_id={}", url, instrument_id);

        let body = self.get_json(&url, &[("instrument_id", instrument_id)]).await?;
        let metrics = Metrics::from_snapshot(body).ok_or_else(|| {
            BackendError::DeserializeFailed("snapshot must be a JSON object".to_string())
        })?;

        debug!("[Backend] Snapshot for {} has {} fields", instrument_id, metrics.len());
        Ok(metrics)
    }

    async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::ApiError(format!("{} ({}): {}", url, status, error_text)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| BackendError::DeserializeFailed(e.to_string()))
    }
}
