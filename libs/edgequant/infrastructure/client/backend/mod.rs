//! EdgeQuant backend REST client
//!
//! # Example
//!
//! ```rust,ignore
//! use edgequant::infrastructure::client::backend::BackendClient;
//!
//! let client = BackendClient::from_config(&config)?;
//! let instruments = client.get_instruments().await?;
//! let metrics = client.get_snapshot(&instruments[0].id).await?;
//! ```

mod client;

pub use client::{BackendClient, BackendError, Result};
