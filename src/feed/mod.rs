//! Upstream market-data feed
//!
//! The feed is an external collaborator consumed through two questions:
//! "latest tradeable price for X" and "daily closing bars for X over R".
//! Transport, auth and rate limiting live behind this trait.

pub mod yahoo;

use crate::models::{SeriesPoint, SeriesRange};
use anyhow::Result;

/// Live price source consulted by the market data client.
///
/// `Ok(None)` means the feed answered but had no price; `Err` means the
/// attempt itself failed (transport, API error).
#[allow(async_fn_in_trait)]
pub trait LiveFeed {
    /// Latest tradeable price for the symbol
    async fn latest_price(&self, symbol: &str) -> Result<Option<f64>>;

    /// Close of the most recent daily bar
    async fn last_daily_close(&self, symbol: &str) -> Result<Option<f64>>;

    /// Daily closing bars over the window, ascending by time
    async fn daily_series(&self, symbol: &str, range: SeriesRange) -> Result<Vec<SeriesPoint>>;
}
