//! Market data client
//!
//! Orchestrates the quote-acquisition fallback chain: live fetch, then the
//! process-local quote cache, then the append-only history log. Only when
//! all three are exhausted does `get_quote` fail.

use crate::error::QuoteError;
use crate::feed::LiveFeed;
use crate::models::{Quote, QuoteSource, Series, SeriesRange};
use crate::store::cache::QuoteCache;
use crate::store::history::HistoryLog;
use crate::store::DataPaths;
use crate::symbols::normalize;
use anyhow::{anyhow, Result};
use chrono::{Local, NaiveDateTime, Timelike};

pub struct MarketDataClient<F> {
    feed: F,
    cache: QuoteCache,
    history: HistoryLog,
}

impl<F: LiveFeed> MarketDataClient<F> {
    pub fn new(feed: F, paths: &DataPaths) -> Self {
        Self {
            feed,
            cache: QuoteCache::new(paths),
            history: HistoryLog::new(paths),
        }
    }

    /// Current quote for a symbol, live if possible.
    ///
    /// On live success the quote is persisted to the cache (overwrite) and
    /// the history log (append) before it is returned. On live failure the
    /// cache is consulted, then the history log; only when both miss does
    /// this fail with [`QuoteError::NoDataAvailable`].
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote, QuoteError> {
        let canonical = normalize(symbol);

        match self.fetch_live(&canonical).await {
            Ok(price) => {
                let quote = Quote::new(canonical, price, now_seconds(), QuoteSource::Live);
                if let Err(e) = self.cache.put(&quote) {
                    log::warn!("Failed to update quote cache for {}: {}", quote.symbol, e);
                }
                if let Err(e) = self.history.append(&quote) {
                    log::warn!("Failed to append history for {}: {}", quote.symbol, e);
                }
                Ok(quote)
            }
            Err(cause) => {
                log::debug!("Live fetch failed for {}, falling back: {:#}", canonical, cause);

                if let Some(cached) = self.cache.get(&canonical) {
                    return Ok(cached);
                }
                if let Some(row) = self.history.find_latest(&canonical) {
                    return Ok(row);
                }
                Err(QuoteError::NoDataAvailable {
                    symbol: canonical,
                    cause,
                })
            }
        }
    }

    /// One live attempt, including the historical-bar retry.
    ///
    /// A missing or exactly-zero latest price is not trusted as a real live
    /// price and escalates to the most recent daily bar. The bar close is
    /// taken as-is, without the non-zero check.
    async fn fetch_live(&self, canonical: &str) -> Result<f64> {
        match self.feed.latest_price(canonical).await? {
            Some(price) if price != 0.0 => Ok(price),
            other => {
                log::debug!(
                    "No usable live price for {} ({:?}), trying last daily bar",
                    canonical,
                    other
                );
                self.feed
                    .last_daily_close(canonical)
                    .await?
                    .ok_or_else(|| anyhow!("no usable price for {}", canonical))
            }
        }
    }

    /// Daily close series over the window.
    ///
    /// The symbol is passed through untouched; callers that want alias
    /// handling normalize first. Any failure degrades to an empty series -
    /// chart absence is a valid, silent outcome.
    pub async fn get_series(&self, symbol: &str, range: SeriesRange) -> Series {
        match self.feed.daily_series(symbol, range).await {
            Ok(points) => Series {
                symbol: symbol.to_string(),
                points,
            },
            Err(e) => {
                log::debug!("No chart data for {} over {}: {:#}", symbol, range.as_str(), e);
                Series::empty(symbol.to_string())
            }
        }
    }
}

/// Observation timestamp, second resolution
fn now_seconds() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
