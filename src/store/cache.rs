//! Quote cache
//!
//! Last-write-wins mapping from canonical symbol to the most recent quote,
//! persisted as one JSON object. The whole mapping is read and rewritten on
//! every update. A corrupt or unreadable file degrades to an empty cache and
//! is never fatal.

use super::DataPaths;
use crate::error::StoreError;
use crate::models::{Quote, QuoteSource};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Persisted form of one cached quote
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub last_refreshed: NaiveDateTime,
    pub source: QuoteSource,
}

pub struct QuoteCache {
    path: PathBuf,
}

impl QuoteCache {
    pub fn new(paths: &DataPaths) -> Self {
        Self {
            path: paths.cache_file.clone(),
        }
    }

    /// Full mapping, typed errors surfaced.
    ///
    /// A missing file is an empty cache; an unreadable or unparsable file is
    /// a [`StoreError`] for callers that want to tell the difference.
    pub fn load(&self) -> Result<HashMap<String, CacheEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;
        serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    fn load_or_empty(&self) -> HashMap<String, CacheEntry> {
        self.load().unwrap_or_else(|e| {
            log::warn!("Quote cache unreadable, treating as empty: {}", e);
            HashMap::new()
        })
    }

    /// Cached quote for the symbol, tagged `source=cache`
    pub fn get(&self, symbol: &str) -> Option<Quote> {
        self.load_or_empty().remove(symbol).map(|entry| Quote {
            symbol: entry.symbol,
            price: entry.price,
            change: entry.change,
            change_percent: entry.change_percent,
            last_refreshed: entry.last_refreshed,
            source: QuoteSource::Cache,
            quantity: 0.0,
            cost_basis: 0.0,
        })
    }

    /// Overwrite the record for the quote's symbol (last-write-wins)
    pub fn put(&self, quote: &Quote) -> Result<(), StoreError> {
        let mut cache = self.load_or_empty();
        cache.insert(
            quote.symbol.clone(),
            CacheEntry {
                symbol: quote.symbol.clone(),
                price: quote.price,
                change: quote.change,
                change_percent: quote.change_percent,
                last_refreshed: quote.last_refreshed,
                source: quote.source,
            },
        );

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let raw = serde_json::to_string(&cache).map_err(|e| StoreError::Malformed {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        fs::write(&self.path, raw).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn cache_in(dir: &std::path::Path) -> QuoteCache {
        QuoteCache::new(&DataPaths::in_dir(dir))
    }

    #[test]
    fn test_get_on_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());
        assert!(cache.get("BTC-USD").is_none());
        assert!(cache.load().unwrap().is_empty());
    }

    #[test]
    fn test_put_then_get_tags_source_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());

        let quote = Quote::new("BTC-USD".to_string(), 65000.0, ts(9), QuoteSource::Live);
        cache.put(&quote).unwrap();

        let got = cache.get("BTC-USD").unwrap();
        assert_eq!(got.price, 65000.0);
        assert_eq!(got.source, QuoteSource::Cache);
        // the stored entry keeps the source it was written with
        assert_eq!(cache.load().unwrap()["BTC-USD"].source, QuoteSource::Live);
    }

    #[test]
    fn test_last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());

        cache.put(&Quote::new("BTC-USD".to_string(), 100.0, ts(9), QuoteSource::Live)).unwrap();
        cache.put(&Quote::new("BTC-USD".to_string(), 110.0, ts(10), QuoteSource::Live)).unwrap();

        assert_eq!(cache.get("BTC-USD").unwrap().price, 110.0);
        assert_eq!(cache.load().unwrap().len(), 1);
    }

    #[test]
    fn test_entries_are_independent_per_symbol() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());

        cache.put(&Quote::new("BTC-USD".to_string(), 100.0, ts(9), QuoteSource::Live)).unwrap();
        cache.put(&Quote::new("ETH-USD".to_string(), 50.0, ts(9), QuoteSource::Live)).unwrap();

        assert_eq!(cache.get("BTC-USD").unwrap().price, 100.0);
        assert_eq!(cache.get("ETH-USD").unwrap().price, 50.0);
    }

    #[test]
    fn test_corrupt_file_degrades_but_load_reports() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::in_dir(dir.path());
        fs::write(&paths.cache_file, "not json{").unwrap();
        let cache = QuoteCache::new(&paths);

        assert!(cache.get("BTC-USD").is_none());
        assert!(matches!(cache.load(), Err(StoreError::Malformed { .. })));

        // put still succeeds by starting from an empty mapping
        cache.put(&Quote::new("BTC-USD".to_string(), 1.0, ts(9), QuoteSource::Live)).unwrap();
        assert_eq!(cache.get("BTC-USD").unwrap().price, 1.0);
    }
}
