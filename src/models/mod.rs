use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A point-in-time price observation.
///
/// Immutable once constructed. `quantity` and `cost_basis` stay at their
/// `0.0` defaults unless the quote stands in for a portfolio line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub last_refreshed: NaiveDateTime,
    pub source: QuoteSource,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub cost_basis: f64,
}

impl Quote {
    pub fn new(symbol: String, price: f64, last_refreshed: NaiveDateTime, source: QuoteSource) -> Self {
        Self {
            symbol,
            price,
            change: 0.0,
            change_percent: 0.0,
            last_refreshed,
            source,
            quantity: 0.0,
            cost_basis: 0.0,
        }
    }
}

/// Where a quote came from. Display and trust signaling only - the fallback
/// chain never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteSource {
    Live,
    Cache,
    OfflineHistory,
    LocalCache,
}

impl QuoteSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Cache => "cache",
            Self::OfflineHistory => "offline-history",
            Self::LocalCache => "local-cache",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "live" => Some(Self::Live),
            "cache" => Some(Self::Cache),
            "offline-history" => Some(Self::OfflineHistory),
            "local-cache" => Some(Self::LocalCache),
            _ => None,
        }
    }
}

/// Single point of a daily close series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub time: NaiveDateTime,
    pub close: f64,
}

/// Daily close series for one symbol, ascending by time.
///
/// An empty `points` vector means "no chart data", not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub symbol: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn empty(symbol: String) -> Self {
        Self { symbol, points: vec![] }
    }
}

/// Chart window accepted by `get_series`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesRange {
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
    #[serde(rename = "5y")]
    FiveYears,
    #[serde(rename = "10y")]
    TenYears,
    #[serde(rename = "max")]
    Max,
}

impl SeriesRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMonth => "1mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
            Self::FiveYears => "5y",
            Self::TenYears => "10y",
            Self::Max => "max",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1mo" => Some(Self::OneMonth),
            "6mo" => Some(Self::SixMonths),
            "1y" => Some(Self::OneYear),
            "5y" => Some(Self::FiveYears),
            "10y" => Some(Self::TenYears),
            "max" => Some(Self::Max),
            _ => None,
        }
    }
}

/// One portfolio lot. Multiple lots per symbol are independent rows and are
/// never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub quantity: f64,
    pub buy_price: f64,
}

/// A holding joined with its current quote. Derived on demand, never
/// persisted. `current_price` and `value` are `None` when valuation failed
/// for this row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedHolding {
    pub symbol: String,
    pub quantity: f64,
    pub buy_price: f64,
    pub total_spent: f64,
    pub current_price: Option<f64>,
    pub value: Option<f64>,
    pub pl: f64,
    pub pl_percent: f64,
    pub currency_symbol: String,
    pub source: QuoteSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_source_round_trip() {
        for src in [
            QuoteSource::Live,
            QuoteSource::Cache,
            QuoteSource::OfflineHistory,
            QuoteSource::LocalCache,
        ] {
            assert_eq!(QuoteSource::from_str(src.as_str()), Some(src));
        }
        assert_eq!(QuoteSource::from_str("yfinance"), None);
    }

    #[test]
    fn test_series_range_round_trip() {
        for range in [
            SeriesRange::OneMonth,
            SeriesRange::SixMonths,
            SeriesRange::OneYear,
            SeriesRange::FiveYears,
            SeriesRange::TenYears,
            SeriesRange::Max,
        ] {
            assert_eq!(SeriesRange::from_str(range.as_str()), Some(range));
        }
        assert_eq!(SeriesRange::from_str("2wk"), None);
    }

    #[test]
    fn test_quote_new_defaults() {
        let now = chrono::NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let quote = Quote::new("BTC-USD".to_string(), 65000.0, now, QuoteSource::Live);
        assert_eq!(quote.change, 0.0);
        assert_eq!(quote.change_percent, 0.0);
        assert_eq!(quote.quantity, 0.0);
        assert_eq!(quote.cost_basis, 0.0);
    }
}
