//! Market dashboard core
//!
//! Quote acquisition with a live → cache → history fallback chain, plus
//! buy-and-hold portfolio valuation, persisted to local CSV/JSON files.
//! The presentation layer consumes this library in-process; there is no
//! network listener and no CLI here.
//!
//! Typical wiring:
//!
//! ```no_run
//! use marketdash::feed::yahoo::YahooFeed;
//! use marketdash::store::{ensure_data_dirs, DataPaths};
//! use marketdash::MarketDataClient;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let paths = DataPaths::default_locations();
//! ensure_data_dirs(&paths)?;
//! let client = MarketDataClient::new(YahooFeed, &paths);
//! let quote = client.get_quote("btc").await?;
//! println!("{} = {}", quote.symbol, quote.price);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod feed;
pub mod format;
pub mod models;
pub mod store;
pub mod symbols;
pub mod validation;
pub mod valuation;

pub use client::MarketDataClient;
pub use error::{QuoteError, StoreError, ValidationError};
pub use models::{EnrichedHolding, Holding, Quote, QuoteSource, Series, SeriesPoint, SeriesRange};
