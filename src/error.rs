//! Error taxonomy
//!
//! Failures with a well-defined fallback are absorbed at the lowest layer;
//! only `QuoteError::NoDataAvailable` and `ValidationError` are expected to
//! reach the presentation layer.

use std::path::PathBuf;
use thiserror::Error;

/// Terminal failure of `get_quote`: the live fetch, the cache and the
/// history log were all exhausted.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("no data available for {symbol}: {cause}")]
    NoDataAvailable {
        symbol: String,
        cause: anyhow::Error,
    },
}

/// Rejection of a holding before it is written
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Symbol is required.")]
    EmptySymbol,
    #[error("Quantity must be greater than 0.")]
    NonPositiveQuantity,
    #[error("Buy Price cannot be negative.")]
    NegativeBuyPrice,
}

/// Persistence failure of one of the flat stores.
///
/// Read paths absorb these (a corrupt store degrades to an empty one) but
/// the typed `load` layers return them so tests can tell an I/O failure
/// apart from missing data.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed data in {path}: {reason}")]
    Malformed { path: PathBuf, reason: String },
}
