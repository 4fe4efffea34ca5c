//! Flat-file stores
//!
//! Three durable files back the dashboard: a JSON quote cache, an
//! append-only CSV history log and a CSV portfolio. Locations come from an
//! explicit [`DataPaths`] passed to each store at construction, never from
//! ambient globals, so tests can point everything at a temporary directory.

pub mod cache;
pub mod history;
pub mod portfolio;

use crate::error::StoreError;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) const HISTORY_HEADER: &str = "symbol,price,change,change_percent,timestamp,source";
pub(crate) const PORTFOLIO_HEADER: &str = "symbol,quantity,buy_price";
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Locations of the three durable files
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub cache_file: PathBuf,
    pub history_file: PathBuf,
    pub portfolio_file: PathBuf,
}

impl DataPaths {
    /// All three files under a single directory
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            cache_file: dir.join("cache.json"),
            history_file: dir.join("history.csv"),
            portfolio_file: dir.join("portfolio.csv"),
        }
    }

    /// Per-user default under the platform data directory
    pub fn default_locations() -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("marketdash");
        Self::in_dir(base)
    }
}

/// Create the data directory and seed missing files.
///
/// The portfolio and history files get their header row, the cache starts
/// as an empty JSON mapping. Existing files are left untouched.
pub fn ensure_data_dirs(paths: &DataPaths) -> Result<(), StoreError> {
    for file in [&paths.cache_file, &paths.history_file, &paths.portfolio_file] {
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    seed_if_missing(&paths.portfolio_file, &format!("{}\n", PORTFOLIO_HEADER))?;
    seed_if_missing(&paths.history_file, &format!("{}\n", HISTORY_HEADER))?;
    seed_if_missing(&paths.cache_file, "{}")?;

    Ok(())
}

fn seed_if_missing(path: &Path, contents: &str) -> Result<(), StoreError> {
    if !path.exists() {
        fs::write(path, contents).map_err(|e| StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    }
    Ok(())
}

/// Lenient float parse for hand-edited CSV cells
pub(crate) fn safe_float(value: &str, default: f64) -> f64 {
    value.trim().parse::<f64>().unwrap_or(default)
}
