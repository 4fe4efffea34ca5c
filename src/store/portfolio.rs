//! Portfolio store
//!
//! Ordered CSV list of holdings, fully rewritten on every mutation. Lots are
//! independent rows: adding the same symbol twice keeps two rows. Validation
//! happens before `add` is called; the store does not re-validate.

use super::{safe_float, DataPaths, PORTFOLIO_HEADER};
use crate::error::StoreError;
use crate::models::Holding;
use crate::symbols::normalize;
use std::fs;
use std::path::PathBuf;

pub struct PortfolioStore {
    path: PathBuf,
}

impl PortfolioStore {
    pub fn new(paths: &DataPaths) -> Self {
        Self {
            path: paths.portfolio_file.clone(),
        }
    }

    /// Holdings in file order. Symbols are normalized on read, numeric cells
    /// are parsed leniently so a hand-edited file degrades instead of
    /// erroring. A missing file is an empty portfolio.
    pub fn load(&self) -> Result<Vec<Holding>, StoreError> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        let mut holdings = Vec::new();
        for line in raw.lines() {
            let line = line.trim_end();
            if line.is_empty() || line == PORTFOLIO_HEADER {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 3 {
                log::warn!("Skipping malformed portfolio row: {}", line);
                continue;
            }
            holdings.push(Holding {
                symbol: normalize(fields[0]),
                quantity: safe_float(fields[1], 0.0),
                buy_price: safe_float(fields[2], 0.0),
            });
        }
        Ok(holdings)
    }

    /// Append one lot and persist the full sequence. Existing lots for the
    /// same symbol are kept as independent rows.
    pub fn add(&self, symbol: &str, quantity: f64, buy_price: f64) -> Result<(), StoreError> {
        let mut holdings = self.load()?;
        holdings.push(Holding {
            symbol: normalize(symbol),
            quantity,
            buy_price,
        });
        self.save(&holdings)
    }

    /// Delete every lot matching the normalized symbol and persist the rest
    pub fn remove(&self, symbol: &str) -> Result<(), StoreError> {
        let target = normalize(symbol);
        let holdings: Vec<Holding> = self
            .load()?
            .into_iter()
            .filter(|h| h.symbol != target)
            .collect();
        self.save(&holdings)
    }

    fn save(&self, holdings: &[Holding]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut out = String::from(PORTFOLIO_HEADER);
        out.push('\n');
        for h in holdings {
            out.push_str(&format!("{},{},{}\n", h.symbol, h.quantity, h.buy_price));
        }

        fs::write(&self.path, out).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}
