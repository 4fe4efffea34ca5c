//! Quote history log
//!
//! Append-only CSV record of every quote ever fetched, across all symbols.
//! Rows are never rewritten or deleted; chronological order is insertion
//! order. Serves as the last-resort fallback and as an audit trail.

use super::{DataPaths, HISTORY_HEADER, TIMESTAMP_FORMAT};
use crate::error::StoreError;
use crate::models::{Quote, QuoteSource};
use chrono::NaiveDateTime;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    pub fn new(paths: &DataPaths) -> Self {
        Self {
            path: paths.history_file.clone(),
        }
    }

    /// Append one row. The header is written exactly once, when the file is
    /// first created.
    pub fn append(&self, quote: &Quote) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let write_header = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::Io {
                path: self.path.clone(),
                source: e,
            })?;

        let mut out = String::new();
        if write_header {
            out.push_str(HISTORY_HEADER);
            out.push('\n');
        }
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            quote.symbol,
            quote.price,
            quote.change,
            quote.change_percent,
            quote.last_refreshed.format(TIMESTAMP_FORMAT),
            quote.source.as_str(),
        ));

        file.write_all(out.as_bytes()).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })
    }

    /// All rows in insertion order, typed errors surfaced.
    ///
    /// A missing file is an empty log. Malformed rows are skipped with a
    /// warning so one bad line cannot poison the audit trail.
    pub fn load(&self) -> Result<Vec<Quote>, StoreError> {
        if !self.path.exists() {
            return Ok(vec![]);
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        let mut rows = Vec::new();
        for line in raw.lines() {
            let line = line.trim_end();
            if line.is_empty() || line == HISTORY_HEADER {
                continue;
            }
            match parse_row(line) {
                Some(quote) => rows.push(quote),
                None => log::warn!("Skipping malformed history row: {}", line),
            }
        }
        Ok(rows)
    }

    /// Most recent row for the symbol, tagged `source=offline-history`.
    ///
    /// Scans from the newest row backward; the first match wins.
    pub fn find_latest(&self, symbol: &str) -> Option<Quote> {
        let rows = self.load().unwrap_or_else(|e| {
            log::warn!("History log unreadable, treating as empty: {}", e);
            vec![]
        });
        rows.into_iter().rev().find(|row| row.symbol == symbol).map(|row| Quote {
            source: QuoteSource::OfflineHistory,
            ..row
        })
    }
}

fn parse_row(line: &str) -> Option<Quote> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 6 {
        return None;
    }
    let price = fields[1].trim().parse::<f64>().ok()?;
    let timestamp = NaiveDateTime::parse_from_str(fields[4].trim(), TIMESTAMP_FORMAT).ok()?;

    Some(Quote {
        symbol: fields[0].trim().to_string(),
        price,
        change: super::safe_float(fields[2], 0.0),
        change_percent: super::safe_float(fields[3], 0.0),
        last_refreshed: timestamp,
        source: QuoteSource::from_str(fields[5].trim()).unwrap_or(QuoteSource::Live),
        quantity: 0.0,
        cost_basis: 0.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn log_in(dir: &std::path::Path) -> HistoryLog {
        HistoryLog::new(&DataPaths::in_dir(dir))
    }

    #[test]
    fn test_missing_file_is_empty_log() {
        let dir = tempfile::tempdir().unwrap();
        let history = log_in(dir.path());
        assert!(history.load().unwrap().is_empty());
        assert!(history.find_latest("BTC-USD").is_none());
    }

    #[test]
    fn test_header_written_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let history = log_in(dir.path());

        history.append(&Quote::new("BTC-USD".to_string(), 100.0, ts(9), QuoteSource::Live)).unwrap();
        history.append(&Quote::new("BTC-USD".to_string(), 110.0, ts(10), QuoteSource::Live)).unwrap();

        let raw = fs::read_to_string(dir.path().join("history.csv")).unwrap();
        let headers = raw.lines().filter(|l| *l == HISTORY_HEADER).count();
        assert_eq!(headers, 1);
        assert_eq!(raw.lines().count(), 3);
    }

    #[test]
    fn test_find_latest_takes_newest_match() {
        let dir = tempfile::tempdir().unwrap();
        let history = log_in(dir.path());

        history.append(&Quote::new("BTC-USD".to_string(), 100.0, ts(9), QuoteSource::Live)).unwrap();
        history.append(&Quote::new("ETH-USD".to_string(), 50.0, ts(10), QuoteSource::Live)).unwrap();
        history.append(&Quote::new("BTC-USD".to_string(), 110.0, ts(11), QuoteSource::Live)).unwrap();

        let latest = history.find_latest("BTC-USD").unwrap();
        assert_eq!(latest.price, 110.0);
        assert_eq!(latest.last_refreshed, ts(11));
        assert_eq!(latest.source, QuoteSource::OfflineHistory);
    }

    #[test]
    fn test_rows_survive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let history = log_in(dir.path());

        let mut quote = Quote::new("NVDA".to_string(), 950.5, ts(16), QuoteSource::Live);
        quote.change = -1.25;
        quote.change_percent = -0.13;
        history.append(&quote).unwrap();

        let rows = history.load().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "NVDA");
        assert_eq!(rows[0].price, 950.5);
        assert_eq!(rows[0].change, -1.25);
        assert_eq!(rows[0].last_refreshed, ts(16));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let paths = DataPaths::in_dir(dir.path());
        fs::write(
            &paths.history_file,
            "symbol,price,change,change_percent,timestamp,source\n\
             BTC-USD,100,0,0,2025-06-01 09:00:00,live\n\
             garbage line\n\
             BTC-USD,notanumber,0,0,2025-06-01 10:00:00,live\n",
        )
        .unwrap();
        let history = HistoryLog::new(&paths);

        let rows = history.load().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(history.find_latest("BTC-USD").unwrap().price, 100.0);
    }
}
