//! CSV file price adapter.
//!
//! One file per symbol and interval, named `{symbol}_{interval}.csv`, with a
//! `timestamp,close` header. Timestamps are Unix epoch milliseconds.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::domain::error::QuantsimError;
use crate::domain::price_series::{PricePoint, PriceSeries};
use crate::ports::data_port::PriceSource;

pub struct CsvAdapter {
    base_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: i64,
    close: f64,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str, interval: &str) -> PathBuf {
        self.base_path.join(format!("{}_{}.csv", symbol, interval))
    }
}

impl PriceSource for CsvAdapter {
    fn fetch(
        &self,
        symbol: &str,
        interval: &str,
        limit: Option<usize>,
    ) -> Result<PriceSeries, QuantsimError> {
        let path = self.csv_path(symbol, interval);
        let content = fs::read_to_string(&path).map_err(|e| QuantsimError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut points = Vec::new();

        for (line, result) in rdr.deserialize::<CsvRow>().enumerate() {
            let row = result.map_err(|e| QuantsimError::DataSource {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;
            let timestamp = DateTime::<Utc>::from_timestamp_millis(row.timestamp).ok_or_else(|| {
                QuantsimError::DataSource {
                    reason: format!("timestamp out of range on row {}: {}", line + 1, row.timestamp),
                }
            })?;
            points.push(PricePoint {
                timestamp,
                close: row.close,
            });
        }

        if points.is_empty() {
            return Err(QuantsimError::NoData {
                symbol: symbol.to_string(),
                interval: interval.to_string(),
            });
        }

        points.sort_by_key(|p| p.timestamp);
        if let Some(limit) = limit {
            let skip = points.len().saturating_sub(limit);
            points.drain(..skip);
        }
        debug!(symbol, interval, rows = points.len(), "loaded prices");

        PriceSeries::with_timestamps(points)
    }

    fn list_symbols(&self, interval: &str) -> Result<Vec<String>, QuantsimError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| QuantsimError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let suffix = format!("_{}.csv", interval);
        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| QuantsimError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(&suffix) {
                if !symbol.is_empty() {
                    symbols.push(symbol.to_string());
                }
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        // deliberately out of order
        let csv_content = "timestamp,close\n\
            1700000120000,103.5\n\
            1700000000000,100.0\n\
            1700000060000,101.25\n";

        fs::write(path.join("BTCUSDT_1m.csv"), csv_content).unwrap();
        fs::write(path.join("ETHUSDT_1m.csv"), "timestamp,close\n").unwrap();
        fs::write(path.join("BTCUSDT_1h.csv"), "timestamp,close\n").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_returns_sorted_closes() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter.fetch("BTCUSDT", "1m", None).unwrap();
        assert_eq!(series.closes(), &[100.0, 101.25, 103.5]);
        assert_eq!(
            series.timestamp(0),
            DateTime::<Utc>::from_timestamp_millis(1_700_000_000_000)
        );
    }

    #[test]
    fn fetch_keeps_most_recent_rows_within_limit() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let series = adapter.fetch("BTCUSDT", "1m", Some(2)).unwrap();
        assert_eq!(series.closes(), &[101.25, 103.5]);

        let series = adapter.fetch("BTCUSDT", "1m", Some(10)).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn fetch_missing_file_is_data_source_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch("XYZ", "1m", None);
        assert!(matches!(result, Err(QuantsimError::DataSource { .. })));
    }

    #[test]
    fn fetch_header_only_is_no_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch("ETHUSDT", "1m", None);
        assert!(matches!(result, Err(QuantsimError::NoData { .. })));
    }

    #[test]
    fn fetch_rejects_negative_close() {
        let (_dir, path) = setup_test_data();
        fs::write(path.join("BAD_1m.csv"), "timestamp,close\n1,10.0\n2,-3.0\n").unwrap();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch("BAD", "1m", None);
        assert!(matches!(result, Err(QuantsimError::InvalidPrice { index: 1, .. })));
    }

    #[test]
    fn fetch_rejects_malformed_row() {
        let (_dir, path) = setup_test_data();
        fs::write(path.join("BAD_1m.csv"), "timestamp,close\n1,abc\n").unwrap();
        let adapter = CsvAdapter::new(path);

        let result = adapter.fetch("BAD", "1m", None);
        assert!(matches!(result, Err(QuantsimError::DataSource { .. })));
    }

    #[test]
    fn list_symbols_filters_by_interval() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let symbols = adapter.list_symbols("1m").unwrap();
        assert_eq!(symbols, vec!["BTCUSDT", "ETHUSDT"]);

        let symbols = adapter.list_symbols("1h").unwrap();
        assert_eq!(symbols, vec!["BTCUSDT"]);
    }

    #[test]
    fn list_symbols_missing_directory() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/quantsim/data"));
        assert!(adapter.list_symbols("1m").is_err());
    }
}
