//! CSV signal file adapter.
//!
//! Expects a header row followed by `time,price,signal` records. `time` is
//! either epoch milliseconds or a UTC timestamp (`YYYY-MM-DD HH:MM:SS` or
//! RFC 3339); `signal` is `buy`, `sell` or `hold` (blank means hold).

use crate::domain::error::LedgerError;
use crate::domain::replay::{Signal, SignalRow};
use crate::ports::signal_port::SignalPort;
use chrono::{DateTime, NaiveDateTime};
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parse signal rows from CSV text.
    pub fn parse(content: &str) -> Result<Vec<SignalRow>, LedgerError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());
        let mut rows = Vec::new();

        for (index, result) in rdr.records().enumerate() {
            let line = index + 2;
            let record = result.map_err(|e| LedgerError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let time_str = record.get(0).ok_or_else(|| LedgerError::Data {
                reason: format!("line {line}: missing time column"),
            })?;
            let time = parse_time(time_str).ok_or_else(|| LedgerError::Data {
                reason: format!("line {line}: invalid time {time_str:?}"),
            })?;

            let price: f64 = record
                .get(1)
                .ok_or_else(|| LedgerError::Data {
                    reason: format!("line {line}: missing price column"),
                })?
                .parse()
                .map_err(|e| LedgerError::Data {
                    reason: format!("line {line}: invalid price value: {}", e),
                })?;

            let signal: Signal = record.get(2).unwrap_or("").parse()?;

            rows.push(SignalRow {
                time,
                price,
                signal,
            });
        }

        rows.sort_by_key(|row| row.time);
        Ok(rows)
    }
}

/// Epoch milliseconds from either an integer or a UTC timestamp string.
fn parse_time(value: &str) -> Option<i64> {
    if let Ok(ms) = value.parse::<i64>() {
        return Some(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.and_utc().timestamp_millis())
}

impl SignalPort for CsvAdapter {
    fn fetch_signals(&self) -> Result<Vec<SignalRow>, LedgerError> {
        let content = fs::read_to_string(&self.path).map_err(|e| LedgerError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        Self::parse(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_epoch_and_timestamp_times() {
        let rows = CsvAdapter::parse(
            "time,price,signal\n\
             1688601600000,30000.5,buy\n\
             2023-07-06 01:00:00,30100,hold\n\
             2023-07-06T02:00:00Z,30200,sell\n",
        )
        .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].time, 1_688_601_600_000);
        assert_eq!(rows[0].price, 30000.5);
        assert_eq!(rows[0].signal, Signal::Buy);
        assert_eq!(rows[1].time, 1_688_605_200_000);
        assert_eq!(rows[1].signal, Signal::Hold);
        assert_eq!(rows[2].time, 1_688_608_800_000);
        assert_eq!(rows[2].signal, Signal::Sell);
    }

    #[test]
    fn missing_signal_column_is_hold() {
        let rows = CsvAdapter::parse("time,price\n1000,1.0\n").unwrap();
        assert_eq!(rows[0].signal, Signal::Hold);
    }

    #[test]
    fn rows_are_sorted_by_time() {
        let rows = CsvAdapter::parse("time,price,signal\n3000,1,sell\n1000,1,buy\n").unwrap();
        assert_eq!(rows[0].time, 1000);
        assert_eq!(rows[1].time, 3000);
    }

    #[test]
    fn invalid_values_report_line() {
        let err = CsvAdapter::parse("time,price,signal\n1000,abc,buy\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));

        let err = CsvAdapter::parse("time,price,signal\nyesterday,1,buy\n").unwrap_err();
        assert!(err.to_string().contains("invalid time"));

        assert!(CsvAdapter::parse("time,price,signal\n1000,1,short\n").is_err());
    }

    #[test]
    fn fetch_signals_reads_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("signals.csv");
        fs::write(&path, "time,price,signal\n1000,10,buy\n2000,11,sell\n").unwrap();

        let rows = CsvAdapter::new(path).fetch_signals().unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn fetch_signals_missing_file_is_error() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/signals.csv"));
        assert!(matches!(
            adapter.fetch_signals(),
            Err(LedgerError::Data { .. })
        ));
    }
}
