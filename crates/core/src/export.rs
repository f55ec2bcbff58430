//! Exporting loaded history as CSV or a JSON snapshot.

use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use krxtrack_market_data::{History, InstrumentProfile, Symbol};

use crate::constants::DISPLAY_TZ;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV export failed: {0}")]
    CsvFlush(#[from] std::io::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export produced invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: &'a Decimal,
    #[serde(rename = "High")]
    high: &'a Decimal,
    #[serde(rename = "Low")]
    low: &'a Decimal,
    #[serde(rename = "Close")]
    close: &'a Decimal,
    #[serde(rename = "Volume")]
    volume: &'a Decimal,
}

/// Render a history as CSV with one row per bar, dates in the display
/// timezone, oldest first.
pub fn history_to_csv(history: &History) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for quote in history.quotes() {
        writer.serialize(CsvRow {
            date: quote
                .timestamp
                .with_timezone(&DISPLAY_TZ)
                .format("%Y-%m-%d")
                .to_string(),
            open: &quote.open,
            high: &quote.high,
            low: &quote.low,
            close: &quote.close,
            volume: &quote.volume,
        })?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// One bar in the JSON snapshot, timestamped in the display timezone.
#[derive(Serialize)]
pub struct SnapshotRow {
    pub timestamp: String,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// One symbol's state at export time.
#[derive(Serialize)]
pub struct Snapshot<'a> {
    pub symbol: &'a str,
    pub exchange: &'a str,
    pub currency: &'a str,
    /// Export timestamp, RFC 3339 in the display timezone.
    pub exported_at: String,
    pub latest_close: Option<Decimal>,
    pub period_high: Option<Decimal>,
    pub period_low: Option<Decimal>,
    pub average_volume: Option<f64>,
    pub bar_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<&'a InstrumentProfile>,
    pub rows: Vec<SnapshotRow>,
}

/// Summarize a symbol's history into a JSON snapshot document.
pub fn snapshot_to_json(
    symbol: &Symbol,
    history: &History,
    profile: Option<&InstrumentProfile>,
    now: DateTime<Utc>,
) -> Result<String, ExportError> {
    let period_high = history.quotes().iter().map(|q| q.high).max();
    let period_low = history.quotes().iter().map(|q| q.low).min();
    let average_volume = if history.is_empty() {
        None
    } else {
        let total: f64 = history
            .quotes()
            .iter()
            .filter_map(|q| q.volume.to_f64())
            .sum();
        Some(total / history.len() as f64)
    };

    let rows = history
        .quotes()
        .iter()
        .map(|q| SnapshotRow {
            timestamp: q.timestamp.with_timezone(&DISPLAY_TZ).to_rfc3339(),
            open: q.open,
            high: q.high,
            low: q.low,
            close: q.close,
            volume: q.volume,
        })
        .collect();

    let snapshot = Snapshot {
        symbol: symbol.as_str(),
        exchange: symbol.exchange().label(),
        currency: symbol.currency().code(),
        exported_at: now.with_timezone(&DISPLAY_TZ).to_rfc3339(),
        latest_close: history.latest_close(),
        period_high,
        period_low,
        average_volume,
        bar_count: history.len(),
        profile,
        rows,
    };
    Ok(serde_json::to_string_pretty(&snapshot)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use krxtrack_market_data::Quote;
    use rust_decimal_macros::dec;

    fn sample_history() -> History {
        let quotes = vec![
            Quote {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap(),
                open: dec!(70000),
                high: dec!(71500),
                low: dec!(69800),
                close: dec!(71000),
                volume: dec!(12000000),
            },
            Quote {
                timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap(),
                open: dec!(71000),
                high: dec!(72200),
                low: dec!(70500),
                close: dec!(72000),
                volume: dec!(9500000),
            },
        ];
        History::from_quotes(quotes)
    }

    #[test]
    fn test_history_to_csv_layout() {
        let csv = history_to_csv(&sample_history()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "Date,Open,High,Low,Close,Volume");
        assert_eq!(
            lines.next().unwrap(),
            "2024-03-04,70000,71500,69800,71000,12000000"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-03-05,71000,72200,70500,72000,9500000"
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_history_to_csv_empty_history() {
        let csv = history_to_csv(&History::from_quotes(Vec::new())).unwrap();
        assert!(csv.is_empty());
    }

    #[test]
    fn test_snapshot_summary_fields() {
        let symbol = Symbol::new("005930.KS");
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap();
        let json = snapshot_to_json(&symbol, &sample_history(), None, now).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["symbol"], "005930.KS");
        assert_eq!(value["currency"], "KRW");
        assert_eq!(value["bar_count"], 2);
        assert_eq!(value["latest_close"], "72000");
        assert_eq!(value["period_high"], "72200");
        assert_eq!(value["period_low"], "69800");
        assert!((value["average_volume"].as_f64().unwrap() - 10_750_000.0).abs() < 1.0);
        assert!(value.get("profile").is_none());

        let rows = value["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["close"], "72000");
        assert!(rows[0]["timestamp"].as_str().unwrap().starts_with("2024-03-04"));
    }
}
