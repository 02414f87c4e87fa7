// In app/src/feed.rs

use anyhow::{Context, Result};
use core_types::Candle;
use std::path::Path;

/// Reads a 6-column candle CSV (time, open, high, low, close, volume).
///
/// Rows that fail to parse or validate are logged and skipped; the feed
/// continues with the next valid row, matching how the engine treats a
/// malformed candle mid-stream.
pub fn read_candles(path: &Path) -> Result<Vec<Candle>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut candles = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        match parse_row(&record) {
            Ok(candle) => candles.push(candle),
            Err(err) => {
                tracing::warn!(line = line + 1, error = %err, "skipping malformed candle row");
            }
        }
    }
    Ok(candles)
}

fn parse_row(record: &csv::StringRecord) -> Result<Candle> {
    if record.len() != 6 {
        anyhow::bail!("expected 6 columns, found {}", record.len());
    }
    let mut row = [0.0f64; 6];
    for (i, field) in record.iter().enumerate() {
        row[i] = field
            .parse()
            .with_context(|| format!("column {i} ({field:?})"))?;
    }
    Ok(Candle::from_row(row)?)
}
