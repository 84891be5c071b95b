//! CSV tradebook loader.
//!
//! Expected header: `symbol,isin,trade_type,quantity,price,trade_date` with
//! ISO dates (YYYY-MM-DD). Validation fails fast: the first malformed row
//! aborts the load with its line number. Unknown trade types are NOT
//! malformed — they parse to [`TradeSide::Unsupported`] and are dropped
//! later by the aggregator.

use crate::domain::{TradeRecord, TradeSide};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to open tradebook {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed trade record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },
}

/// One raw CSV row before validation. Dates stay as strings so a bad date
/// reports as a malformed record with a line number, not a csv-crate error.
#[derive(Debug, Deserialize)]
struct RawTradeRow {
    symbol: String,
    isin: String,
    trade_type: TradeSide,
    quantity: f64,
    price: f64,
    trade_date: String,
}

/// Load and validate a tradebook CSV file.
pub fn load_tradebook(path: &Path) -> Result<Vec<TradeRecord>, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    read_tradebook(file)
}

/// Read and validate tradebook CSV from any reader.
pub fn read_tradebook<R: Read>(reader: R) -> Result<Vec<TradeRecord>, IngestError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in rdr.deserialize::<RawTradeRow>().enumerate() {
        // Line 1 is the header, so data row N sits on line N + 1.
        let line = index + 2;
        let row = row?;
        records.push(validate_row(row, line)?);
    }

    Ok(records)
}

fn validate_row(row: RawTradeRow, line: usize) -> Result<TradeRecord, IngestError> {
    let malformed = |reason: String| IngestError::MalformedRecord { line, reason };

    if row.symbol.trim().is_empty() {
        return Err(malformed("empty symbol".into()));
    }
    if row.isin.trim().is_empty() {
        return Err(malformed("empty isin".into()));
    }
    if !row.quantity.is_finite() || row.quantity <= 0.0 {
        return Err(malformed(format!(
            "quantity must be a positive number, got {}",
            row.quantity
        )));
    }
    if !row.price.is_finite() || row.price < 0.0 {
        return Err(malformed(format!(
            "price must be a non-negative number, got {}",
            row.price
        )));
    }
    let trade_date = NaiveDate::parse_from_str(&row.trade_date, "%Y-%m-%d")
        .map_err(|e| malformed(format!("invalid trade_date '{}': {e}", row.trade_date)))?;

    Ok(TradeRecord {
        symbol: row.symbol,
        isin: row.isin,
        side: row.trade_type,
        quantity: row.quantity,
        price: row.price,
        trade_date,
    })
}
