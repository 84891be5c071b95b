//! Reconciliation runner — wires together ingest, engine, and result.
//!
//! Two entry points:
//! - `reconcile_tradebook()`: loads the CSV named by the config, then runs.
//!   Used by the CLI.
//! - `run_reconciliation()`: takes pre-loaded records — no IO, fully
//!   deterministic for a given `as_of`. Used by tests and embedders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tradebook_core::data::{load_tradebook, IngestError};
use tradebook_core::domain::{TradeRecord, TradeSide, ValuedLot};
use tradebook_core::engine::{
    aggregate, match_lots, partition_sides, value_lots, ValuationError,
};

use crate::config::{ConfigError, ReconcileConfig};
use crate::result::{PortfolioSummary, ReportInputs};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
    #[error("valuation error: {0}")]
    Valuation(#[from] ValuationError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Observation date open positions were stamped with.
    pub as_of: NaiveDate,
    /// blake3 content hash of the input ledger.
    pub dataset_hash: String,
    pub record_count: usize,
    /// Rows whose side was neither buy nor sell (dividends etc.).
    pub skipped_records: usize,
    pub lots: Vec<ValuedLot>,
    pub summary: PortfolioSummary,
    pub report_inputs: ReportInputs,
    /// The config that produced this result (for reruns and manifest viewing).
    pub config: ReconcileConfig,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Content hash of the input ledger (canonical JSON). Two runs over the
/// same ledger carry the same hash in their manifests.
pub fn ledger_hash(records: &[TradeRecord]) -> String {
    let json = serde_json::to_string(records).expect("TradeRecord serialization failed");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}

/// Load the tradebook named by the config and reconcile it.
///
/// This is the high-level entry point used by the CLI. For pre-loaded
/// records, use `run_reconciliation()` instead.
pub fn reconcile_tradebook(
    config: &ReconcileConfig,
    as_of: NaiveDate,
) -> Result<ReconcileResult, RunError> {
    let records = load_tradebook(&config.tradebook)?;
    run_reconciliation(config, &records, as_of)
}

/// Reconcile pre-loaded trade records — no IO.
///
/// Aggregates by (symbol, isin, side), matches buy against sell quantity
/// oldest-first, and values the resulting lots. Any stage error aborts the
/// whole run: portfolio weights are only meaningful over the complete set,
/// so partial results are never returned.
pub fn run_reconciliation(
    config: &ReconcileConfig,
    records: &[TradeRecord],
    as_of: NaiveDate,
) -> Result<ReconcileResult, RunError> {
    let dataset_hash = ledger_hash(records);
    let skipped_records = records
        .iter()
        .filter(|r| r.side == TradeSide::Unsupported)
        .count();

    let (buys, sells) = partition_sides(aggregate(records));
    let lots = match_lots(&buys, &sells, as_of);
    let valued = value_lots(lots, &config.market_suffix)?;

    let summary = PortfolioSummary::from_lots(&valued);
    let report_inputs =
        ReportInputs::derive(&valued).ok_or(RunError::Valuation(ValuationError::EmptyPortfolio))?;

    Ok(ReconcileResult {
        schema_version: SCHEMA_VERSION,
        as_of,
        dataset_hash,
        record_count: records.len(),
        skipped_records,
        lots: valued,
        summary,
        report_inputs,
        config: config.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        symbol: &str,
        side: TradeSide,
        quantity: f64,
        price: f64,
        date: (i32, u32, u32),
    ) -> TradeRecord {
        TradeRecord {
            symbol: symbol.into(),
            isin: format!("ISIN-{symbol}"),
            side,
            quantity,
            price,
            trade_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
    }

    #[test]
    fn reconciles_a_mixed_ledger() {
        let config = ReconcileConfig::new("unused.csv");
        let records = vec![
            record("TCS", TradeSide::Buy, 10.0, 3500.0, (2024, 1, 5)),
            record("TCS", TradeSide::Sell, 4.0, 3700.0, (2024, 2, 1)),
            record("INFY", TradeSide::Buy, 5.0, 1500.0, (2024, 1, 8)),
            record("INFY", TradeSide::Unsupported, 1.0, 0.0, (2024, 1, 9)),
        ];

        let result = run_reconciliation(&config, &records, as_of()).unwrap();

        assert_eq!(result.schema_version, SCHEMA_VERSION);
        assert_eq!(result.record_count, 4);
        assert_eq!(result.skipped_records, 1);
        // TCS: one closed lot (4) + one open remainder (6); INFY: one open lot.
        assert_eq!(result.summary.lot_count, 3);
        assert_eq!(result.summary.closed_lots, 1);
        assert_eq!(result.summary.open_lots, 2);
        assert_eq!(result.summary.instrument_count, 2);

        let weight_sum: f64 = result.lots.iter().map(|v| v.weight).sum();
        assert!((weight_sum - 1.0).abs() < 1e-9);

        assert_eq!(result.report_inputs.tickers, vec!["INFY.NS", "TCS.NS"]);
        assert_eq!(
            result.report_inputs.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
        // Open lots extend the range to the observation date.
        assert_eq!(result.report_inputs.end_date, as_of());
    }

    #[test]
    fn empty_ledger_fails_with_valuation_error() {
        let config = ReconcileConfig::new("unused.csv");
        let err = run_reconciliation(&config, &[], as_of()).unwrap_err();
        assert!(matches!(
            err,
            RunError::Valuation(ValuationError::EmptyPortfolio)
        ));
    }

    #[test]
    fn ledger_hash_is_deterministic_and_content_sensitive() {
        let a = vec![record("TCS", TradeSide::Buy, 10.0, 3500.0, (2024, 1, 5))];
        let b = vec![record("TCS", TradeSide::Buy, 11.0, 3500.0, (2024, 1, 5))];

        assert_eq!(ledger_hash(&a), ledger_hash(&a));
        assert_ne!(ledger_hash(&a), ledger_hash(&b));
    }

    #[test]
    fn missing_tradebook_file_surfaces_ingest_error() {
        let config = ReconcileConfig::new("does/not/exist.csv");
        let err = reconcile_tradebook(&config, as_of()).unwrap_err();
        assert!(matches!(err, RunError::Ingest(IngestError::Io { .. })));
    }
}
