//! Reconciliation export — JSON, CSV, and Markdown artifact generation.
//!
//! Three export surfaces for a reconciliation run:
//! - **JSON**: full round-trip serialization with schema versioning
//! - **CSV**: the lot tape for external analysis tools
//! - **Markdown**: a human-readable run report
//!
//! All persisted manifests include a `schema_version` field. Unknown
//! versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tradebook_core::domain::{LotStatus, ValuedLot};

use crate::runner::{ReconcileResult, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `ReconcileResult` to pretty JSON.
pub fn export_json(result: &ReconcileResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize ReconcileResult to JSON")
}

/// Deserialize a `ReconcileResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ReconcileResult> {
    let result: ReconcileResult =
        serde_json::from_str(json).context("failed to deserialize ReconcileResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Export the lot tape as CSV.
///
/// Columns: ticker, symbol, isin, status, quantity, buy_date, buy_price,
/// sell_date, sell_price, invested_notional, weight, holding_days
pub fn export_lots_csv(lots: &[ValuedLot]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "ticker",
        "symbol",
        "isin",
        "status",
        "quantity",
        "buy_date",
        "buy_price",
        "sell_date",
        "sell_price",
        "invested_notional",
        "weight",
        "holding_days",
    ])?;

    for v in lots {
        let status = match v.lot.status {
            LotStatus::Closed => "closed",
            LotStatus::Open => "open",
        };
        wtr.write_record([
            &v.ticker,
            &v.lot.symbol,
            &v.lot.isin,
            status,
            &format!("{:.6}", v.lot.quantity),
            &v.lot.buy_date.to_string(),
            &format!("{:.6}", v.lot.buy_price),
            &v.lot.sell_date.to_string(),
            &format!("{:.6}", v.lot.sell_price),
            &format!("{:.2}", v.invested_notional),
            &format!("{:.6}", v.weight),
            &v.lot.holding_days().to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Markdown report ────────────────────────────────────────────────

/// Generate a Markdown report for a reconciliation run.
pub fn generate_report(result: &ReconcileResult) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Reconciliation Report\n\n");

    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!(
        "| Tradebook | {} |\n",
        result.config.tradebook.display()
    ));
    md.push_str(&format!("| As of | {} |\n", result.as_of));
    md.push_str(&format!(
        "| Records | {} ({} skipped) |\n",
        result.record_count, result.skipped_records
    ));
    md.push_str(&format!("| Dataset Hash | {} |\n", result.dataset_hash));
    md.push('\n');

    let s = &result.summary;
    md.push_str("## Portfolio Summary\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Lots | {} |\n", s.lot_count));
    md.push_str(&format!("| Closed | {} |\n", s.closed_lots));
    md.push_str(&format!("| Open | {} |\n", s.open_lots));
    md.push_str(&format!("| Instruments | {} |\n", s.instrument_count));
    md.push_str(&format!("| Total Invested | {:.2} |\n", s.total_invested));
    md.push_str(&format!(
        "| Realized Proceeds | {:.2} |\n",
        s.realized_proceeds
    ));
    md.push('\n');

    let r = &result.report_inputs;
    md.push_str("## Report Inputs\n\n");
    md.push_str(&format!(
        "- **Period**: {} to {}\n",
        r.start_date, r.end_date
    ));
    md.push_str(&format!("- **Tickers**: {}\n", r.tickers.join(", ")));
    md.push('\n');

    md.push_str("## Lots\n\n");
    md.push_str("| Ticker | Status | Qty | Buy Date | Buy Price | Sell Date | Sell Price | Weight |\n");
    md.push_str("| --- | --- | ---: | --- | ---: | --- | ---: | ---: |\n");
    for v in &result.lots {
        let status = if v.lot.is_open() { "open" } else { "closed" };
        md.push_str(&format!(
            "| {} | {} | {} | {} | {:.2} | {} | {:.2} | {:.2}% |\n",
            v.ticker,
            status,
            v.lot.quantity,
            v.lot.buy_date,
            v.lot.buy_price,
            v.lot.sell_date,
            v.lot.sell_price,
            v.weight * 100.0
        ));
    }
    md.push('\n');

    md
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the full artifact set for a reconciliation run.
///
/// Creates a directory named `tradebook_{timestamp}/` under `output_dir`
/// containing:
/// - `manifest.json` — the full `ReconcileResult`
/// - `lots.csv` — the lot tape
/// - `report.md` — human-readable summary
///
/// Returns the path to the created directory.
pub fn save_artifacts(result: &ReconcileResult, output_dir: &Path) -> Result<PathBuf> {
    let dirname = format!(
        "tradebook_{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let run_dir = output_dir.join(dirname);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let json = export_json(result)?;
    std::fs::write(run_dir.join("manifest.json"), &json)?;

    let lots_csv = export_lots_csv(&result.lots)?;
    std::fs::write(run_dir.join("lots.csv"), &lots_csv)?;

    let report = generate_report(result);
    std::fs::write(run_dir.join("report.md"), &report)?;

    Ok(run_dir)
}

/// Load a `ReconcileResult` from an artifact directory's manifest.json.
///
/// Rejects unknown schema versions.
pub fn load_artifacts(dir: &Path) -> Result<ReconcileResult> {
    let manifest_path = dir.join("manifest.json");
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReconcileConfig;
    use crate::result::{PortfolioSummary, ReportInputs};
    use chrono::NaiveDate;
    use tradebook_core::domain::MatchedLot;

    // ─── Test helpers ────────────────────────────────────────────────

    fn sample_lot() -> ValuedLot {
        ValuedLot {
            ticker: "TCS.NS".into(),
            invested_notional: 35_000.0,
            weight: 1.0,
            lot: MatchedLot {
                symbol: "TCS".into(),
                isin: "INE467B01029".into(),
                quantity: 10.0,
                buy_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                buy_price: 3500.0,
                sell_date: NaiveDate::from_ymd_opt(2024, 2, 9).unwrap(),
                sell_price: 3720.0,
                status: LotStatus::Closed,
            },
        }
    }

    fn sample_result() -> ReconcileResult {
        let lots = vec![sample_lot()];
        ReconcileResult {
            schema_version: SCHEMA_VERSION,
            as_of: NaiveDate::from_ymd_opt(2024, 6, 28).unwrap(),
            dataset_hash: "abc123".into(),
            record_count: 2,
            skipped_records: 0,
            summary: PortfolioSummary::from_lots(&lots),
            report_inputs: ReportInputs::derive(&lots).unwrap(),
            lots,
            config: ReconcileConfig::new("tradebook.csv"),
        }
    }

    // ─── JSON round-trip ─────────────────────────────────────────────

    #[test]
    fn json_roundtrip() {
        let original = sample_result();
        let json = export_json(&original).unwrap();
        let restored = import_json(&json).unwrap();

        assert_eq!(restored, original);
    }

    #[test]
    fn json_rejects_unknown_version() {
        let mut result = sample_result();
        result.schema_version = 99;
        let json = export_json(&result).unwrap();
        let err = import_json(&json);
        assert!(err.is_err());
        let msg = err.unwrap_err().to_string();
        assert!(msg.contains("unsupported schema version 99"));
    }

    // ─── CSV lots ───────────────────────────────────────────────────

    #[test]
    fn csv_lots_all_columns() {
        let csv = export_lots_csv(&[sample_lot()]).unwrap();
        let header = csv.lines().next().unwrap();
        let cols: Vec<&str> = header.split(',').collect();

        assert_eq!(cols.len(), 12);
        assert!(cols.contains(&"ticker"));
        assert!(cols.contains(&"status"));
        assert!(cols.contains(&"quantity"));
        assert!(cols.contains(&"buy_date"));
        assert!(cols.contains(&"sell_price"));
        assert!(cols.contains(&"invested_notional"));
        assert!(cols.contains(&"weight"));
        assert!(cols.contains(&"holding_days"));
    }

    #[test]
    fn csv_lots_content() {
        let csv = export_lots_csv(&[sample_lot()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2); // header + 1 data row
        let row = lines[1];
        assert!(row.contains("TCS.NS"));
        assert!(row.contains("closed"));
        assert!(row.contains("2024-01-05"));
        assert!(row.contains("35000.00"));
    }

    #[test]
    fn csv_empty_lots() {
        let csv = export_lots_csv(&[]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1); // header only
    }

    // ─── Markdown report ────────────────────────────────────────────

    #[test]
    fn markdown_report_has_sections() {
        let md = generate_report(&sample_result());

        assert!(md.contains("# Reconciliation Report"));
        assert!(md.contains("## Metadata"));
        assert!(md.contains("## Portfolio Summary"));
        assert!(md.contains("## Report Inputs"));
        assert!(md.contains("## Lots"));
        assert!(md.contains("TCS.NS"));
        assert!(md.contains("| Dataset Hash | abc123 |"));
    }

    // ─── Save/load artifacts ────────────────────────────────────────

    #[test]
    fn save_load_artifacts_roundtrip() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let run_dir = save_artifacts(&result, dir.path()).unwrap();

        assert!(run_dir.join("manifest.json").exists());
        assert!(run_dir.join("lots.csv").exists());
        assert!(run_dir.join("report.md").exists());

        let loaded = load_artifacts(&run_dir).unwrap();
        assert_eq!(loaded, result);
    }
}
