//! Tradebook CLI — reconcile and validate commands.
//!
//! Commands:
//! - `run` — reconcile a tradebook CSV into matched lots, print a summary,
//!   and save the artifact bundle (manifest.json, lots.csv, report.md)
//! - `validate` — parse and validate a tradebook without reconciling

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tradebook_core::data::load_tradebook;
use tradebook_core::domain::TradeSide;
use tradebook_runner::{
    reconcile_tradebook, save_artifacts, ReconcileConfig, ReconcileResult,
};

#[derive(Parser)]
#[command(
    name = "tradebook",
    about = "Tradebook reconciler — buy/sell lot matching and portfolio weights"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile a tradebook into matched lots and save artifacts.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Path to the tradebook CSV (instead of --config).
        #[arg(long)]
        tradebook: Option<PathBuf>,

        /// Observation date for open positions (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        as_of: Option<String>,

        /// Market suffix appended to symbols (e.g. .NS).
        #[arg(long, default_value = ".NS")]
        suffix: String,

        /// Output directory for the artifact bundle.
        #[arg(long, default_value = "results")]
        output_dir: PathBuf,
    },
    /// Parse and validate a tradebook, reporting per-side row counts.
    Validate {
        /// Path to the tradebook CSV.
        #[arg(long)]
        tradebook: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            tradebook,
            as_of,
            suffix,
            output_dir,
        } => run_cmd(config, tradebook, as_of, suffix, output_dir),
        Commands::Validate { tradebook } => validate_cmd(&tradebook),
    }
}

fn run_cmd(
    config_path: Option<PathBuf>,
    tradebook: Option<PathBuf>,
    as_of: Option<String>,
    suffix: String,
    output_dir: PathBuf,
) -> Result<()> {
    if config_path.is_some() && tradebook.is_some() {
        bail!("--config and --tradebook are mutually exclusive");
    }

    let config = if let Some(path) = config_path {
        ReconcileConfig::from_file(&path)?
    } else if let Some(path) = tradebook {
        let mut config = ReconcileConfig::new(path);
        config.market_suffix = suffix;
        config.output_dir = output_dir;
        config
    } else {
        bail!("one of --config or --tradebook is required");
    };

    // The only wall-clock read in the pipeline: everything below takes the
    // observation date as an explicit parameter.
    let as_of = match as_of.as_deref() {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")?,
        None => config
            .as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
    };

    let result = reconcile_tradebook(&config, as_of)?;

    print_summary(&result);

    let run_dir = save_artifacts(&result, &config.output_dir)?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}

fn validate_cmd(tradebook: &Path) -> Result<()> {
    let records = match load_tradebook(tradebook) {
        Ok(records) => records,
        Err(err) => {
            eprintln!("Invalid tradebook: {err}");
            std::process::exit(1);
        }
    };

    let buys = records.iter().filter(|r| r.side == TradeSide::Buy).count();
    let sells = records.iter().filter(|r| r.side == TradeSide::Sell).count();
    let other = records.len() - buys - sells;

    println!("Tradebook OK: {}", tradebook.display());
    println!("Rows:   {}", records.len());
    println!("Buys:   {buys}");
    println!("Sells:  {sells}");
    println!("Other:  {other} (ignored at aggregation)");

    Ok(())
}

fn print_summary(result: &ReconcileResult) {
    let s = &result.summary;
    let r = &result.report_inputs;

    println!();
    println!("=== Reconciliation Result ===");
    println!("Tradebook:      {}", result.config.tradebook.display());
    println!(
        "Records:        {} ({} skipped)",
        result.record_count, result.skipped_records
    );
    println!("As of:          {}", result.as_of);
    println!("Dataset hash:   {}", result.dataset_hash);
    println!();
    println!("--- Portfolio ---");
    println!("Lots:           {} ({} open)", s.lot_count, s.open_lots);
    println!("Instruments:    {}", s.instrument_count);
    println!("Invested:       {:.2}", s.total_invested);
    println!("Realized:       {:.2}", s.realized_proceeds);
    println!("Period:         {} to {}", r.start_date, r.end_date);
    println!("Tickers:        {}", r.tickers.join(", "));
    println!();
}
