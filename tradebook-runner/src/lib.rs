//! Tradebook Runner — reconciliation orchestration and artifact export.
//!
//! This crate builds on `tradebook-core` to provide:
//! - TOML run configuration
//! - The reconciliation runner (ingest → aggregate → match → value)
//! - Portfolio summaries and reporter-collaborator inputs
//! - JSON/CSV/Markdown export with schema-versioned manifests

pub mod config;
pub mod export;
pub mod result;
pub mod runner;

pub use config::{ConfigError, ReconcileConfig};
pub use export::{
    export_json, export_lots_csv, generate_report, import_json, load_artifacts, save_artifacts,
};
pub use result::{PortfolioSummary, ReportInputs};
pub use runner::{
    ledger_hash, reconcile_tradebook, run_reconciliation, ReconcileResult, RunError,
    SCHEMA_VERSION,
};
