//! Tradebook ingestion.

pub mod ingest;

pub use ingest::{load_tradebook, read_tradebook, IngestError};
