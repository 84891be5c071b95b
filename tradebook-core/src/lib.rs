//! Tradebook Core — domain types, ingest, and the reconciliation engine.
//!
//! This crate contains the heart of the tradebook reconciler:
//! - Domain types (trade records, side summaries, matched and valued lots)
//! - CSV tradebook ingest with fail-fast validation
//! - Side aggregation (per symbol/ISIN/side summaries)
//! - Greedy oldest-first lot matching with open-position handling
//! - Position valuation (invested notional and portfolio weights)
//!
//! Everything below the ingest reader is pure and deterministic: no IO, no
//! wall-clock reads. The observation date for open positions is always an
//! explicit parameter.

pub mod data;
pub mod domain;
pub mod engine;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all core domain types are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::TradeRecord>();
        require_sync::<domain::TradeRecord>();
        require_send::<domain::TradeSide>();
        require_sync::<domain::TradeSide>();
        require_send::<domain::SideSummary>();
        require_sync::<domain::SideSummary>();
        require_send::<domain::MatchedLot>();
        require_sync::<domain::MatchedLot>();
        require_send::<domain::ValuedLot>();
        require_sync::<domain::ValuedLot>();

        require_send::<data::IngestError>();
        require_sync::<data::IngestError>();
        require_send::<engine::ValuationError>();
        require_sync::<engine::ValuationError>();
    }
}
