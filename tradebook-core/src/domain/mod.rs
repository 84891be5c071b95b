//! Domain types for the tradebook reconciler.

pub mod lot;
pub mod summary;
pub mod trade;

pub use lot::{LotStatus, MatchedLot, ValuedLot};
pub use summary::SideSummary;
pub use trade::{TradeRecord, TradeSide};

/// Symbol type alias
pub type Symbol = String;
