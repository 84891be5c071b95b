//! SideSummary — one aggregated side of a position.

use super::trade::TradeSide;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate of all executions sharing (symbol, isin, side).
///
/// `trade_date` is asymmetric on purpose: a buy summary carries the earliest
/// date in its group (the position was opened by the first purchase), a sell
/// summary carries the latest (the position was closed by the last sale).
///
/// `price` is the unweighted arithmetic mean of the constituent prices. This
/// can misstate cost basis when trade sizes vary; it is inherited behavior
/// and stays until product sign-off says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideSummary {
    pub symbol: String,
    pub isin: String,
    pub side: TradeSide,
    /// Sum of constituent quantities; always > 0.
    pub quantity: f64,
    pub trade_date: NaiveDate,
    pub price: f64,
}
