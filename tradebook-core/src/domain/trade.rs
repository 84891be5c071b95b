//! TradeRecord — one raw execution from the tradebook.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Transaction direction of a raw execution.
///
/// Tradebooks exported from brokers carry other row types in the same file
/// (dividends, buybacks, short legs). Those deserialize to `Unsupported` and
/// are dropped at aggregation rather than rejected at load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
    Unsupported,
}

// Plain string enums cannot use #[serde(other)], so the catch-all needs a
// manual impl. Matching is case-sensitive: "Buy" is not a buy.
impl<'de> Deserialize<'de> for TradeSide {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "buy" => TradeSide::Buy,
            "sell" => TradeSide::Sell,
            _ => TradeSide::Unsupported,
        })
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
            TradeSide::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// A single executed trade: one row of the tradebook, immutable.
///
/// The loader guarantees quantity > 0 and price >= 0; the engine relies on
/// that contract rather than re-validating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    /// Instrument identifier (ISIN). Symbol alone is not unique across
    /// listings, so grouping always uses the (symbol, isin) pair.
    pub isin: String,
    pub side: TradeSide,
    pub quantity: f64,
    pub price: f64,
    pub trade_date: NaiveDate,
}

impl TradeRecord {
    /// Notional value of this single execution.
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }
}
