//! MatchedLot and ValuedLot — the reconciler's output units.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether a lot's sell side is a real sale or the still-held marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotStatus {
    Closed,
    Open,
}

/// A matched round-trip lot: a quantity bought once and sold once (or still
/// held). Immutable once emitted by the matcher.
///
/// For `Open` lots `sell_date` is the observation date the matcher was given
/// and `sell_price` is 0.0 — no realized proceeds yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedLot {
    pub symbol: String,
    pub isin: String,
    /// Matched quantity; always > 0.
    pub quantity: f64,
    pub buy_date: NaiveDate,
    pub buy_price: f64,
    pub sell_date: NaiveDate,
    pub sell_price: f64,
    pub status: LotStatus,
}

impl MatchedLot {
    pub fn is_open(&self) -> bool {
        self.status == LotStatus::Open
    }

    /// Capital invested in this lot.
    pub fn invested_notional(&self) -> f64 {
        self.quantity * self.buy_price
    }

    /// Realized proceeds; zero for open lots.
    pub fn realized_proceeds(&self) -> f64 {
        self.quantity * self.sell_price
    }

    /// Calendar days between buy and sell (observation date for open lots).
    pub fn holding_days(&self) -> i64 {
        (self.sell_date - self.buy_date).num_days()
    }
}

/// A matched lot plus its valuation: normalized ticker, invested notional,
/// and share of total invested capital. Read-only derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuedLot {
    pub lot: MatchedLot,
    /// Symbol with the market suffix appended (e.g. "TCS.NS"). A local
    /// formatting step, not a source-of-truth rename.
    pub ticker: String,
    pub invested_notional: f64,
    /// Fraction of total invested notional across the full result set.
    pub weight: f64,
}
