//! Derived portfolio summary and reporter inputs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tradebook_core::domain::ValuedLot;

/// Headline numbers over the full valued lot set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub lot_count: usize,
    pub closed_lots: usize,
    pub open_lots: usize,
    /// Distinct (symbol, isin) instruments across all lots.
    pub instrument_count: usize,
    pub total_invested: f64,
    /// Sum of realized sale proceeds; open lots contribute nothing.
    pub realized_proceeds: f64,
}

impl PortfolioSummary {
    pub fn from_lots(lots: &[ValuedLot]) -> Self {
        let open_lots = lots.iter().filter(|v| v.lot.is_open()).count();
        let instruments: BTreeSet<(&str, &str)> = lots
            .iter()
            .map(|v| (v.lot.symbol.as_str(), v.lot.isin.as_str()))
            .collect();

        Self {
            lot_count: lots.len(),
            closed_lots: lots.len() - open_lots,
            open_lots,
            instrument_count: instruments.len(),
            total_invested: lots.iter().map(|v| v.invested_notional).sum(),
            realized_proceeds: lots.iter().map(|v| v.lot.realized_proceeds()).sum(),
        }
    }
}

/// What the external reporting collaborator needs and nothing more:
/// the tickers to fetch returns for and the date range to span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportInputs {
    /// Sorted, de-duplicated tickers.
    pub tickers: Vec<String>,
    /// Earliest buy date across all lots.
    pub start_date: NaiveDate,
    /// Latest sell date across all lots; open lots already carry the
    /// observation date, so "still held" extends the range to as-of.
    pub end_date: NaiveDate,
}

impl ReportInputs {
    /// Derive reporter inputs; `None` for an empty lot set.
    pub fn derive(lots: &[ValuedLot]) -> Option<Self> {
        let start_date = lots.iter().map(|v| v.lot.buy_date).min()?;
        let end_date = lots.iter().map(|v| v.lot.sell_date).max()?;
        let tickers: BTreeSet<String> = lots.iter().map(|v| v.ticker.clone()).collect();

        Some(Self {
            tickers: tickers.into_iter().collect(),
            start_date,
            end_date,
        })
    }
}
