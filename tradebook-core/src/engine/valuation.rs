//! Position valuation — invested notional and portfolio weights per lot.

use crate::domain::{MatchedLot, ValuedLot};

#[derive(Debug, thiserror::Error)]
pub enum ValuationError {
    /// Weights are a fraction of total invested capital; with nothing
    /// invested they are undefined and the whole report is meaningless.
    #[error("portfolio has no invested notional to weight against")]
    EmptyPortfolio,
}

/// Value each lot: normalized ticker, invested notional, portfolio weight.
///
/// The ticker is the symbol with `market_suffix` appended (e.g. ".NS").
/// Invested notional is quantity x buy price in f64 with no intermediate
/// rounding. Weights are fractions of the total invested notional and sum
/// to 1.0 within floating-point tolerance.
///
/// Errors with [`ValuationError::EmptyPortfolio`] when the lot set is empty
/// or carries zero total invested notional, rather than emitting NaN
/// weights. Pure function.
pub fn value_lots(
    lots: Vec<MatchedLot>,
    market_suffix: &str,
) -> Result<Vec<ValuedLot>, ValuationError> {
    let total_invested: f64 = lots.iter().map(MatchedLot::invested_notional).sum();

    if lots.is_empty() || total_invested == 0.0 {
        return Err(ValuationError::EmptyPortfolio);
    }

    Ok(lots
        .into_iter()
        .map(|lot| {
            let invested_notional = lot.invested_notional();
            ValuedLot {
                ticker: format!("{}{}", lot.symbol, market_suffix),
                weight: invested_notional / total_invested,
                invested_notional,
                lot,
            }
        })
        .collect())
}
