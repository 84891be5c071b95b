//! Side aggregation — collapses raw executions into per-side summaries.

use crate::domain::{SideSummary, TradeRecord, TradeSide};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Running accumulator for one (symbol, isin, side) group.
struct GroupAcc {
    quantity: f64,
    price_sum: f64,
    count: usize,
    min_date: NaiveDate,
    max_date: NaiveDate,
}

/// Aggregate raw executions into one summary per (symbol, isin, side).
///
/// - Buy summaries carry the earliest trade date in the group, sell
///   summaries the latest.
/// - Price is the unweighted mean of constituent prices.
/// - Records with an unsupported side contribute to nothing.
///
/// Output order is deterministic: ascending (symbol, isin, side). Pure
/// function over its input.
pub fn aggregate(records: &[TradeRecord]) -> Vec<SideSummary> {
    let mut groups: BTreeMap<(String, String, TradeSide), GroupAcc> = BTreeMap::new();

    for record in records {
        if record.side == TradeSide::Unsupported {
            continue;
        }

        let key = (record.symbol.clone(), record.isin.clone(), record.side);
        groups
            .entry(key)
            .and_modify(|acc| {
                acc.quantity += record.quantity;
                acc.price_sum += record.price;
                acc.count += 1;
                acc.min_date = acc.min_date.min(record.trade_date);
                acc.max_date = acc.max_date.max(record.trade_date);
            })
            .or_insert(GroupAcc {
                quantity: record.quantity,
                price_sum: record.price,
                count: 1,
                min_date: record.trade_date,
                max_date: record.trade_date,
            });
    }

    groups
        .into_iter()
        .map(|((symbol, isin, side), acc)| SideSummary {
            symbol,
            isin,
            side,
            quantity: acc.quantity,
            trade_date: match side {
                TradeSide::Sell => acc.max_date,
                _ => acc.min_date,
            },
            price: acc.price_sum / acc.count as f64,
        })
        .collect()
}

/// Split summaries into (buys, sells), preserving order.
pub fn partition_sides(summaries: Vec<SideSummary>) -> (Vec<SideSummary>, Vec<SideSummary>) {
    summaries
        .into_iter()
        .filter(|s| s.side != TradeSide::Unsupported)
        .partition(|s| s.side == TradeSide::Buy)
}
