//! Lot matching — pairs aggregated buy and sell quantity into round-trip lots.
//!
//! Greedy oldest-first consumption: within each (symbol, isin) group the
//! buy and sell summaries are ordered by date and consumed front-to-front
//! with a two-cursor scan. Quantities are compared exactly, with no epsilon.
//! Whatever buy quantity survives the scan becomes an open lot stamped with
//! the injected observation date; this is never an error.

use crate::domain::{LotStatus, MatchedLot, SideSummary};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One queue entry: an aggregated side with its still-unmatched quantity.
/// The original summary quantity is not needed once the entry is built.
struct QueueEntry {
    trade_date: NaiveDate,
    price: f64,
    remaining: f64,
}

impl QueueEntry {
    fn from_summary(summary: &SideSummary) -> Self {
        Self {
            trade_date: summary.trade_date,
            price: summary.price,
            remaining: summary.quantity,
        }
    }
}

/// Match buy summaries against sell summaries, producing round-trip lots.
///
/// The matcher imposes its own total order (groups ascending by
/// (symbol, isin); entries within a group ascending by date, ties keeping
/// input order), so output is reproducible regardless of upstream ordering.
///
/// Per group, with `b` the oldest live buy and `s` the oldest live sell:
/// - `b.remaining == s.remaining` → emit one lot, retire both.
/// - `b.remaining >  s.remaining` → emit a lot for the sell's quantity,
///   reduce the buy, retire the sell.
/// - `b.remaining <  s.remaining` → emit a lot for the buy's quantity,
///   reduce the sell, retire the buy. A single sell may close several buys.
///
/// Residual buy quantity becomes one open lot per surviving buy entry, with
/// `sell_date = as_of` and `sell_price = 0.0`. Residual sell quantity is
/// dropped: short inventory is not reconciled.
///
/// Conservation invariant: per (symbol, isin), emitted lot quantities sum
/// exactly to the total buy quantity; nothing is created or lost.
pub fn match_lots(
    buys: &[SideSummary],
    sells: &[SideSummary],
    as_of: NaiveDate,
) -> Vec<MatchedLot> {
    // Index-based queues per group; entries are never removed, only their
    // remaining quantity shrinks and a cursor moves past them.
    let mut groups: BTreeMap<(String, String), (Vec<QueueEntry>, Vec<QueueEntry>)> =
        BTreeMap::new();

    for buy in buys {
        let key = (buy.symbol.clone(), buy.isin.clone());
        groups
            .entry(key)
            .or_default()
            .0
            .push(QueueEntry::from_summary(buy));
    }
    for sell in sells {
        let key = (sell.symbol.clone(), sell.isin.clone());
        groups
            .entry(key)
            .or_default()
            .1
            .push(QueueEntry::from_summary(sell));
    }

    let mut lots = Vec::new();

    for ((symbol, isin), (mut buy_queue, mut sell_queue)) in groups {
        // Stable sort: same-date entries keep their input order.
        buy_queue.sort_by(|a, b| a.trade_date.cmp(&b.trade_date));
        sell_queue.sort_by(|a, b| a.trade_date.cmp(&b.trade_date));

        let mut bi = 0;
        let mut si = 0;

        while bi < buy_queue.len() && si < sell_queue.len() {
            let buy_remaining = buy_queue[bi].remaining;
            let sell_remaining = sell_queue[si].remaining;
            let matched = buy_remaining.min(sell_remaining);

            lots.push(MatchedLot {
                symbol: symbol.clone(),
                isin: isin.clone(),
                quantity: matched,
                buy_date: buy_queue[bi].trade_date,
                buy_price: buy_queue[bi].price,
                sell_date: sell_queue[si].trade_date,
                sell_price: sell_queue[si].price,
                status: LotStatus::Closed,
            });

            if buy_remaining == sell_remaining {
                bi += 1;
                si += 1;
            } else if buy_remaining > sell_remaining {
                buy_queue[bi].remaining = buy_remaining - sell_remaining;
                si += 1;
            } else {
                sell_queue[si].remaining = sell_remaining - buy_remaining;
                bi += 1;
            }
        }

        // Unconsumed buy quantity is still held.
        while bi < buy_queue.len() {
            lots.push(MatchedLot {
                symbol: symbol.clone(),
                isin: isin.clone(),
                quantity: buy_queue[bi].remaining,
                buy_date: buy_queue[bi].trade_date,
                buy_price: buy_queue[bi].price,
                sell_date: as_of,
                sell_price: 0.0,
                status: LotStatus::Open,
            });
            bi += 1;
        }
    }

    lots
}
