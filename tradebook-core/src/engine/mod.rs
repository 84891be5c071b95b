//! The reconciliation engine: aggregation, lot matching, valuation.
//!
//! Three pure stages, composed by the runner:
//! raw records → [`aggregate()`] → side summaries → [`match_lots()`] →
//! matched lots → [`value_lots()`] → valued lots.

pub mod aggregate;
pub mod matching;
pub mod valuation;

pub use aggregate::{aggregate, partition_sides};
pub use matching::match_lots;
pub use valuation::{value_lots, ValuationError};
