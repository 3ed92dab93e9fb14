//! Analysis modules.
//!
//! Aggregations over the loaded sales records.

pub mod aggregator;

pub use aggregator::*;
