//! Payment reconciliation: matching and discrepancy tracking.
//!
//! This module contains the deterministic two-pass matcher for internal
//! payments against an external settlement feed, the variance
//! classification rules, and the discrepancy tracker that turns a match
//! outcome into run/item rows with an operator resolution workflow.

mod matcher;
mod tracker;

pub use matcher::{MatchOutcome, MatchedPair, classify_variance, match_payments};
pub use tracker::DiscrepancyTracker;
