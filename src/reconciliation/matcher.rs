//! Two-pass payment matching.
//!
//! Matches one period's internal payments against an external settlement
//! feed in two deterministic passes:
//!
//! 1. **Exact pass**: reference strings compared case-sensitively. Each
//!    external row can be consumed by at most one internal payment.
//! 2. **Fuzzy pass** over the remaining internal payments: candidate rows
//!    share the calendar date and differ in amount by less than the
//!    configured fraction of the internal amount. The candidate with the
//!    smallest amount difference wins; ties break by feed insertion
//!    order, so identical inputs always produce identical results.
//!
//! Unmatched internal payments and orphaned external rows are expected
//! data outcomes, not errors.

use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::config::ReconciliationConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{InternalPayment, MatchStatus, PaymentSettlementRecord};

/// One matched internal/external pair with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPair {
    /// The internal payment.
    pub internal: InternalPayment,
    /// The matched settlement row.
    pub external: PaymentSettlementRecord,
    /// Variance classification for the pair.
    pub match_status: MatchStatus,
    /// Absolute amount difference.
    pub variance: Decimal,
}

/// The complete result of one matching run.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Matched pairs, in internal input order.
    pub pairs: Vec<MatchedPair>,
    /// Internal payments with no surviving candidate.
    pub unmatched: Vec<InternalPayment>,
    /// External rows never claimed by any internal payment.
    pub orphaned: Vec<PaymentSettlementRecord>,
}

/// Matches internal payments against external settlement rows.
///
/// # Errors
///
/// - [`EngineError::DuplicateSettlementReference`] if the external feed
///   carries the same reference twice; the run does not start.
/// - [`EngineError::Validation`] if an internal amount is negative.
///
/// # Example
///
/// ```
/// use payroll_engine::config::ReconciliationConfig;
/// use payroll_engine::models::{InternalPayment, MatchStatus, PaymentSettlementRecord};
/// use payroll_engine::reconciliation::match_payments;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let internal = vec![InternalPayment {
///     id: "pay_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     amount: Decimal::from(50000),
///     paid_on: date,
///     reference: Some("UTR1".to_string()),
/// }];
/// let external = vec![PaymentSettlementRecord {
///     reference: "UTR1".to_string(),
///     amount: Decimal::from(50000),
///     settled_on: date,
/// }];
///
/// let outcome = match_payments(&internal, &external, &ReconciliationConfig::default()).unwrap();
/// assert_eq!(outcome.pairs[0].match_status, MatchStatus::ExactMatch);
/// ```
pub fn match_payments(
    internal: &[InternalPayment],
    external: &[PaymentSettlementRecord],
    config: &ReconciliationConfig,
) -> EngineResult<MatchOutcome> {
    let mut seen = HashSet::new();
    for row in external {
        if !seen.insert(row.reference.as_str()) {
            return Err(EngineError::DuplicateSettlementReference {
                reference: row.reference.clone(),
            });
        }
    }
    for payment in internal {
        if payment.amount < Decimal::ZERO {
            return Err(EngineError::Validation {
                field: format!("internal payment '{}'", payment.id),
                message: format!("amount must not be negative, got {}", payment.amount),
            });
        }
    }

    let mut consumed = vec![false; external.len()];
    // (internal index, external index) pairs, filled across both passes.
    let mut matches: Vec<(usize, usize)> = Vec::new();
    let mut remaining: Vec<usize> = Vec::new();

    // Pass 1: exact reference equality.
    for (i, payment) in internal.iter().enumerate() {
        let claimed = payment.reference.as_deref().and_then(|reference| {
            external
                .iter()
                .enumerate()
                .position(|(e, row)| !consumed[e] && row.reference == reference)
        });
        match claimed {
            Some(e) => {
                consumed[e] = true;
                matches.push((i, e));
            }
            None => remaining.push(i),
        }
    }

    // Pass 2: same-date fuzzy matching on the remainder.
    let mut unmatched = Vec::new();
    for i in remaining {
        let payment = &internal[i];
        let winner = fuzzy_candidate(payment, external, &consumed, config);
        match winner {
            Some(e) => {
                consumed[e] = true;
                matches.push((i, e));
            }
            None => unmatched.push(payment.clone()),
        }
    }

    // Item order follows internal input order regardless of which pass
    // produced the match.
    matches.sort_by_key(|&(i, _)| i);

    let pairs = matches
        .into_iter()
        .map(|(i, e)| {
            let payment = &internal[i];
            let row = &external[e];
            let variance = (payment.amount - row.amount).abs();
            MatchedPair {
                internal: payment.clone(),
                external: row.clone(),
                match_status: classify_variance(payment.amount, variance, config),
                variance,
            }
        })
        .collect();

    let orphaned = external
        .iter()
        .zip(&consumed)
        .filter(|&(_, &used)| !used)
        .map(|(row, _)| row.clone())
        .collect();

    Ok(MatchOutcome {
        pairs,
        unmatched,
        orphaned,
    })
}

/// Picks the fuzzy-match candidate for one internal payment, if any.
///
/// Candidates share the settlement date and differ by less than
/// `auto_match_threshold` of the internal amount. The smallest difference
/// wins; ties break by insertion order. Zero-amount payments never
/// fuzzy-match because the fractional difference is undefined.
fn fuzzy_candidate(
    payment: &InternalPayment,
    external: &[PaymentSettlementRecord],
    consumed: &[bool],
    config: &ReconciliationConfig,
) -> Option<usize> {
    if payment.amount.is_zero() {
        return None;
    }

    external
        .iter()
        .enumerate()
        .filter(|&(e, row)| !consumed[e] && row.settled_on == payment.paid_on)
        .filter_map(|(e, row)| {
            let diff = (payment.amount - row.amount).abs();
            (diff / payment.amount < config.auto_match_threshold).then_some((diff, e))
        })
        .min()
        .map(|(_, e)| e)
}

/// Classifies a matched pair's variance.
///
/// - Below `exact_epsilon` (absolute): exact match.
/// - Below `minor_variance_ratio` of the internal amount: minor variance.
/// - Otherwise: major variance.
pub fn classify_variance(
    internal_amount: Decimal,
    variance: Decimal,
    config: &ReconciliationConfig,
) -> MatchStatus {
    if variance < config.exact_epsilon {
        return MatchStatus::ExactMatch;
    }
    if internal_amount > Decimal::ZERO && variance / internal_amount < config.minor_variance_ratio
    {
        return MatchStatus::MinorVariance;
    }
    MatchStatus::MajorVariance
}
