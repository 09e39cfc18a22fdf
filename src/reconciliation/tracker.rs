//! Discrepancy tracking and the resolution workflow.
//!
//! The tracker turns a [`MatchOutcome`] into persisted-shape rows: one
//! [`ReconciliationRun`] summary plus one [`ReconciliationItem`] per
//! processed internal payment. Orphaned settlement rows are reported
//! separately on the outcome; they have no internal counterpart and so
//! produce no item.

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    MatchStatus, PayPeriod, PaymentSettlementRecord, ReconciliationItem, ReconciliationRun,
    ResolutionStatus, RunStatus, VarianceReason,
};

use super::matcher::MatchOutcome;

/// Stores one reconciliation run's items and aggregates, and exposes the
/// operator resolution workflow.
///
/// # Example
///
/// ```
/// use payroll_engine::config::ReconciliationConfig;
/// use payroll_engine::models::PayPeriod;
/// use payroll_engine::reconciliation::{DiscrepancyTracker, match_payments};
///
/// let outcome = match_payments(&[], &[], &ReconciliationConfig::default()).unwrap();
/// let tracker = DiscrepancyTracker::record("acme", PayPeriod::new(5, 2024).unwrap(), &outcome);
/// assert_eq!(tracker.run().internal_count, 0);
/// ```
#[derive(Debug, Clone)]
pub struct DiscrepancyTracker {
    run: ReconciliationRun,
    items: Vec<ReconciliationItem>,
    orphaned: Vec<PaymentSettlementRecord>,
}

impl DiscrepancyTracker {
    /// Records a matching outcome as a run with its items.
    pub fn record(company_id: &str, period: PayPeriod, outcome: &MatchOutcome) -> Self {
        let run_id = Uuid::new_v4();
        let mut items = Vec::with_capacity(outcome.pairs.len() + outcome.unmatched.len());
        let mut total_variance = Decimal::ZERO;

        for pair in &outcome.pairs {
            total_variance += pair.variance;
            let variance_reason = match pair.match_status {
                MatchStatus::ExactMatch => None,
                _ => Some(VarianceReason::AmountMismatch),
            };
            items.push(ReconciliationItem {
                id: Uuid::new_v4(),
                run_id,
                internal_id: pair.internal.id.clone(),
                external_reference: Some(pair.external.reference.clone()),
                match_status: pair.match_status,
                variance_amount: pair.variance,
                variance_reason,
                resolution_status: ResolutionStatus::Open,
                resolution_remark: None,
                resolved_by: None,
            });
        }

        for payment in &outcome.unmatched {
            items.push(ReconciliationItem {
                id: Uuid::new_v4(),
                run_id,
                internal_id: payment.id.clone(),
                external_reference: None,
                match_status: MatchStatus::Unmatched,
                variance_amount: Decimal::ZERO,
                variance_reason: Some(VarianceReason::MissingInExternal),
                resolution_status: ResolutionStatus::Open,
                resolution_remark: None,
                resolved_by: None,
            });
        }

        let matched_count = outcome.pairs.len() as u32;
        let unmatched_count = outcome.unmatched.len() as u32;
        let orphaned_count = outcome.orphaned.len() as u32;
        let all_exact = outcome
            .pairs
            .iter()
            .all(|p| p.match_status == MatchStatus::ExactMatch);
        let status = if all_exact && unmatched_count == 0 && orphaned_count == 0 {
            RunStatus::Balanced
        } else {
            RunStatus::DiscrepanciesFound
        };

        let run = ReconciliationRun {
            id: run_id,
            company_id: company_id.to_string(),
            period,
            internal_count: matched_count + unmatched_count,
            external_count: matched_count + orphaned_count,
            matched_count,
            unmatched_count,
            orphaned_count,
            total_variance,
            status,
            completed_at: Utc::now(),
        };

        info!(
            company_id,
            period = %period,
            matched = matched_count,
            unmatched = unmatched_count,
            orphaned = orphaned_count,
            total_variance = %total_variance,
            "recorded reconciliation run"
        );

        Self {
            run,
            items,
            orphaned: outcome.orphaned.clone(),
        }
    }

    /// Returns the run summary.
    pub fn run(&self) -> &ReconciliationRun {
        &self.run
    }

    /// Returns all items, matched pairs first in internal input order,
    /// then unmatched payments.
    pub fn items(&self) -> &[ReconciliationItem] {
        &self.items
    }

    /// Returns the orphaned settlement rows reported alongside the items.
    pub fn orphaned(&self) -> &[PaymentSettlementRecord] {
        &self.orphaned
    }

    /// Returns the items with the given match status.
    pub fn items_with_status(&self, status: MatchStatus) -> Vec<&ReconciliationItem> {
        self.items
            .iter()
            .filter(|i| i.match_status == status)
            .collect()
    }

    /// Counts items with the given match status.
    pub fn count_with_status(&self, status: MatchStatus) -> usize {
        self.items
            .iter()
            .filter(|i| i.match_status == status)
            .count()
    }

    /// Resolves one item with an operator remark and identity.
    ///
    /// Sign-off only records the review; the underlying payroll record
    /// and payment are untouched.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Validation`] if no item has the given id.
    /// - [`EngineError::AlreadyResolved`] if the item was resolved before.
    pub fn resolve_item(
        &mut self,
        item_id: Uuid,
        remark: &str,
        resolved_by: &str,
    ) -> EngineResult<&ReconciliationItem> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| EngineError::Validation {
                field: "item_id".to_string(),
                message: format!("no reconciliation item with id {item_id}"),
            })?;
        item.resolve(remark, resolved_by)?;
        info!(item_id = %item_id, resolved_by, "reconciliation item resolved");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReconciliationConfig;
    use crate::models::InternalPayment;
    use crate::reconciliation::match_payments;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn internal(id: &str, amount: &str, day: u32, reference: Option<&str>) -> InternalPayment {
        InternalPayment {
            id: id.to_string(),
            employee_id: format!("emp_{id}"),
            amount: dec(amount),
            paid_on: date(day),
            reference: reference.map(str::to_string),
        }
    }

    fn external(reference: &str, amount: &str, day: u32) -> PaymentSettlementRecord {
        PaymentSettlementRecord {
            reference: reference.to_string(),
            amount: dec(amount),
            settled_on: date(day),
        }
    }

    fn period() -> PayPeriod {
        PayPeriod::new(5, 2024).unwrap()
    }

    fn tracker_for(
        payments: &[InternalPayment],
        feed: &[PaymentSettlementRecord],
    ) -> DiscrepancyTracker {
        let outcome = match_payments(payments, feed, &ReconciliationConfig::default()).unwrap();
        DiscrepancyTracker::record("acme", period(), &outcome)
    }

    /// DT-001: aggregates cover counts and variance sum
    #[test]
    fn test_run_aggregates() {
        let tracker = tracker_for(
            &[
                internal("p1", "50000.00", 1, Some("UTR1")),
                internal("p2", "32000.00", 1, None),
                internal("p3", "18000.00", 2, None),
            ],
            &[
                external("UTR1", "50000.00", 1),
                external("UTR2", "32050.00", 1),
                external("UTR9", "7000.00", 3),
            ],
        );

        let run = tracker.run();
        assert_eq!(run.internal_count, 3);
        assert_eq!(run.external_count, 3);
        assert_eq!(run.matched_count, 2);
        assert_eq!(run.unmatched_count, 1);
        assert_eq!(run.orphaned_count, 1);
        assert_eq!(run.total_variance, dec("50.00"));
        assert_eq!(run.status, RunStatus::DiscrepanciesFound);
    }

    /// DT-002: a fully exact run is balanced
    #[test]
    fn test_balanced_run() {
        let tracker = tracker_for(
            &[internal("p1", "50000.00", 1, Some("UTR1"))],
            &[external("UTR1", "50000.00", 1)],
        );

        assert_eq!(tracker.run().status, RunStatus::Balanced);
        assert_eq!(tracker.count_with_status(MatchStatus::ExactMatch), 1);
    }

    /// DT-003: unmatched items carry the missing_in_external reason
    #[test]
    fn test_unmatched_item_reason() {
        let tracker = tracker_for(&[internal("p1", "50000.00", 1, None)], &[]);

        let items = tracker.items_with_status(MatchStatus::Unmatched);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].variance_reason, Some(VarianceReason::MissingInExternal));
        assert_eq!(items[0].external_reference, None);
        assert_eq!(items[0].resolution_status, ResolutionStatus::Open);
    }

    /// DT-004: exact matches carry no variance reason
    #[test]
    fn test_exact_item_has_no_reason() {
        let tracker = tracker_for(
            &[internal("p1", "50000.00", 1, Some("UTR1"))],
            &[external("UTR1", "50000.00", 1)],
        );

        assert_eq!(tracker.items()[0].variance_reason, None);
    }

    /// DT-005: resolution workflow flips one item and only that item
    #[test]
    fn test_resolution_workflow() {
        let mut tracker = tracker_for(
            &[
                internal("p1", "50000.00", 1, None),
                internal("p2", "20000.00", 1, None),
            ],
            &[],
        );

        let item_id = tracker.items()[0].id;
        let resolved = tracker.resolve_item(item_id, "payout delayed", "ops_anna").unwrap();
        assert_eq!(resolved.resolution_status, ResolutionStatus::Resolved);
        assert_eq!(tracker.items()[1].resolution_status, ResolutionStatus::Open);

        // A second sign-off on the same item is rejected.
        assert!(matches!(
            tracker.resolve_item(item_id, "again", "ops_ben").unwrap_err(),
            EngineError::AlreadyResolved { .. }
        ));
    }

    /// DT-006: resolving an unknown id is a validation error
    #[test]
    fn test_resolve_unknown_item() {
        let mut tracker = tracker_for(&[], &[]);
        assert!(matches!(
            tracker.resolve_item(Uuid::new_v4(), "x", "ops").unwrap_err(),
            EngineError::Validation { .. }
        ));
    }

    /// DT-007: orphaned settlement rows are exposed separately
    #[test]
    fn test_orphans_reported_separately() {
        let tracker = tracker_for(&[], &[external("UTR9", "100.00", 1)]);

        assert!(tracker.items().is_empty());
        assert_eq!(tracker.orphaned().len(), 1);
        assert_eq!(tracker.run().orphaned_count, 1);
        assert_eq!(tracker.run().status, RunStatus::DiscrepanciesFound);
    }
}
