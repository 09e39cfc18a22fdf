//! Reconciliation run and item models.
//!
//! A [`ReconciliationRun`] summarizes one matching pass over a period's
//! internal payments and external settlement rows. Each processed internal
//! payment produces one [`ReconciliationItem`] carrying its match outcome
//! and an operator-facing resolution workflow.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::PayPeriod;

/// Outcome classification of a reconciliation item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Matched with a variance below the exactness epsilon.
    ExactMatch,
    /// Matched with a variance below the minor-variance ratio.
    MinorVariance,
    /// Matched with a variance at or above the minor-variance ratio.
    MajorVariance,
    /// No external row survived candidate selection.
    Unmatched,
}

/// Why a matched or unmatched item carries a variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceReason {
    /// No external settlement row was found for the internal payment.
    MissingInExternal,
    /// A row matched but the amounts differ.
    AmountMismatch,
}

/// Human sign-off state of a reconciliation item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// Awaiting operator review.
    Open,
    /// Signed off by an operator.
    Resolved,
}

/// One reconciliation outcome for one internal payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationItem {
    /// Unique identifier.
    pub id: Uuid,
    /// The run this item belongs to.
    pub run_id: Uuid,
    /// The internal payment row id.
    pub internal_id: String,
    /// The matched settlement reference, if any row was matched.
    pub external_reference: Option<String>,
    /// The match classification.
    pub match_status: MatchStatus,
    /// Absolute difference between internal and external amounts
    /// (zero for unmatched items).
    pub variance_amount: Decimal,
    /// Why the item varies, when it does.
    pub variance_reason: Option<VarianceReason>,
    /// Operator sign-off state.
    pub resolution_status: ResolutionStatus,
    /// Operator remark captured on resolution.
    pub resolution_remark: Option<String>,
    /// Identity of the resolving operator.
    pub resolved_by: Option<String>,
}

impl ReconciliationItem {
    /// Records operator sign-off, flipping the item to `resolved`.
    ///
    /// Resolution only captures human review; it has no effect on the
    /// underlying payroll record or payment.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AlreadyResolved`] if the item was resolved
    /// before; the item is left unchanged.
    pub fn resolve(&mut self, remark: &str, resolved_by: &str) -> EngineResult<()> {
        if self.resolution_status == ResolutionStatus::Resolved {
            return Err(EngineError::AlreadyResolved {
                item_id: self.id.to_string(),
            });
        }
        self.resolution_status = ResolutionStatus::Resolved;
        self.resolution_remark = Some(remark.to_string());
        self.resolved_by = Some(resolved_by.to_string());
        Ok(())
    }
}

/// Overall outcome of a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every internal payment matched exactly and no external row was
    /// left orphaned.
    Balanced,
    /// At least one variance, unmatched payment or orphaned settlement
    /// row needs review.
    DiscrepanciesFound,
}

/// Summary of one reconciliation run for a company and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationRun {
    /// Unique identifier.
    pub id: Uuid,
    /// The company (tenant) the run covers.
    pub company_id: String,
    /// The period the run covers.
    pub period: PayPeriod,
    /// Number of internal payments considered.
    pub internal_count: u32,
    /// Number of external settlement rows supplied.
    pub external_count: u32,
    /// Number of internal payments matched to an external row.
    pub matched_count: u32,
    /// Number of internal payments with no surviving candidate.
    pub unmatched_count: u32,
    /// Number of external rows never claimed by any internal payment.
    pub orphaned_count: u32,
    /// Sum of variance amounts across matched pairs.
    pub total_variance: Decimal,
    /// Overall outcome.
    pub status: RunStatus,
    /// When the run was recorded.
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_item() -> ReconciliationItem {
        ReconciliationItem {
            id: Uuid::new_v4(),
            run_id: Uuid::new_v4(),
            internal_id: "pay_001".to_string(),
            external_reference: Some("UTR1".to_string()),
            match_status: MatchStatus::MinorVariance,
            variance_amount: Decimal::new(45000, 2),
            variance_reason: Some(VarianceReason::AmountMismatch),
            resolution_status: ResolutionStatus::Open,
            resolution_remark: None,
            resolved_by: None,
        }
    }

    /// RI-001: resolving captures remark and resolver identity
    #[test]
    fn test_resolve_captures_remark_and_resolver() {
        let mut item = open_item();
        item.resolve("bank fee difference", "ops_anna").unwrap();
        assert_eq!(item.resolution_status, ResolutionStatus::Resolved);
        assert_eq!(item.resolution_remark.as_deref(), Some("bank fee difference"));
        assert_eq!(item.resolved_by.as_deref(), Some("ops_anna"));
    }

    /// RI-002: resolving twice fails and leaves the first sign-off intact
    #[test]
    fn test_double_resolve_rejected() {
        let mut item = open_item();
        item.resolve("first", "ops_anna").unwrap();
        let err = item.resolve("second", "ops_ben").unwrap_err();
        assert!(matches!(err, EngineError::AlreadyResolved { .. }));
        assert_eq!(item.resolution_remark.as_deref(), Some("first"));
        assert_eq!(item.resolved_by.as_deref(), Some("ops_anna"));
    }

    #[test]
    fn test_match_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&MatchStatus::ExactMatch).unwrap(),
            "\"exact_match\""
        );
        assert_eq!(
            serde_json::to_string(&MatchStatus::MinorVariance).unwrap(),
            "\"minor_variance\""
        );
        assert_eq!(
            serde_json::to_string(&VarianceReason::MissingInExternal).unwrap(),
            "\"missing_in_external\""
        );
    }
}
