//! One-off adjustment application.
//!
//! Merges pending adjustments into the computed gross and deduction
//! totals. The applier only computes; actually flipping each adjustment's
//! `applied` flag happens in the same atomic store write that persists the
//! payroll record, so a failed or retried generation can never consume an
//! adjustment twice.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Adjustment, ComponentLine};

/// Output of adjustment application.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjustmentOutcome {
    /// Gross salary including earning adjustments.
    pub gross_salary: Decimal,
    /// Total deductions including deduction adjustments.
    pub total_deductions: Decimal,
    /// Breakdown lines for earning adjustments (bonus/arrear/reimbursement).
    pub earning_lines: Vec<ComponentLine>,
    /// Breakdown lines for deduction adjustments (deduction/advance).
    pub deduction_lines: Vec<ComponentLine>,
    /// Ids of every adjustment consumed, to be flagged applied in the
    /// record's atomic write.
    pub applied_ids: Vec<Uuid>,
}

/// Applies pending adjustments to the computed totals.
///
/// Bonus, arrear and reimbursement amounts add to gross salary; deduction
/// and advance amounts add to total deductions. Adjustments already
/// flagged applied are skipped; stores normally hand out only pending
/// ones.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::Validation`] if any adjustment
/// carries a non-positive amount; no partial application happens.
pub fn apply_adjustments(
    gross_salary: Decimal,
    total_deductions: Decimal,
    adjustments: &[Adjustment],
) -> EngineResult<AdjustmentOutcome> {
    for adjustment in adjustments {
        adjustment.validate()?;
    }

    let mut outcome = AdjustmentOutcome {
        gross_salary,
        total_deductions,
        earning_lines: Vec::new(),
        deduction_lines: Vec::new(),
        applied_ids: Vec::new(),
    };

    for adjustment in adjustments.iter().filter(|a| !a.applied) {
        let line = ComponentLine {
            code: adjustment.kind.code().to_string(),
            amount: adjustment.amount,
            prorated: false,
        };
        if adjustment.kind.is_earning() {
            outcome.gross_salary += adjustment.amount;
            outcome.earning_lines.push(line);
        } else {
            outcome.total_deductions += adjustment.amount;
            outcome.deduction_lines.push(line);
        }
        outcome.applied_ids.push(adjustment.id);
    }

    Ok(outcome)
}
