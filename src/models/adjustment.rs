//! One-off payroll adjustment model.
//!
//! Adjustments are ad-hoc amounts (bonuses, arrears, reimbursements,
//! deductions, advances) raised against an employee and period. Each
//! adjustment is consumed at most once: its `applied` flag flips to `true`
//! in the same atomic unit as the payroll record it feeds, which is what
//! makes regeneration after a failure safe.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::PayPeriod;

/// The kind of one-off adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// Discretionary bonus. Adds to gross salary.
    Bonus,
    /// Back-pay for a prior period. Adds to gross salary.
    Arrear,
    /// Expense reimbursement. Adds to gross salary.
    Reimbursement,
    /// One-off deduction. Adds to total deductions.
    Deduction,
    /// Salary advance recovery. Adds to total deductions.
    Advance,
}

impl AdjustmentKind {
    /// Returns `true` for kinds that add to gross salary rather than to
    /// total deductions.
    pub fn is_earning(&self) -> bool {
        matches!(self, Self::Bonus | Self::Arrear | Self::Reimbursement)
    }

    /// Returns the snake_case code used in payroll breakdown lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Bonus => "bonus",
            Self::Arrear => "arrear",
            Self::Reimbursement => "reimbursement",
            Self::Deduction => "deduction",
            Self::Advance => "advance",
        }
    }
}

/// A one-off adjustment for an employee and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee the adjustment applies to.
    pub employee_id: String,
    /// The period the adjustment is consumed in.
    pub period: PayPeriod,
    /// The kind of adjustment.
    pub kind: AdjustmentKind,
    /// The adjustment amount. Always positive; the kind decides the sign
    /// of its effect.
    pub amount: Decimal,
    /// Whether the adjustment has been consumed by a payroll record.
    pub applied: bool,
}

impl Adjustment {
    /// Validates the adjustment amount.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] if the amount is not positive.
    pub fn validate(&self) -> EngineResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: format!("adjustment '{}'", self.id),
                message: format!("amount must be positive, got {}", self.amount),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn adjustment(kind: AdjustmentKind, amount: &str) -> Adjustment {
        Adjustment {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            period: PayPeriod::new(5, 2024).unwrap(),
            kind,
            amount: Decimal::from_str(amount).unwrap(),
            applied: false,
        }
    }

    /// ADJ-001: earning/deduction classification per kind
    #[test]
    fn test_kind_classification() {
        assert!(AdjustmentKind::Bonus.is_earning());
        assert!(AdjustmentKind::Arrear.is_earning());
        assert!(AdjustmentKind::Reimbursement.is_earning());
        assert!(!AdjustmentKind::Deduction.is_earning());
        assert!(!AdjustmentKind::Advance.is_earning());
    }

    /// ADJ-002: zero and negative amounts are rejected
    #[test]
    fn test_validate_rejects_non_positive_amount() {
        assert!(adjustment(AdjustmentKind::Bonus, "0").validate().is_err());
        assert!(adjustment(AdjustmentKind::Bonus, "-10").validate().is_err());
        assert!(adjustment(AdjustmentKind::Bonus, "100").validate().is_ok());
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AdjustmentKind::Reimbursement).unwrap(),
            "\"reimbursement\""
        );
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(AdjustmentKind::Advance.code(), "advance");
        assert_eq!(AdjustmentKind::Bonus.code(), "bonus");
    }
}
