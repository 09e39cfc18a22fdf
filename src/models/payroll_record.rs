//! Payroll record model and status state machine.
//!
//! A [`PayrollRecord`] is the assembled output of one employee's payroll
//! generation for one period. It is unique per (employee, period) and its
//! monetary fields always satisfy
//! `net_salary == round(gross_salary - total_deductions, 2)`.
//!
//! The status lifecycle is a strict state machine:
//!
//! ```text
//! draft --process--> processed --approve--> approved --mark_paid--> paid --reverse--> reversed
//! ```
//!
//! Each transition validates the current status and performs no mutation
//! when the transition is invalid.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::PayPeriod;

/// Lifecycle status of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Freshly generated, not yet processed.
    Draft,
    /// Checked and locked for approval.
    Processed,
    /// Approved for payout.
    Approved,
    /// Paid out.
    Paid,
    /// Payment reversed after being paid.
    Reversed,
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Draft => "draft",
            Self::Processed => "processed",
            Self::Approved => "approved",
            Self::Paid => "paid",
            Self::Reversed => "reversed",
        };
        write!(f, "{label}")
    }
}

/// One line of a payroll record's earnings or deductions breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentLine {
    /// The component or adjustment code (e.g. "hra", "bonus").
    pub code: String,
    /// The rounded amount for this line.
    pub amount: Decimal,
    /// Whether proration was applied to this line. Consumed by
    /// payslip-rendering collaborators.
    pub prorated: bool,
}

/// The assembled payroll record for one employee and period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The period the record covers.
    pub period: PayPeriod,
    /// Total working days in the period (attendance rows in range).
    pub working_days: u32,
    /// Days present (including late arrivals).
    pub present_days: u32,
    /// Approved paid leave days.
    pub paid_leave_days: u32,
    /// Approved unpaid leave days (loss of pay).
    pub unpaid_leave_days: u32,
    /// Basic salary after any proration, rounded.
    pub basic_salary: Decimal,
    /// Earnings breakdown (components plus earning adjustments).
    pub earnings: Vec<ComponentLine>,
    /// Deductions breakdown (components plus deduction adjustments).
    pub deductions: Vec<ComponentLine>,
    /// Gross salary, rounded.
    pub gross_salary: Decimal,
    /// Total deductions, rounded.
    pub total_deductions: Decimal,
    /// Net salary. Always `round(gross_salary - total_deductions, 2)`.
    pub net_salary: Decimal,
    /// Current lifecycle status.
    pub status: PayrollStatus,
}

impl PayrollRecord {
    /// Moves a draft record to `processed`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if the record is not in
    /// `draft`; the record is left unchanged.
    pub fn process(&mut self) -> EngineResult<()> {
        self.transition(PayrollStatus::Draft, PayrollStatus::Processed, "process")
    }

    /// Moves a processed record to `approved`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if the record is not in
    /// `processed`; the record is left unchanged.
    pub fn approve(&mut self) -> EngineResult<()> {
        self.transition(PayrollStatus::Processed, PayrollStatus::Approved, "approve")
    }

    /// Moves an approved record to `paid`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if the record is not in
    /// `approved`; the record is left unchanged.
    pub fn mark_paid(&mut self) -> EngineResult<()> {
        self.transition(PayrollStatus::Approved, PayrollStatus::Paid, "mark_paid")
    }

    /// Moves a paid record to `reversed`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTransition`] if the record is not in
    /// `paid`; the record is left unchanged.
    pub fn reverse(&mut self) -> EngineResult<()> {
        self.transition(PayrollStatus::Paid, PayrollStatus::Reversed, "reverse")
    }

    fn transition(
        &mut self,
        expected: PayrollStatus,
        to: PayrollStatus,
        action: &str,
    ) -> EngineResult<()> {
        if self.status != expected {
            return Err(EngineError::InvalidTransition {
                from: self.status,
                action: action.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }

    /// Checks the net salary invariant.
    ///
    /// Useful for assertions at persistence seams; builder output always
    /// satisfies it.
    pub fn net_invariant_holds(&self) -> bool {
        use rust_decimal::RoundingStrategy;
        self.net_salary
            == (self.gross_salary - self.total_deductions)
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn draft_record() -> PayrollRecord {
        PayrollRecord {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            period: PayPeriod::new(5, 2024).unwrap(),
            working_days: 22,
            present_days: 22,
            paid_leave_days: 0,
            unpaid_leave_days: 0,
            basic_salary: dec("22000.00"),
            earnings: vec![],
            deductions: vec![],
            gross_salary: dec("22000.00"),
            total_deductions: dec("1800.00"),
            net_salary: dec("20200.00"),
            status: PayrollStatus::Draft,
        }
    }

    /// PR-001: full happy-path lifecycle
    #[test]
    fn test_full_lifecycle() {
        let mut record = draft_record();
        record.process().unwrap();
        assert_eq!(record.status, PayrollStatus::Processed);
        record.approve().unwrap();
        assert_eq!(record.status, PayrollStatus::Approved);
        record.mark_paid().unwrap();
        assert_eq!(record.status, PayrollStatus::Paid);
        record.reverse().unwrap();
        assert_eq!(record.status, PayrollStatus::Reversed);
    }

    /// PR-002: approving a draft is rejected without mutation
    #[test]
    fn test_approve_from_draft_rejected() {
        let mut record = draft_record();
        let err = record.approve().unwrap_err();
        match err {
            EngineError::InvalidTransition { from, action } => {
                assert_eq!(from, PayrollStatus::Draft);
                assert_eq!(action, "approve");
            }
            other => panic!("Expected InvalidTransition, got {:?}", other),
        }
        assert_eq!(record.status, PayrollStatus::Draft);
    }

    /// PR-003: every out-of-order transition is rejected
    #[test]
    fn test_rejection_table() {
        // (starting status, invalid actions)
        let cases: Vec<(PayrollStatus, Vec<&str>)> = vec![
            (PayrollStatus::Draft, vec!["approve", "mark_paid", "reverse"]),
            (PayrollStatus::Processed, vec!["process", "mark_paid", "reverse"]),
            (PayrollStatus::Approved, vec!["process", "approve", "reverse"]),
            (PayrollStatus::Paid, vec!["process", "approve", "mark_paid"]),
            (PayrollStatus::Reversed, vec!["process", "approve", "mark_paid", "reverse"]),
        ];

        for (status, actions) in cases {
            for action in actions {
                let mut record = draft_record();
                record.status = status;
                let result = match action {
                    "process" => record.process(),
                    "approve" => record.approve(),
                    "mark_paid" => record.mark_paid(),
                    "reverse" => record.reverse(),
                    other => panic!("unknown action {other}"),
                };
                assert!(result.is_err(), "{action} from {status} should fail");
                assert_eq!(record.status, status, "{action} from {status} must not mutate");
            }
        }
    }

    /// PR-004: reversing is only possible after payment
    #[test]
    fn test_reverse_requires_paid() {
        let mut record = draft_record();
        assert!(record.reverse().is_err());
        record.process().unwrap();
        record.approve().unwrap();
        assert!(record.reverse().is_err());
        record.mark_paid().unwrap();
        assert!(record.reverse().is_ok());
    }

    #[test]
    fn test_net_invariant_check() {
        let mut record = draft_record();
        assert!(record.net_invariant_holds());
        record.net_salary = dec("1.00");
        assert!(!record.net_invariant_holds());
    }

    #[test]
    fn test_status_display_matches_serde() {
        assert_eq!(PayrollStatus::Draft.to_string(), "draft");
        assert_eq!(
            serde_json::to_string(&PayrollStatus::Processed).unwrap(),
            "\"processed\""
        );
    }
}
