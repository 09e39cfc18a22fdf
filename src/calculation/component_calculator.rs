//! Two-phase salary component evaluation.
//!
//! Components are evaluated in two explicit, order-preserving phases:
//!
//! 1. **Earnings** ([`calculate_earnings`]): the basic salary is prorated
//!    by `payable_days / total_working_days` when loss-of-pay days exist,
//!    then each earning component is evaluated in its defined order.
//!    Fixed earnings are prorated by the same ratio unless statutory.
//!    Percentage earnings apply to the running earnings total accumulated
//!    so far, which means they inherit proration transitively from the
//!    already-prorated amounts they are computed from; they are never
//!    prorated a second time.
//! 2. **Deductions** ([`calculate_deductions`]): fixed deductions apply
//!    unprorated; percentage deductions apply against the final gross
//!    salary from phase one.
//!
//! The two phases must not be collapsed into a single pass: percentage
//! deductions depend on the completed gross, and percentage earnings on
//! the evaluation order of everything before them.
//!
//! Amounts produced here are unrounded; rounding to 2 decimal places is
//! the record builder's job.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CalculationType, ComponentLine, SalaryStructure};

use super::attendance_aggregator::AttendanceSummary;

/// Output of the earnings phase.
#[derive(Debug, Clone, PartialEq)]
pub struct EarningsResult {
    /// The basic salary after any proration.
    pub basic_salary: Decimal,
    /// Whether the basic salary was prorated.
    pub basic_prorated: bool,
    /// Evaluated earning component lines, in defined order.
    pub lines: Vec<ComponentLine>,
    /// Basic salary plus all earning lines.
    pub gross_salary: Decimal,
}

/// Output of the deductions phase.
#[derive(Debug, Clone, PartialEq)]
pub struct DeductionsResult {
    /// Evaluated deduction component lines, in defined order.
    pub lines: Vec<ComponentLine>,
    /// Sum of all deduction lines, before adjustments.
    pub total_deductions: Decimal,
}

/// Phase one: evaluates basic salary and earning components.
///
/// # Errors
///
/// Returns [`EngineError::Validation`] when the period has no working
/// days, since proration would divide by zero.
pub fn calculate_earnings(
    structure: &SalaryStructure,
    attendance: &AttendanceSummary,
) -> EngineResult<EarningsResult> {
    if attendance.total_working_days == 0 {
        return Err(EngineError::Validation {
            field: "total_working_days".to_string(),
            message: "period has no attendance rows".to_string(),
        });
    }

    let has_loss_of_pay = attendance.loss_of_pay_days() > 0;

    // The no-LOP branch keeps the defined basic exactly; an unnecessary
    // multiply-divide round trip could drift the value.
    let basic_salary = if has_loss_of_pay {
        attendance.prorate(structure.basic_salary)
    } else {
        structure.basic_salary
    };

    let mut running_total = basic_salary;
    let mut lines = Vec::new();

    for assignment in structure.earnings() {
        let component = &assignment.component;
        let (amount, prorated) = match component.calculation {
            CalculationType::Fixed => {
                if has_loss_of_pay && !component.is_statutory {
                    (attendance.prorate(assignment.value), true)
                } else {
                    (assignment.value, false)
                }
            }
            // Percentage of the running total; proration is inherited
            // from the base, never applied again.
            CalculationType::Percentage => {
                (assignment.value / Decimal::ONE_HUNDRED * running_total, false)
            }
        };

        running_total += amount;
        lines.push(ComponentLine {
            code: component.code.clone(),
            amount,
            prorated,
        });
    }

    Ok(EarningsResult {
        basic_salary,
        basic_prorated: has_loss_of_pay,
        lines,
        gross_salary: running_total,
    })
}

/// Phase two: evaluates deduction components against the final gross.
pub fn calculate_deductions(
    structure: &SalaryStructure,
    gross_salary: Decimal,
) -> DeductionsResult {
    let mut total_deductions = Decimal::ZERO;
    let mut lines = Vec::new();

    for assignment in structure.deductions() {
        let component = &assignment.component;
        let amount = match component.calculation {
            CalculationType::Fixed => assignment.value,
            CalculationType::Percentage => {
                assignment.value / Decimal::ONE_HUNDRED * gross_salary
            }
        };

        total_deductions += amount;
        lines.push(ComponentLine {
            code: component.code.clone(),
            amount,
            prorated: false,
        });
    }

    DeductionsResult {
        lines,
        total_deductions,
    }
}
