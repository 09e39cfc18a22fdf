//! Payroll record assembly and rounding.
//!
//! The builder is the only place monetary rounding happens: every amount
//! on the assembled [`PayrollRecord`] is rounded to 2 decimal places with
//! half-up rounding, and the net salary is derived from the rounded gross
//! and deduction totals so the record's invariant
//! `net == round(gross - deductions, 2)` holds by construction.

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::models::{ComponentLine, PayPeriod, PayrollRecord, PayrollStatus};

use super::adjustment_applier::AdjustmentOutcome;
use super::attendance_aggregator::AttendanceSummary;
use super::component_calculator::{DeductionsResult, EarningsResult};

/// Rounds a monetary amount to 2 decimal places, half-up.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = Decimal::from_str("4545.455").unwrap();
/// assert_eq!(round_money(value), Decimal::from_str("4545.46").unwrap());
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Assembles the final draft payroll record from the pipeline's outputs.
///
/// Each breakdown line is rounded individually; the gross and deduction
/// totals are rounded from the unrounded running sums (which include
/// adjustments), and the net is computed from the rounded totals.
pub fn build_record(
    employee_id: &str,
    period: PayPeriod,
    attendance: &AttendanceSummary,
    earnings: &EarningsResult,
    deductions: &DeductionsResult,
    adjustments: &AdjustmentOutcome,
) -> PayrollRecord {
    let earning_lines: Vec<ComponentLine> = earnings
        .lines
        .iter()
        .chain(&adjustments.earning_lines)
        .map(round_line)
        .collect();
    let deduction_lines: Vec<ComponentLine> = deductions
        .lines
        .iter()
        .chain(&adjustments.deduction_lines)
        .map(round_line)
        .collect();

    let gross_salary = round_money(adjustments.gross_salary);
    let total_deductions = round_money(adjustments.total_deductions);
    let net_salary = round_money(gross_salary - total_deductions);

    PayrollRecord {
        id: Uuid::new_v4(),
        employee_id: employee_id.to_string(),
        period,
        working_days: attendance.total_working_days,
        present_days: attendance.present_days,
        paid_leave_days: attendance.paid_leave_days,
        unpaid_leave_days: attendance.unpaid_leave_days,
        basic_salary: round_money(earnings.basic_salary),
        earnings: earning_lines,
        deductions: deduction_lines,
        gross_salary,
        total_deductions,
        net_salary,
        status: PayrollStatus::Draft,
    }
}

fn round_line(line: &ComponentLine) -> ComponentLine {
    ComponentLine {
        code: line.code.clone(),
        amount: round_money(line.amount),
        prorated: line.prorated,
    }
}
