//! Salary structure version resolution.
//!
//! This module selects the compensation structure version effective for an
//! employee at a period start. Structures are versioned append-only, so
//! resolution picks the version with the greatest `effective_from` on or
//! before the period start.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::SalaryStructure;

/// Resolves the effective salary structure for an employee and period start.
///
/// Versions belonging to other employees are ignored, which lets callers
/// pass an unfiltered version list. When two versions share the same
/// `effective_from`, the later-created one (higher index) wins.
///
/// # Errors
///
/// Returns [`EngineError::SalaryStructureNotFound`] when no version is
/// effective on or before `period_start`. During batch generation this
/// failure is recorded for the employee and never aborts sibling work.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_structure;
/// use payroll_engine::models::SalaryStructure;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let versions = vec![SalaryStructure {
///     employee_id: "emp_001".to_string(),
///     effective_from: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     basic_salary: Decimal::from(22000),
///     components: vec![],
/// }];
/// let period_start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let structure = resolve_structure(&versions, "emp_001", period_start).unwrap();
/// assert_eq!(structure.basic_salary, Decimal::from(22000));
/// ```
pub fn resolve_structure<'a>(
    versions: &'a [SalaryStructure],
    employee_id: &str,
    period_start: NaiveDate,
) -> EngineResult<&'a SalaryStructure> {
    versions
        .iter()
        .enumerate()
        .filter(|(_, s)| s.employee_id == employee_id && s.effective_from <= period_start)
        .max_by_key(|(index, s)| (s.effective_from, *index))
        .map(|(_, s)| s)
        .ok_or_else(|| EngineError::SalaryStructureNotFound {
            employee_id: employee_id.to_string(),
            period_start,
        })
}
