//! Salary component and structure models.
//!
//! This module defines [`SalaryComponent`] and [`SalaryStructure`], the
//! versioned compensation definitions that payroll generation evaluates.
//! A structure is never mutated in place; HR actions create a new version
//! with a later `effective_from` date.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Whether a component adds to pay or is withheld from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Adds to gross salary.
    Earning,
    /// Adds to total deductions.
    Deduction,
}

/// How a component's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationType {
    /// The value is a flat currency amount.
    Fixed,
    /// The value is a percentage (0 to 100). Earning percentages apply to
    /// the running earnings total; deduction percentages apply to the
    /// final gross salary.
    Percentage,
}

/// A single salary component definition.
///
/// Components are immutable once referenced by a structure version.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CalculationType, ComponentKind, SalaryComponent};
///
/// let hra = SalaryComponent {
///     code: "hra".to_string(),
///     name: "House Rent Allowance".to_string(),
///     kind: ComponentKind::Earning,
///     calculation: CalculationType::Fixed,
///     is_statutory: false,
///     ordering: 1,
/// };
/// assert!(!hra.is_statutory);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Short unique code (e.g. "hra", "pf").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Earning or deduction.
    pub kind: ComponentKind,
    /// Fixed amount or percentage.
    pub calculation: CalculationType,
    /// Statutory components are exempt from proration regardless of
    /// attendance.
    pub is_statutory: bool,
    /// Evaluation order within the structure. Load-bearing for percentage
    /// components, which accumulate against earlier earnings.
    pub ordering: u32,
}

/// A component together with its value in one structure version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentAssignment {
    /// The component definition.
    pub component: SalaryComponent,
    /// The flat amount or percentage value, per [`CalculationType`].
    pub value: Decimal,
}

/// One version of an employee's compensation structure.
///
/// Multiple versions may exist per employee; the version with the latest
/// `effective_from` on or before the period start applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// The employee this version belongs to.
    pub employee_id: String,
    /// The first date this version applies.
    pub effective_from: NaiveDate,
    /// The monthly basic salary.
    pub basic_salary: Decimal,
    /// Component assignments in defined order.
    pub components: Vec<ComponentAssignment>,
}

impl SalaryStructure {
    /// Validates the structure's monetary values.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] if the basic salary is not
    /// positive, a component value is negative, or a percentage value is
    /// outside 0 to 100.
    pub fn validate(&self) -> EngineResult<()> {
        if self.basic_salary <= Decimal::ZERO {
            return Err(EngineError::Validation {
                field: "basic_salary".to_string(),
                message: format!("must be positive, got {}", self.basic_salary),
            });
        }
        for assignment in &self.components {
            if assignment.value < Decimal::ZERO {
                return Err(EngineError::Validation {
                    field: assignment.component.code.clone(),
                    message: format!("component value must not be negative, got {}", assignment.value),
                });
            }
            if assignment.component.calculation == CalculationType::Percentage
                && assignment.value > Decimal::ONE_HUNDRED
            {
                return Err(EngineError::Validation {
                    field: assignment.component.code.clone(),
                    message: format!("percentage must not exceed 100, got {}", assignment.value),
                });
            }
        }
        Ok(())
    }

    /// Returns the earning assignments sorted by their defined ordering.
    pub fn earnings(&self) -> Vec<&ComponentAssignment> {
        self.ordered(ComponentKind::Earning)
    }

    /// Returns the deduction assignments sorted by their defined ordering.
    pub fn deductions(&self) -> Vec<&ComponentAssignment> {
        self.ordered(ComponentKind::Deduction)
    }

    fn ordered(&self, kind: ComponentKind) -> Vec<&ComponentAssignment> {
        let mut assignments: Vec<&ComponentAssignment> = self
            .components
            .iter()
            .filter(|a| a.component.kind == kind)
            .collect();
        // Stable sort keeps insertion order for equal ordering indexes.
        assignments.sort_by_key(|a| a.component.ordering);
        assignments
    }
}
