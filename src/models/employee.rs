//! Employee model.
//!
//! The engine only needs identity, company membership and active status;
//! everything else about an employee lives with the enclosing HR platform.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee known to the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Employee;
/// use chrono::NaiveDate;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     company_id: "acme".to_string(),
///     name: "A. Example".to_string(),
///     joined_on: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
///     active: true,
/// };
/// assert!(employee.active);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The company (tenant) the employee belongs to.
    pub company_id: String,
    /// Display name.
    pub name: String,
    /// The date the employee joined.
    pub joined_on: NaiveDate,
    /// Whether the employee is currently active.
    pub active: bool,
}
