//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all failure conditions in payroll generation and reconciliation.
//!
//! Reconciliation *outcomes* such as unmatched payments or amount variances
//! are deliberately not represented here: they are expected data results
//! carried in [`crate::models::ReconciliationItem`] and feed a human
//! resolution workflow rather than an error path.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::PayrollStatus;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration contained a value outside its allowed range.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee identifier that was not found.
        employee_id: String,
    },

    /// No salary structure version was effective for the employee on the
    /// given period start date.
    #[error("Salary structure not found for employee '{employee_id}' effective {period_start}")]
    SalaryStructureNotFound {
        /// The employee identifier.
        employee_id: String,
        /// The period start date for which a structure was requested.
        period_start: NaiveDate,
    },

    /// A payroll record already exists for the employee and period.
    #[error("Payroll record already exists for employee '{employee_id}' in period {period}")]
    RecordAlreadyExists {
        /// The employee identifier.
        employee_id: String,
        /// The period label (e.g. "2024-05").
        period: String,
    },

    /// The external settlement feed contained the same reference twice.
    #[error("Duplicate settlement reference in external feed: {reference}")]
    DuplicateSettlementReference {
        /// The reference string that appeared more than once.
        reference: String,
    },

    /// A payroll state-machine transition was attempted from the wrong status.
    #[error("Cannot {action} payroll record in status '{from}'")]
    InvalidTransition {
        /// The status the record was in when the transition was attempted.
        from: PayrollStatus,
        /// The transition that was attempted (e.g. "approve").
        action: String,
    },

    /// A reconciliation item was resolved twice.
    #[error("Reconciliation item '{item_id}' is already resolved")]
    AlreadyResolved {
        /// The identifier of the item.
        item_id: String,
    },

    /// A domain value failed validation.
    #[error("Invalid value for '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An external store read did not complete within the configured timeout.
    #[error("Timed out reading {operation} after {timeout_secs}s")]
    StoreTimeout {
        /// The read operation that timed out (e.g. "attendance and leave").
        operation: String,
        /// The configured timeout in seconds.
        timeout_secs: u64,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
