//! External-collaborator interfaces.
//!
//! The engine is a library invoked by an enclosing service; persistence
//! technology is out of its scope. These traits are the seams where that
//! service plugs in its data stores. All implementations must be
//! `Send + Sync` because the batch engine shares them across a worker
//! pool.
//!
//! [`memory`] provides `Mutex`-backed in-memory implementations used by
//! the test suites and useful for embedding.

pub mod memory;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{
    Adjustment, AttendanceRecord, Employee, LeaveRequest, PayPeriod, PaymentSettlementRecord,
    PayrollRecord, SalaryStructure,
};

/// Employee identity, company membership and active status.
pub trait EmployeeDirectory: Send + Sync {
    /// Looks up one employee.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::EmployeeNotFound`] if no
    /// employee has the given id.
    fn find_employee(&self, employee_id: &str) -> EngineResult<Employee>;

    /// Lists the active employees of a company.
    fn active_employees(&self, company_id: &str) -> EngineResult<Vec<Employee>>;
}

/// Per-day attendance rows.
pub trait AttendanceStore: Send + Sync {
    /// Returns the attendance rows for an employee within a date range
    /// (inclusive).
    fn attendance_in_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>>;
}

/// Approved leave requests.
pub trait LeaveStore: Send + Sync {
    /// Returns approved leave requests overlapping a date range
    /// (inclusive).
    fn approved_leave_overlapping(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<LeaveRequest>>;
}

/// Versioned salary structures.
pub trait SalaryStructureStore: Send + Sync {
    /// Returns every structure version for an employee, in creation order.
    fn structures_for(&self, employee_id: &str) -> EngineResult<Vec<SalaryStructure>>;
}

/// One-off adjustments.
pub trait AdjustmentStore: Send + Sync {
    /// Returns the adjustments for an employee and period that have not
    /// been applied yet.
    fn pending_adjustments(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Vec<Adjustment>>;
}

/// Payroll record persistence.
pub trait PayrollStore: Send + Sync {
    /// Inserts a payroll record and flips the given adjustments to
    /// applied, as one atomic unit: on any failure nothing is written and
    /// no flag is flipped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::RecordAlreadyExists`] if a
    /// record already exists for the record's employee and period.
    fn insert_with_adjustments(
        &self,
        record: PayrollRecord,
        adjustment_ids: &[Uuid],
    ) -> EngineResult<()>;

    /// Returns the record for an employee and period, if any.
    fn find_record(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Option<PayrollRecord>>;

    /// Replaces a stored record after a status transition.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::Validation`] if the record
    /// was never inserted.
    fn update_record(&self, record: &PayrollRecord) -> EngineResult<()>;
}

/// Bulk external settlement rows, supplied wholesale per run.
pub trait SettlementFeed: Send + Sync {
    /// Returns the settlement rows for a company and period.
    fn settlement_rows(
        &self,
        company_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Vec<PaymentSettlementRecord>>;
}
