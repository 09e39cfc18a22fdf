//! In-memory store implementations.
//!
//! A single [`InMemoryStore`] implements every store trait behind one
//! mutex, which makes the payroll write path (record insert plus
//! adjustment flag flips) naturally atomic. The test suites build their
//! fixtures on it; embedders can use it for prototyping.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Adjustment, AttendanceRecord, Employee, LeaveRequest, PayPeriod, PaymentSettlementRecord,
    PayrollRecord, SalaryStructure,
};

use super::{
    AdjustmentStore, AttendanceStore, EmployeeDirectory, LeaveStore, PayrollStore,
    SalaryStructureStore, SettlementFeed,
};

#[derive(Debug, Default)]
struct Inner {
    employees: Vec<Employee>,
    attendance: Vec<AttendanceRecord>,
    leave: Vec<LeaveRequest>,
    structures: Vec<SalaryStructure>,
    adjustments: Vec<Adjustment>,
    // Keyed by (employee_id, period label).
    records: HashMap<(String, String), PayrollRecord>,
    // Keyed by (company_id, period label).
    settlements: HashMap<(String, String), Vec<PaymentSettlementRecord>>,
}

/// Mutex-backed implementation of all store traits.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an employee.
    pub fn add_employee(&self, employee: Employee) {
        self.lock().employees.push(employee);
    }

    /// Adds one attendance row.
    pub fn add_attendance(&self, record: AttendanceRecord) {
        self.lock().attendance.push(record);
    }

    /// Adds an approved leave request.
    pub fn add_leave(&self, request: LeaveRequest) {
        self.lock().leave.push(request);
    }

    /// Adds a salary structure version.
    pub fn add_structure(&self, structure: SalaryStructure) {
        self.lock().structures.push(structure);
    }

    /// Adds a one-off adjustment.
    pub fn add_adjustment(&self, adjustment: Adjustment) {
        self.lock().adjustments.push(adjustment);
    }

    /// Supplies the settlement rows for a company and period.
    pub fn set_settlement_rows(
        &self,
        company_id: &str,
        period: PayPeriod,
        rows: Vec<PaymentSettlementRecord>,
    ) {
        self.lock()
            .settlements
            .insert((company_id.to_string(), period.label()), rows);
    }

    /// Returns a stored adjustment by id, for asserting on its flag.
    pub fn adjustment(&self, id: Uuid) -> Option<Adjustment> {
        self.lock().adjustments.iter().find(|a| a.id == id).cloned()
    }

    /// Returns the number of stored payroll records.
    pub fn record_count(&self) -> usize {
        self.lock().records.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a holder panicked; propagate the panic.
        self.inner.lock().expect("in-memory store lock poisoned")
    }
}

impl EmployeeDirectory for InMemoryStore {
    fn find_employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.lock()
            .employees
            .iter()
            .find(|e| e.id == employee_id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn active_employees(&self, company_id: &str) -> EngineResult<Vec<Employee>> {
        Ok(self
            .lock()
            .employees
            .iter()
            .filter(|e| e.company_id == company_id && e.active)
            .cloned()
            .collect())
    }
}

impl AttendanceStore for InMemoryStore {
    fn attendance_in_range(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .lock()
            .attendance
            .iter()
            .filter(|r| r.employee_id == employee_id && r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }
}

impl LeaveStore for InMemoryStore {
    fn approved_leave_overlapping(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self
            .lock()
            .leave
            .iter()
            .filter(|l| l.employee_id == employee_id && l.start_date <= end && l.end_date >= start)
            .cloned()
            .collect())
    }
}

impl SalaryStructureStore for InMemoryStore {
    fn structures_for(&self, employee_id: &str) -> EngineResult<Vec<SalaryStructure>> {
        Ok(self
            .lock()
            .structures
            .iter()
            .filter(|s| s.employee_id == employee_id)
            .cloned()
            .collect())
    }
}

impl AdjustmentStore for InMemoryStore {
    fn pending_adjustments(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Vec<Adjustment>> {
        Ok(self
            .lock()
            .adjustments
            .iter()
            .filter(|a| a.employee_id == employee_id && a.period == period && !a.applied)
            .cloned()
            .collect())
    }
}

impl PayrollStore for InMemoryStore {
    fn insert_with_adjustments(
        &self,
        record: PayrollRecord,
        adjustment_ids: &[Uuid],
    ) -> EngineResult<()> {
        let mut inner = self.lock();
        let key = (record.employee_id.clone(), record.period.label());
        // The conflict check comes before any flag flip, so a rejected
        // regeneration leaves every adjustment untouched.
        if inner.records.contains_key(&key) {
            return Err(EngineError::RecordAlreadyExists {
                employee_id: record.employee_id.clone(),
                period: record.period.label(),
            });
        }
        for adjustment in inner
            .adjustments
            .iter_mut()
            .filter(|a| adjustment_ids.contains(&a.id))
        {
            adjustment.applied = true;
        }
        inner.records.insert(key, record);
        Ok(())
    }

    fn find_record(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Option<PayrollRecord>> {
        Ok(self
            .lock()
            .records
            .get(&(employee_id.to_string(), period.label()))
            .cloned())
    }

    fn update_record(&self, record: &PayrollRecord) -> EngineResult<()> {
        let mut inner = self.lock();
        let key = (record.employee_id.clone(), record.period.label());
        match inner.records.get_mut(&key) {
            Some(stored) => {
                *stored = record.clone();
                Ok(())
            }
            None => Err(EngineError::Validation {
                field: "record".to_string(),
                message: format!(
                    "no stored record for employee '{}' in period {}",
                    record.employee_id,
                    record.period.label()
                ),
            }),
        }
    }
}

impl SettlementFeed for InMemoryStore {
    fn settlement_rows(
        &self,
        company_id: &str,
        period: PayPeriod,
    ) -> EngineResult<Vec<PaymentSettlementRecord>> {
        Ok(self
            .lock()
            .settlements
            .get(&(company_id.to_string(), period.label()))
            .cloned()
            .unwrap_or_default())
    }
}
