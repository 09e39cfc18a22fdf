//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod adjustment;
mod attendance;
mod employee;
mod pay_period;
mod payroll_record;
mod reconciliation;
mod salary;
mod settlement;

pub use adjustment::{Adjustment, AdjustmentKind};
pub use attendance::{AttendanceRecord, AttendanceStatus, LeaveRequest};
pub use employee::Employee;
pub use pay_period::PayPeriod;
pub use payroll_record::{ComponentLine, PayrollRecord, PayrollStatus};
pub use reconciliation::{
    MatchStatus, ReconciliationItem, ReconciliationRun, ResolutionStatus, RunStatus, VarianceReason,
};
pub use salary::{
    CalculationType, ComponentAssignment, ComponentKind, SalaryComponent, SalaryStructure,
};
pub use settlement::{InternalPayment, PaymentSettlementRecord};
