//! Payroll generation stages.
//!
//! This module contains the calculation pipeline that turns a salary
//! structure, attendance, leave and one-off adjustments into a payroll
//! record: structure version resolution, attendance aggregation, the
//! two-phase component calculator, adjustment application and final
//! record assembly. Every stage is a pure function over its inputs so the
//! batch engine can run one employee's pipeline end to end, independent
//! of every other employee's.

mod adjustment_applier;
mod attendance_aggregator;
mod component_calculator;
mod record_builder;
mod structure_resolver;

pub use adjustment_applier::{AdjustmentOutcome, apply_adjustments};
pub use attendance_aggregator::{AttendanceSummary, aggregate_attendance};
pub use component_calculator::{
    DeductionsResult, EarningsResult, calculate_deductions, calculate_earnings,
};
pub use record_builder::{build_record, round_money};
pub use structure_resolver::resolve_structure;
