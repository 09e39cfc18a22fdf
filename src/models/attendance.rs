//! Attendance and leave models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-day attendance status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Present for the full day.
    Present,
    /// Present but arrived late. Counts as a present day for pay.
    Late,
    /// Absent without approved leave.
    Absent,
}

/// One attendance row for one employee on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee the row belongs to.
    pub employee_id: String,
    /// The attendance date.
    pub date: NaiveDate,
    /// The recorded status.
    pub status: AttendanceStatus,
}

/// An approved leave request overlapping a payroll period.
///
/// The day count is recorded on the request rather than derived from the
/// date range, so half-day and sandwiching policies applied upstream are
/// respected as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// The employee the request belongs to.
    pub employee_id: String,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of leave days counted against the period.
    pub days: u32,
    /// Whether the leave type is paid.
    pub is_paid: bool,
}
