//! Attendance and leave aggregation.
//!
//! This module turns raw attendance rows and approved leave requests into
//! the day counts payroll proration is based on.

use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, AttendanceStatus, LeaveRequest};

/// Aggregated day counts for one employee and period.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::AttendanceSummary;
///
/// let summary = AttendanceSummary {
///     total_working_days: 22,
///     present_days: 20,
///     absent_days: 0,
///     paid_leave_days: 0,
///     unpaid_leave_days: 2,
/// };
/// assert_eq!(summary.payable_days(), 20);
/// assert_eq!(summary.loss_of_pay_days(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceSummary {
    /// Count of attendance rows in the period.
    pub total_working_days: u32,
    /// Rows marked present or late.
    pub present_days: u32,
    /// Rows marked absent.
    pub absent_days: u32,
    /// Approved paid leave days overlapping the period.
    pub paid_leave_days: u32,
    /// Approved unpaid leave days overlapping the period.
    pub unpaid_leave_days: u32,
}

impl AttendanceSummary {
    /// Days the employee is paid for: present plus paid leave.
    pub fn payable_days(&self) -> u32 {
        self.present_days + self.paid_leave_days
    }

    /// Loss-of-pay days: absent plus unpaid leave.
    pub fn loss_of_pay_days(&self) -> u32 {
        self.absent_days + self.unpaid_leave_days
    }

    /// Prorates an amount by `payable_days / total_working_days`.
    ///
    /// Multiplies before dividing so amounts that divide evenly stay
    /// exact (22000 * 20 / 22 is exactly 20000).
    ///
    /// Callers must ensure `total_working_days > 0`; the payroll pipeline
    /// rejects empty periods before proration is reached.
    pub fn prorate(&self, amount: Decimal) -> Decimal {
        amount * Decimal::from(self.payable_days()) / Decimal::from(self.total_working_days)
    }
}

/// Aggregates attendance rows and leave requests into an [`AttendanceSummary`].
///
/// Counting rules:
/// - `total_working_days` is the number of attendance rows supplied.
/// - Present and late rows both count as present days.
/// - Leave day counts are summed from each request's `days` field and
///   split by the request's paid flag.
pub fn aggregate_attendance(
    attendance: &[AttendanceRecord],
    leave: &[LeaveRequest],
) -> AttendanceSummary {
    let mut present_days = 0;
    let mut absent_days = 0;
    for record in attendance {
        match record.status {
            AttendanceStatus::Present | AttendanceStatus::Late => present_days += 1,
            AttendanceStatus::Absent => absent_days += 1,
        }
    }

    let mut paid_leave_days = 0;
    let mut unpaid_leave_days = 0;
    for request in leave {
        if request.is_paid {
            paid_leave_days += request.days;
        } else {
            unpaid_leave_days += request.days;
        }
    }

    AttendanceSummary {
        total_working_days: attendance.len() as u32,
        present_days,
        absent_days,
        paid_leave_days,
        unpaid_leave_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn attendance_row(day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            status,
        }
    }

    fn leave(days: u32, is_paid: bool) -> LeaveRequest {
        LeaveRequest {
            employee_id: "emp_001".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            days,
            is_paid,
        }
    }

    /// AA-001: 22 working days, 20 present, 2 unpaid leave
    #[test]
    fn test_payable_and_lop_day_counts() {
        let mut rows: Vec<AttendanceRecord> = (1..=20)
            .map(|d| attendance_row(d, AttendanceStatus::Present))
            .collect();
        rows.push(attendance_row(21, AttendanceStatus::Absent));
        rows.push(attendance_row(22, AttendanceStatus::Absent));
        // The two absences are covered by an unpaid leave request in
        // another variant; here they stay plain absences.
        let summary = aggregate_attendance(&rows, &[]);

        assert_eq!(summary.total_working_days, 22);
        assert_eq!(summary.present_days, 20);
        assert_eq!(summary.absent_days, 2);
        assert_eq!(summary.payable_days(), 20);
        assert_eq!(summary.loss_of_pay_days(), 2);
    }

    /// AA-002: late rows count as present
    #[test]
    fn test_late_counts_as_present() {
        let rows = vec![
            attendance_row(1, AttendanceStatus::Present),
            attendance_row(2, AttendanceStatus::Late),
            attendance_row(3, AttendanceStatus::Absent),
        ];
        let summary = aggregate_attendance(&rows, &[]);

        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.absent_days, 1);
    }

    /// AA-003: leave day counts split by the paid flag
    #[test]
    fn test_leave_split_by_paid_flag() {
        let rows = vec![attendance_row(1, AttendanceStatus::Present)];
        let requests = vec![leave(3, true), leave(2, false), leave(1, true)];
        let summary = aggregate_attendance(&rows, &requests);

        assert_eq!(summary.paid_leave_days, 4);
        assert_eq!(summary.unpaid_leave_days, 2);
        assert_eq!(summary.payable_days(), 5);
        assert_eq!(summary.loss_of_pay_days(), 2);
    }

    /// AA-004: proration multiplies before dividing
    #[test]
    fn test_prorate_is_exact_when_divisible() {
        let summary = AttendanceSummary {
            total_working_days: 22,
            present_days: 20,
            absent_days: 2,
            paid_leave_days: 0,
            unpaid_leave_days: 0,
        };
        let prorated = summary.prorate(Decimal::from(22000));
        assert_eq!(prorated, Decimal::from(20000));
    }

    #[test]
    fn test_prorate_of_non_divisible_amount() {
        let summary = AttendanceSummary {
            total_working_days: 22,
            present_days: 20,
            absent_days: 2,
            paid_leave_days: 0,
            unpaid_leave_days: 0,
        };
        let prorated = summary.prorate(Decimal::from(5000));
        // 5000 * 20 / 22 = 4545.4545...
        let rounded = prorated.round_dp(2);
        assert_eq!(rounded, Decimal::from_str("4545.45").unwrap());
    }

    #[test]
    fn test_empty_period_has_zero_working_days() {
        let summary = aggregate_attendance(&[], &[]);
        assert_eq!(summary.total_working_days, 0);
        assert_eq!(summary.payable_days(), 0);
    }
}
