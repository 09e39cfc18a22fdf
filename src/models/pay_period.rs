//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type identifying the calendar
//! month a payroll or reconciliation run covers.

use std::fmt;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Identifies a payroll period as a calendar month.
///
/// Payroll records are unique per employee and period, and reconciliation
/// runs are scoped to one period per company.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(5, 2024).unwrap();
/// assert_eq!(period.start_date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
/// assert_eq!(period.end_date(), NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
/// assert_eq!(period.label(), "2024-05");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The calendar month, 1 through 12.
    pub month: u32,
    /// The calendar year.
    pub year: i32,
}

impl PayPeriod {
    /// Creates a pay period, validating the month.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] if `month` is not in `1..=12`.
    pub fn new(month: u32, year: i32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::Validation {
                field: "month".to_string(),
                message: format!("must be between 1 and 12, got {month}"),
            });
        }
        Ok(Self { month, year })
    }

    /// Returns the first day of the period.
    pub fn start_date(&self) -> NaiveDate {
        // Month is validated on construction; fall back to January rather
        // than panicking if a deserialized period carries a bad month.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).expect("valid date"))
    }

    /// Returns the last day of the period.
    pub fn end_date(&self) -> NaiveDate {
        self.start_date() + Months::new(1) - Days::new(1)
    }

    /// Checks whether a date falls within this period (inclusive).
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns the "YYYY-MM" label used in keys and log lines.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// PP-001: start and end dates of a 31-day month
    #[test]
    fn test_start_and_end_of_may() {
        let period = PayPeriod::new(5, 2024).unwrap();
        assert_eq!(
            period.start_date(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert_eq!(
            period.end_date(),
            NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
        );
    }

    /// PP-002: February in a leap year ends on the 29th
    #[test]
    fn test_leap_year_february() {
        let period = PayPeriod::new(2, 2024).unwrap();
        assert_eq!(
            period.end_date(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    /// PP-003: December rolls over the year boundary correctly
    #[test]
    fn test_december_end_date() {
        let period = PayPeriod::new(12, 2024).unwrap();
        assert_eq!(
            period.end_date(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    /// PP-004: month 0 and month 13 are rejected
    #[test]
    fn test_invalid_month_rejected() {
        assert!(PayPeriod::new(0, 2024).is_err());
        assert!(PayPeriod::new(13, 2024).is_err());
        match PayPeriod::new(13, 2024).unwrap_err() {
            EngineError::Validation { field, .. } => assert_eq!(field, "month"),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_contains_is_month_scoped() {
        let period = PayPeriod::new(5, 2024).unwrap();
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
        assert!(period.contains(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(!period.contains(NaiveDate::from_ymd_opt(2023, 5, 15).unwrap()));
    }

    #[test]
    fn test_label_is_zero_padded() {
        let period = PayPeriod::new(5, 2024).unwrap();
        assert_eq!(period.label(), "2024-05");
    }

    #[test]
    fn test_serialization_round_trip() {
        let period = PayPeriod::new(11, 2023).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        let back: PayPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(period, back);
    }
}
