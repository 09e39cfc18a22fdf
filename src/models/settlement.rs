//! Payment and settlement models used by reconciliation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An internally recorded payment awaiting reconciliation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::InternalPayment;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let payment = InternalPayment {
///     id: "pay_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     amount: Decimal::from_str("50000.00").unwrap(),
///     paid_on: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
///     reference: Some("UTR20240501A".to_string()),
/// };
/// assert!(payment.reference.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternalPayment {
    /// Unique identifier of the internal payment row.
    pub id: String,
    /// The employee the payment was made to.
    pub employee_id: String,
    /// The paid amount.
    pub amount: Decimal,
    /// The date the payment was recorded.
    pub paid_on: NaiveDate,
    /// The bank reference (UTR), if one was captured at payment time.
    #[serde(default)]
    pub reference: Option<String>,
}

/// One row of the externally supplied settlement feed (e.g. a bank
/// statement line). Read-only input; the engine never mutates these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSettlementRecord {
    /// The settlement reference (UTR) reported by the bank.
    pub reference: String,
    /// The settled amount.
    pub amount: Decimal,
    /// The settlement date. Compared by calendar day only.
    pub settled_on: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_payment_reference_defaults_to_none() {
        let json = r#"{
            "id": "pay_001",
            "employee_id": "emp_001",
            "amount": "50000.00",
            "paid_on": "2024-05-01"
        }"#;

        let payment: InternalPayment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.reference, None);
    }

    #[test]
    fn test_settlement_record_deserialization() {
        let json = r#"{
            "reference": "UTR20240501A",
            "amount": "50000.00",
            "settled_on": "2024-05-01"
        }"#;

        let row: PaymentSettlementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(row.reference, "UTR20240501A");
    }
}
