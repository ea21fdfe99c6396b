//! Computed leave balance models.
//!
//! A [`LeaveBalance`] is derived from scratch on every request and is never
//! persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balance of a leave type that resets every calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypeBalance {
    /// Days granted for the current year.
    pub accrued: Decimal,
    /// Days taken through approved requests.
    pub used: Decimal,
    /// Days in requests awaiting a decision.
    pub pending: Decimal,
    /// Days still available to request.
    pub available: Decimal,
}

impl LeaveTypeBalance {
    /// Returns a balance with every figure at zero.
    pub fn zero() -> Self {
        Self {
            accrued: Decimal::ZERO,
            used: Decimal::ZERO,
            pending: Decimal::ZERO,
            available: Decimal::ZERO,
        }
    }
}

/// Balance of annual leave, which carries over between years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualLeaveBalance {
    /// Days earned to date, capped at `max_accumulation`.
    pub accrued: Decimal,
    /// Days taken through approved requests.
    pub used: Decimal,
    /// Days in requests awaiting a decision.
    pub pending: Decimal,
    /// Days still available to request.
    pub available: Decimal,
    /// Days that aged past the carry-over cap.
    pub expired: Decimal,
    /// Days that will cross the carry-over cap within the warning window.
    pub expiring_soon: Decimal,
    /// Whether the employee has served long enough to take annual leave.
    pub eligible: bool,
    /// The most annual leave that can be held at once.
    pub max_accumulation: Decimal,
}

/// The leave balances of one employee.
///
/// # Example
///
/// ```
/// use leave_engine::models::{AnnualLeaveBalance, LeaveBalance, LeaveTypeBalance};
/// use rust_decimal::Decimal;
///
/// let balance = LeaveBalance {
///     employee_id: "emp_001".to_string(),
///     employee_name: "Ahmad Hassan".to_string(),
///     department: "Operations".to_string(),
///     annual_leave: AnnualLeaveBalance {
///         accrued: Decimal::new(2100, 2),
///         used: Decimal::ZERO,
///         pending: Decimal::ZERO,
///         available: Decimal::new(2100, 2),
///         expired: Decimal::ZERO,
///         expiring_soon: Decimal::ZERO,
///         eligible: true,
///         max_accumulation: Decimal::new(4200, 2),
///     },
///     sick_leave: LeaveTypeBalance::zero(),
///     emergency_leave: LeaveTypeBalance::zero(),
/// };
/// assert!(balance.annual_leave.eligible);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// The employee the balance belongs to.
    pub employee_id: String,
    /// The employee's display name.
    pub employee_name: String,
    /// The employee's department.
    pub department: String,
    /// Annual leave balance.
    pub annual_leave: AnnualLeaveBalance,
    /// Sick leave balance.
    pub sick_leave: LeaveTypeBalance,
    /// Emergency leave balance.
    pub emergency_leave: LeaveTypeBalance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_zero_balance() {
        let balance = LeaveTypeBalance::zero();
        assert_eq!(balance.accrued, Decimal::ZERO);
        assert_eq!(balance.available, Decimal::ZERO);
    }

    #[test]
    fn test_balance_serializes_decimals_as_strings() {
        let balance = LeaveTypeBalance {
            accrued: dec("15.00"),
            used: dec("3.00"),
            pending: dec("1.00"),
            available: dec("11.00"),
        };
        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["accrued"], "15.00");
        assert_eq!(json["available"], "11.00");
    }

    #[test]
    fn test_annual_balance_field_names() {
        let balance = AnnualLeaveBalance {
            accrued: dec("10.50"),
            used: Decimal::ZERO,
            pending: Decimal::ZERO,
            available: dec("10.50"),
            expired: Decimal::ZERO,
            expiring_soon: Decimal::ZERO,
            eligible: false,
            max_accumulation: dec("42"),
        };
        let json = serde_json::to_value(&balance).unwrap();
        assert_eq!(json["eligible"], false);
        assert!(json.get("expiring_soon").is_some());
        assert!(json.get("max_accumulation").is_some());
    }
}
