//! Balance report models for the Leave Balance Engine.
//!
//! This module contains the [`BalanceReport`] type and its audit structures,
//! which capture the balances computed for one company together with a trace
//! of every rule applied along the way.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::LeaveBalance;

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The settings key that parameterises this rule.
    pub policy_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate potential issues that don't prevent calculation
/// but may require attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

impl AuditWarning {
    /// Creates a new warning.
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: severity.into(),
        }
    }
}

/// The complete audit trace for a report.
///
/// # Example
///
/// ```
/// use leave_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The leave balances of every employee in a company, as of one date.
///
/// # Example
///
/// ```
/// use leave_engine::models::{AuditTrace, BalanceReport};
/// use chrono::{NaiveDate, Utc};
/// use uuid::Uuid;
///
/// let report = BalanceReport {
///     report_id: Uuid::new_v4(),
///     generated_at: Utc::now(),
///     engine_version: "0.1.0".to_string(),
///     company_id: "acme".to_string(),
///     as_of: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
///     balances: vec![],
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert!(report.balance_for("emp_001").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Unique identifier for this report.
    pub report_id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the report.
    pub engine_version: String,
    /// The company the report covers.
    pub company_id: String,
    /// The evaluation date used for every balance.
    pub as_of: NaiveDate,
    /// One balance per employee.
    pub balances: Vec<LeaveBalance>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl BalanceReport {
    /// Finds the balance of one employee.
    pub fn balance_for(&self, employee_id: &str) -> Option<&LeaveBalance> {
        self.balances.iter().find(|b| b.employee_id == employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnnualLeaveBalance, LeaveTypeBalance};
    use rust_decimal::Decimal;

    fn create_balance(employee_id: &str) -> LeaveBalance {
        LeaveBalance {
            employee_id: employee_id.to_string(),
            employee_name: "Test Employee".to_string(),
            department: "HR".to_string(),
            annual_leave: AnnualLeaveBalance {
                accrued: Decimal::ZERO,
                used: Decimal::ZERO,
                pending: Decimal::ZERO,
                available: Decimal::ZERO,
                expired: Decimal::ZERO,
                expiring_soon: Decimal::ZERO,
                eligible: false,
                max_accumulation: Decimal::new(42, 0),
            },
            sick_leave: LeaveTypeBalance::zero(),
            emergency_leave: LeaveTypeBalance::zero(),
        }
    }

    fn create_report(balances: Vec<LeaveBalance>) -> BalanceReport {
        BalanceReport {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: "0.1.0".to_string(),
            company_id: "acme".to_string(),
            as_of: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            balances,
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![AuditWarning::new("UNKNOWN_LEAVE_TYPE", "test", "low")],
                duration_us: 10,
            },
        }
    }

    #[test]
    fn test_balance_for_finds_employee() {
        let report = create_report(vec![create_balance("emp_001"), create_balance("emp_002")]);
        let balance = report.balance_for("emp_002").unwrap();
        assert_eq!(balance.employee_id, "emp_002");
    }

    #[test]
    fn test_balance_for_unknown_employee_is_none() {
        let report = create_report(vec![create_balance("emp_001")]);
        assert!(report.balance_for("emp_999").is_none());
    }

    #[test]
    fn test_report_serialization() {
        let report = create_report(vec![create_balance("emp_001")]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["company_id"], "acme");
        assert_eq!(json["as_of"], "2025-06-30");
        assert_eq!(json["balances"][0]["employee_id"], "emp_001");
        assert_eq!(
            json["audit_trace"]["warnings"][0]["code"],
            "UNKNOWN_LEAVE_TYPE"
        );
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "annual_leave_accrual".to_string(),
            rule_name: "Annual Leave Accrual".to_string(),
            policy_ref: "annual_leave_days_per_year".to_string(),
            input: serde_json::json!({ "months_worked": 12 }),
            output: serde_json::json!({ "accrued": "21.00" }),
            reasoning: "12 months × 1.75 = 21.00".to_string(),
        };
        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"policy_ref\":\"annual_leave_days_per_year\""));
        assert!(json.contains("\"months_worked\":12"));
    }
}
