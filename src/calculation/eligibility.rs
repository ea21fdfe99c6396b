//! Annual leave eligibility.
//!
//! Employees earn annual leave from their first day but may only draw it
//! down after a minimum tenure. The gate only sets the `eligible` flag on
//! the balance: accrual is never zeroed, and approved requests of an
//! ineligible employee still count as used.

use chrono::NaiveDate;

use crate::models::AuditStep;

use super::date_arithmetic::months_between;

/// The result of an eligibility check, including the audit step.
#[derive(Debug, Clone)]
pub struct EligibilityResult {
    /// Whether the employee may take annual leave.
    pub eligible: bool,
    /// Calendar months of service at the evaluation date.
    pub months_worked: u32,
    /// The audit step recording this check.
    pub audit_step: AuditStep,
}

/// Returns true once the employee has served `minimum_months` calendar months.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::is_eligible_for_annual_leave;
/// use chrono::NaiveDate;
///
/// let joined = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert!(is_eligible_for_annual_leave(joined, NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(), 9));
/// assert!(!is_eligible_for_annual_leave(joined, NaiveDate::from_ymd_opt(2025, 9, 30).unwrap(), 9));
/// ```
pub fn is_eligible_for_annual_leave(
    join_date: NaiveDate,
    as_of: NaiveDate,
    minimum_months: u32,
) -> bool {
    months_between(join_date, as_of) >= minimum_months
}

/// Checks annual leave eligibility and records the decision.
pub fn check_annual_leave_eligibility(
    join_date: NaiveDate,
    as_of: NaiveDate,
    minimum_months: u32,
    step_number: u32,
) -> EligibilityResult {
    let months_worked = months_between(join_date, as_of);
    let eligible = is_eligible_for_annual_leave(join_date, as_of, minimum_months);

    let reasoning = if eligible {
        format!(
            "{} months of service meets the {}-month minimum",
            months_worked, minimum_months
        )
    } else {
        format!(
            "{} months of service is below the {}-month minimum; annual leave accrues but cannot be taken yet",
            months_worked, minimum_months
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "annual_leave_eligibility".to_string(),
        rule_name: "Annual Leave Eligibility".to_string(),
        policy_ref: "policy.eligibility_months".to_string(),
        input: serde_json::json!({
            "join_date": join_date.to_string(),
            "as_of": as_of.to_string(),
            "minimum_months": minimum_months
        }),
        output: serde_json::json!({
            "months_worked": months_worked,
            "eligible": eligible
        }),
        reasoning,
    };

    EligibilityResult {
        eligible,
        months_worked,
        audit_step,
    }
}
