//! Leave balance assembly.
//!
//! Combines usage, accrual and eligibility for one employee into a
//! [`LeaveBalance`]. All figures are floored to two decimals here and
//! nowhere earlier, and `available` is derived from the floored figures so
//! that `available = max(0, accrued - expired - used - pending)` holds
//! exactly on the reported values.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::CompanySettings;
use crate::models::{
    AnnualLeaveBalance, AuditStep, AuditWarning, Employee, LeaveBalance, LeaveCategory,
    LeaveRequest, LeaveStatus, LeaveType, LeaveTypeBalance,
};

use super::accrual::{calculate_annual_reset_accrual, calculate_carry_over_accrual};
use super::eligibility::check_annual_leave_eligibility;
use super::rounding::floor_days;
use super::usage::aggregate_usage;

/// Warning code for requests whose leave type is not recognised.
pub const UNKNOWN_LEAVE_TYPE_WARNING: &str = "UNKNOWN_LEAVE_TYPE";

/// Warning code for approved annual leave taken before the eligibility date.
pub const INELIGIBLE_ANNUAL_LEAVE_WARNING: &str = "INELIGIBLE_ANNUAL_LEAVE_USED";

/// The assembled balance of one employee with its audit records.
#[derive(Debug, Clone)]
pub struct BalanceAssembly {
    /// The employee's balance.
    pub balance: LeaveBalance,
    /// Every rule applied, in order.
    pub audit_steps: Vec<AuditStep>,
    /// Anomalies found in the employee's data.
    pub warnings: Vec<AuditWarning>,
}

/// Assembles the leave balance of one employee.
///
/// # Arguments
///
/// * `employee` - The employee
/// * `requests` - The employee's own leave requests
/// * `settings` - The company's leave settings
/// * `as_of` - The evaluation date
/// * `step_number` - The number of the first audit step
///
/// # Example
///
/// ```
/// use leave_engine::calculation::assemble_balance;
/// use leave_engine::config::{CompanySettings, LeavePolicy};
/// use leave_engine::models::Employee;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     company_id: "acme".to_string(),
///     first_name: "Ahmad".to_string(),
///     last_name: "Hassan".to_string(),
///     department: "Operations".to_string(),
///     join_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
/// };
/// let settings = CompanySettings {
///     company_id: "acme".to_string(),
///     name: "Acme".to_string(),
///     annual_leave_days_per_year: Decimal::from(21),
///     sick_leave_days_per_year: Decimal::from(15),
///     emergency_leave_days_per_year: Decimal::from(3),
///     policy: LeavePolicy::default(),
/// };
///
/// let assembly = assemble_balance(
///     &employee,
///     &[],
///     &settings,
///     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///     1,
/// );
/// assert_eq!(assembly.balance.annual_leave.available.to_string(), "21.00");
/// assert!(assembly.balance.annual_leave.eligible);
/// ```
pub fn assemble_balance(
    employee: &Employee,
    requests: &[LeaveRequest],
    settings: &CompanySettings,
    as_of: NaiveDate,
    step_number: u32,
) -> BalanceAssembly {
    let mut audit_steps = Vec::new();
    let mut warnings = Vec::new();
    let mut step = step_number;

    let eligibility = check_annual_leave_eligibility(
        employee.join_date,
        as_of,
        settings.policy.eligibility_months,
        step,
    );
    audit_steps.push(eligibility.audit_step);
    step += 1;

    let mut figures_for = |leave_type: &LeaveType, entitlement: Decimal| {
        assemble_leave_type(
            leave_type,
            entitlement,
            employee,
            requests,
            settings,
            as_of,
            &mut step,
            &mut audit_steps,
        )
    };

    let annual = figures_for(&LeaveType::Annual, settings.annual_leave_days_per_year);
    let sick = figures_for(&LeaveType::Sick, settings.sick_leave_days_per_year);
    let emergency = figures_for(
        &LeaveType::Emergency,
        settings.emergency_leave_days_per_year,
    );

    let annual_leave = AnnualLeaveBalance {
        accrued: annual.accrued,
        used: annual.used,
        pending: annual.pending,
        available: annual.available,
        expired: annual.expired,
        expiring_soon: annual.expiring_soon,
        eligible: eligibility.eligible,
        max_accumulation: annual.max_accumulation,
    };

    if !eligibility.eligible && has_approved_annual_leave(requests) {
        warnings.push(AuditWarning::new(
            INELIGIBLE_ANNUAL_LEAVE_WARNING,
            format!(
                "Employee {} has approved annual leave after {} months of service (minimum {})",
                employee.id, eligibility.months_worked, settings.policy.eligibility_months
            ),
            "medium",
        ));
    }

    for request in requests.iter().filter(|r| !r.leave_type.is_known()) {
        warnings.push(AuditWarning::new(
            UNKNOWN_LEAVE_TYPE_WARNING,
            format!(
                "Leave request {} has unrecognised type '{}' ({}); not counted toward any balance",
                request.id,
                request.leave_type.label(),
                request.leave_type.code()
            ),
            "low",
        ));
    }

    BalanceAssembly {
        balance: LeaveBalance {
            employee_id: employee.id.clone(),
            employee_name: employee.full_name(),
            department: employee.department.clone(),
            annual_leave,
            sick_leave: sick.into(),
            emergency_leave: emergency.into(),
        },
        audit_steps,
        warnings,
    }
}

/// Floored figures of one leave type.
#[derive(Debug, Clone, Copy)]
struct LeaveFigures {
    accrued: Decimal,
    used: Decimal,
    pending: Decimal,
    expired: Decimal,
    expiring_soon: Decimal,
    max_accumulation: Decimal,
    available: Decimal,
}

impl From<LeaveFigures> for LeaveTypeBalance {
    fn from(figures: LeaveFigures) -> Self {
        LeaveTypeBalance {
            accrued: figures.accrued,
            used: figures.used,
            pending: figures.pending,
            available: figures.available,
        }
    }
}

/// Computes usage and accrual of one leave type, choosing both policies
/// from the type's [`LeaveCategory`].
#[allow(clippy::too_many_arguments)]
fn assemble_leave_type(
    leave_type: &LeaveType,
    entitlement: Decimal,
    employee: &Employee,
    requests: &[LeaveRequest],
    settings: &CompanySettings,
    as_of: NaiveDate,
    step: &mut u32,
    audit_steps: &mut Vec<AuditStep>,
) -> LeaveFigures {
    let category = leave_type.category();

    let usage = aggregate_usage(requests, leave_type, as_of, category.resets_annually(), *step);
    audit_steps.push(usage.audit_step);
    *step += 1;

    let (accrued, expired, expiring_soon, max_accumulation) = match category {
        LeaveCategory::CarryOver => {
            let result = calculate_carry_over_accrual(
                entitlement,
                employee.join_date,
                as_of,
                &settings.policy,
                *step,
            );
            audit_steps.push(result.audit_step);
            let accrual = result.accrual;
            (
                accrual.accrued,
                accrual.expired,
                accrual.expiring_soon,
                accrual.max_accumulation,
            )
        }
        LeaveCategory::AnnualReset => {
            let result = calculate_annual_reset_accrual(
                leave_type,
                entitlement,
                employee.join_date,
                as_of,
                *step,
            );
            audit_steps.push(result.audit_step);
            (result.accrued, Decimal::ZERO, Decimal::ZERO, entitlement)
        }
    };
    *step += 1;

    let accrued = floor_days(accrued);
    let expired = floor_days(expired);
    let used = floor_days(usage.usage.used);
    let pending = floor_days(usage.usage.pending);
    LeaveFigures {
        accrued,
        used,
        pending,
        expired,
        expiring_soon: floor_days(expiring_soon),
        max_accumulation: floor_days(max_accumulation),
        available: floor_days((accrued - expired - used - pending).max(Decimal::ZERO)),
    }
}

fn has_approved_annual_leave(requests: &[LeaveRequest]) -> bool {
    requests
        .iter()
        .any(|r| r.leave_type == LeaveType::Annual && r.status == LeaveStatus::Approved)
}
