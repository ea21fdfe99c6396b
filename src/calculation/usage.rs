//! Leave usage aggregation.
//!
//! Sums the days an employee has taken (approved) and has waiting for a
//! decision (pending) for one leave type.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AuditStep, LeaveRequest, LeaveStatus, LeaveType};

use super::date_arithmetic::{days_between, year_start};

/// Days used and pending for one leave type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeaveUsage {
    /// Days in approved requests.
    pub used: Decimal,
    /// Days in requests awaiting a decision.
    pub pending: Decimal,
}

/// The result of aggregating usage, including the usage and audit step.
#[derive(Debug, Clone)]
pub struct UsageResult {
    /// The aggregated usage.
    pub usage: LeaveUsage,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Returns the number of days a request counts toward usage.
///
/// For leave types that reset annually only the part of the request between
/// January 1 of the evaluation year and the evaluation date counts. Requests
/// whose counted span is empty or inverted count zero days.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::counted_days;
/// use leave_engine::models::{LeaveRequest, LeaveStatus, LeaveType};
/// use chrono::{NaiveDate, Utc};
///
/// let request = LeaveRequest {
///     id: "lr_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     leave_type: LeaveType::Sick,
///     start_date: NaiveDate::from_ymd_opt(2024, 12, 28).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
///     status: LeaveStatus::Approved,
///     created_at: Utc::now(),
/// };
/// let as_of = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
///
/// assert_eq!(counted_days(&request, as_of, true), 3);
/// assert_eq!(counted_days(&request, as_of, false), 7);
/// ```
pub fn counted_days(request: &LeaveRequest, as_of: NaiveDate, reset_annually: bool) -> u32 {
    let (start, end) = if reset_annually {
        (
            request.start_date.max(year_start(as_of)),
            request.end_date.min(as_of),
        )
    } else {
        (request.start_date, request.end_date)
    };

    if start > end {
        return 0;
    }
    days_between(start, end)
}

/// Aggregates used and pending days for one leave type.
///
/// # Arguments
///
/// * `requests` - The leave requests of a single employee
/// * `leave_type` - The leave type to aggregate
/// * `as_of` - The evaluation date
/// * `reset_annually` - Whether only the current calendar year counts
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Approved days are counted as used, pending days as pending. Rejected
/// requests and requests of other leave types contribute nothing.
pub fn aggregate_usage(
    requests: &[LeaveRequest],
    leave_type: &LeaveType,
    as_of: NaiveDate,
    reset_annually: bool,
    step_number: u32,
) -> UsageResult {
    let mut usage = LeaveUsage::default();
    let mut matched = 0usize;
    let mut counted = 0usize;

    for request in requests.iter().filter(|r| &r.leave_type == leave_type) {
        matched += 1;
        let days = Decimal::from(counted_days(request, as_of, reset_annually));
        if days.is_zero() {
            continue;
        }
        match request.status {
            LeaveStatus::Approved => {
                usage.used += days;
                counted += 1;
            }
            LeaveStatus::Pending => {
                usage.pending += days;
                counted += 1;
            }
            LeaveStatus::Rejected => {}
        }
    }

    let window = if reset_annually {
        format!("{} to {}", year_start(as_of), as_of)
    } else {
        "all time".to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: format!("usage_{}", leave_type.code().to_lowercase()),
        rule_name: format!("{} Usage", leave_type.label()),
        policy_ref: "leave_requests".to_string(),
        input: serde_json::json!({
            "leave_type": leave_type.label(),
            "requests_of_type": matched,
            "reset_annually": reset_annually,
            "as_of": as_of.to_string()
        }),
        output: serde_json::json!({
            "used": usage.used.to_string(),
            "pending": usage.pending.to_string(),
            "requests_counted": counted
        }),
        reasoning: format!(
            "{} of {} {} requests counted ({}): {} days used, {} days pending",
            counted,
            matched,
            leave_type.label(),
            window,
            usage.used,
            usage.pending
        ),
    };

    UsageResult { usage, audit_step }
}
