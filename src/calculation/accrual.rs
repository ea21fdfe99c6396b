//! Leave accrual calculation.
//!
//! Two policies exist:
//!
//! - **Carry-over** leave (annual leave) is earned monthly from the join
//!   date. At most `carry_over_years` of entitlement can be held; anything
//!   earned beyond that is reported as expired.
//! - **Annual-reset** leave (sick and emergency leave) is granted in full on
//!   January 1, or pro-rated by month for employees who joined during the
//!   year.
//!
//! Expiry is approximated as "whatever overflows the cap". No per-day ledger
//! is kept, so the engine cannot tell which specific days aged out and
//! `expired` may overlap conceptually with `used`.
//!
//! Figures returned here are exact; flooring happens when the balance is
//! assembled.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::LeavePolicy;
use crate::models::{AuditStep, LeaveType};

use super::date_arithmetic::{months_between, year_end, year_start};

const MONTHS_PER_YEAR: u32 = 12;

/// Accrual figures for a carry-over leave type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarryOverAccrual {
    /// Calendar months from the join date to the evaluation date.
    pub months_worked: u32,
    /// Days earned per month of service.
    pub monthly_accrual: Decimal,
    /// Days earned before the cap is applied.
    pub raw_accrued: Decimal,
    /// Days earned after the cap is applied.
    pub accrued: Decimal,
    /// The cap on days held at once.
    pub max_accumulation: Decimal,
    /// Days earned beyond the cap once the cap period has passed.
    pub expired: Decimal,
    /// Days that will cross the cap within the warning window.
    pub expiring_soon: Decimal,
}

/// The result of a carry-over accrual calculation.
#[derive(Debug, Clone)]
pub struct CarryOverAccrualResult {
    /// The accrual figures.
    pub accrual: CarryOverAccrual,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// The result of an annual-reset accrual calculation.
#[derive(Debug, Clone)]
pub struct AnnualResetAccrualResult {
    /// Days granted for the evaluation year.
    pub accrued: Decimal,
    /// Whether the grant was pro-rated for a mid-year joiner.
    pub pro_rated: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates carry-over accrual for annual leave.
///
/// # Arguments
///
/// * `annual_entitlement` - Days of annual leave per year
/// * `join_date` - The employee's join date
/// * `as_of` - The evaluation date
/// * `policy` - The company's tenure rules
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_carry_over_accrual;
/// use leave_engine::config::LeavePolicy;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let result = calculate_carry_over_accrual(
///     Decimal::from(21),
///     NaiveDate::from_ymd_opt(2022, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
///     &LeavePolicy::default(),
///     1,
/// );
///
/// // 30 months × 1.75 = 52.5, capped at 42 with 10.5 expired
/// assert_eq!(result.accrual.accrued, Decimal::from(42));
/// assert_eq!(result.accrual.expired, Decimal::new(105, 1));
/// ```
pub fn calculate_carry_over_accrual(
    annual_entitlement: Decimal,
    join_date: NaiveDate,
    as_of: NaiveDate,
    policy: &LeavePolicy,
    step_number: u32,
) -> CarryOverAccrualResult {
    let months_worked = months_between(join_date, as_of);
    let monthly_accrual = annual_entitlement / Decimal::from(MONTHS_PER_YEAR);
    let raw_accrued = Decimal::from(months_worked) * monthly_accrual;
    let max_accumulation = annual_entitlement
        .checked_mul(Decimal::from(policy.carry_over_years))
        .unwrap_or(Decimal::MAX);
    let accrued = raw_accrued.min(max_accumulation);

    let cap_months = policy.cap_months();
    let window_start = policy.expiring_window_start();

    let expired = if months_worked > cap_months {
        (raw_accrued - max_accumulation).max(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    let expiring_soon = if months_worked >= window_start && months_worked < cap_months {
        Decimal::from(months_worked - window_start) * monthly_accrual
    } else {
        Decimal::ZERO
    };

    let accrual = CarryOverAccrual {
        months_worked,
        monthly_accrual,
        raw_accrued,
        accrued,
        max_accumulation,
        expired,
        expiring_soon,
    };

    let reasoning = if raw_accrued > max_accumulation {
        format!(
            "{} months × {} days = {} days (capped at {} days, {} days expired)",
            months_worked,
            monthly_accrual.normalize(),
            raw_accrued.normalize(),
            max_accumulation.normalize(),
            expired.normalize()
        )
    } else if expiring_soon > Decimal::ZERO {
        format!(
            "{} months × {} days = {} days ({} days approaching the {}-month cap)",
            months_worked,
            monthly_accrual.normalize(),
            raw_accrued.normalize(),
            expiring_soon.normalize(),
            cap_months
        )
    } else {
        format!(
            "{} months × {} days = {} days",
            months_worked,
            monthly_accrual.normalize(),
            raw_accrued.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "annual_leave_accrual".to_string(),
        rule_name: "Annual Leave Accrual".to_string(),
        policy_ref: "annual_leave_days_per_year".to_string(),
        input: serde_json::json!({
            "annual_entitlement": annual_entitlement.normalize().to_string(),
            "join_date": join_date.to_string(),
            "as_of": as_of.to_string(),
            "carry_over_years": policy.carry_over_years,
            "expiring_soon_months": policy.expiring_soon_months
        }),
        output: serde_json::json!({
            "months_worked": months_worked,
            "raw_accrued": raw_accrued.normalize().to_string(),
            "accrued": accrued.normalize().to_string(),
            "max_accumulation": max_accumulation.normalize().to_string(),
            "expired": expired.normalize().to_string(),
            "expiring_soon": expiring_soon.normalize().to_string()
        }),
        reasoning,
    };

    CarryOverAccrualResult {
        accrual,
        audit_step,
    }
}

/// Calculates the yearly grant for a leave type that resets annually.
///
/// Employees who joined after January 1 of the evaluation year receive one
/// month's share for every month from their join month through December,
/// capped at the full entitlement. Employees who have not started yet
/// receive nothing.
///
/// # Example
///
/// ```
/// use leave_engine::calculation::calculate_annual_reset_accrual;
/// use leave_engine::models::LeaveType;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let result = calculate_annual_reset_accrual(
///     &LeaveType::Sick,
///     Decimal::from(15),
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
///     1,
/// );
///
/// // July through December is 6 of 12 months
/// assert_eq!(result.accrued, Decimal::new(75, 1));
/// assert!(result.pro_rated);
/// ```
pub fn calculate_annual_reset_accrual(
    leave_type: &LeaveType,
    annual_entitlement: Decimal,
    join_date: NaiveDate,
    as_of: NaiveDate,
    step_number: u32,
) -> AnnualResetAccrualResult {
    let (accrued, pro_rated, reasoning) = if join_date > as_of {
        (
            Decimal::ZERO,
            false,
            format!(
                "Join date {} is after {}; no {} granted yet",
                join_date,
                as_of,
                leave_type.label()
            ),
        )
    } else if join_date > year_start(as_of) {
        let months_remaining = months_between(join_date, year_end(as_of)) + 1;
        let monthly = annual_entitlement / Decimal::from(MONTHS_PER_YEAR);
        let prorated = (monthly * Decimal::from(months_remaining)).min(annual_entitlement);
        (
            prorated,
            true,
            format!(
                "Joined {} during the year: {} months × {} days = {} days",
                join_date,
                months_remaining,
                monthly.normalize(),
                prorated.normalize()
            ),
        )
    } else {
        (
            annual_entitlement,
            false,
            format!(
                "Full {} days of {} granted on {}",
                annual_entitlement.normalize(),
                leave_type.label(),
                year_start(as_of)
            ),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: format!("{}_grant", leave_type.code().to_lowercase()),
        rule_name: format!("{} Annual Grant", leave_type.label()),
        policy_ref: entitlement_key(leave_type).to_string(),
        input: serde_json::json!({
            "annual_entitlement": annual_entitlement.normalize().to_string(),
            "join_date": join_date.to_string(),
            "as_of": as_of.to_string()
        }),
        output: serde_json::json!({
            "accrued": accrued.normalize().to_string(),
            "pro_rated": pro_rated
        }),
        reasoning,
    };

    AnnualResetAccrualResult {
        accrued,
        pro_rated,
        audit_step,
    }
}

/// The settings key that holds a leave type's entitlement.
fn entitlement_key(leave_type: &LeaveType) -> &'static str {
    match leave_type {
        LeaveType::Annual => "annual_leave_days_per_year",
        LeaveType::Sick => "sick_leave_days_per_year",
        LeaveType::Emergency => "emergency_leave_days_per_year",
        LeaveType::Other(_) => "unconfigured",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn carry_over(join: NaiveDate, as_of: NaiveDate) -> CarryOverAccrual {
        calculate_carry_over_accrual(dec("21"), join, as_of, &LeavePolicy::default(), 1).accrual
    }

    #[test]
    fn test_zero_tenure_accrues_nothing() {
        let accrual = carry_over(date(2025, 6, 15), date(2025, 6, 15));
        assert_eq!(accrual.months_worked, 0);
        assert_eq!(accrual.accrued, Decimal::ZERO);
    }

    #[test]
    fn test_twelve_months_accrues_full_entitlement() {
        let accrual = carry_over(date(2024, 6, 1), date(2025, 6, 1));
        assert_eq!(accrual.monthly_accrual, dec("1.75"));
        assert_eq!(accrual.accrued, dec("21"));
        assert_eq!(accrual.expired, Decimal::ZERO);
        assert_eq!(accrual.expiring_soon, Decimal::ZERO);
    }

    #[test]
    fn test_thirty_months_is_capped_and_expires_overflow() {
        let accrual = carry_over(date(2022, 12, 1), date(2025, 6, 1));
        assert_eq!(accrual.months_worked, 30);
        assert_eq!(accrual.raw_accrued, dec("52.5"));
        assert_eq!(accrual.max_accumulation, dec("42"));
        assert_eq!(accrual.accrued, dec("42"));
        assert_eq!(accrual.expired, dec("10.5"));
    }

    #[test]
    fn test_exactly_at_cap_has_nothing_expired() {
        let accrual = carry_over(date(2023, 6, 1), date(2025, 6, 1));
        assert_eq!(accrual.months_worked, 24);
        assert_eq!(accrual.accrued, dec("42"));
        assert_eq!(accrual.expired, Decimal::ZERO);
        assert_eq!(accrual.expiring_soon, Decimal::ZERO);
    }

    #[test]
    fn test_expiring_soon_window() {
        // 21 months opens the window with nothing yet flagged
        let accrual = carry_over(date(2023, 9, 1), date(2025, 6, 1));
        assert_eq!(accrual.months_worked, 21);
        assert_eq!(accrual.expiring_soon, Decimal::ZERO);

        // 23 months flags two months of accrual
        let accrual = carry_over(date(2023, 7, 1), date(2025, 6, 1));
        assert_eq!(accrual.months_worked, 23);
        assert_eq!(accrual.expiring_soon, dec("3.5"));

        // 20 months is before the window
        let accrual = carry_over(date(2023, 10, 1), date(2025, 6, 1));
        assert_eq!(accrual.expiring_soon, Decimal::ZERO);
    }

    #[test]
    fn test_custom_carry_over_years() {
        let policy = LeavePolicy {
            carry_over_years: 3,
            ..LeavePolicy::default()
        };
        let result =
            calculate_carry_over_accrual(dec("30"), date(2021, 6, 1), date(2025, 6, 1), &policy, 1);
        assert_eq!(result.accrual.months_worked, 48);
        assert_eq!(result.accrual.max_accumulation, dec("90"));
        assert_eq!(result.accrual.accrued, dec("90"));
        assert_eq!(result.accrual.expired, dec("30"));
    }

    #[test]
    fn test_unbounded_policy_does_not_overflow() {
        let policy = LeavePolicy {
            carry_over_years: u32::MAX,
            ..LeavePolicy::default()
        };
        let result =
            calculate_carry_over_accrual(dec("21"), date(2020, 6, 1), date(2025, 6, 1), &policy, 1);
        assert_eq!(
            result.accrual.max_accumulation,
            dec("21") * Decimal::from(u32::MAX)
        );
        assert_eq!(result.accrual.accrued, dec("105"));
        assert_eq!(result.accrual.expired, Decimal::ZERO);
        assert_eq!(result.accrual.expiring_soon, Decimal::ZERO);
    }

    #[test]
    fn test_carry_over_audit_step() {
        let result = calculate_carry_over_accrual(
            dec("21"),
            date(2022, 12, 1),
            date(2025, 6, 1),
            &LeavePolicy::default(),
            4,
        );
        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "annual_leave_accrual");
        assert_eq!(result.audit_step.output["expired"], "10.5");
        assert!(result.audit_step.reasoning.contains("capped at 42"));
    }

    #[test]
    fn test_reset_full_grant_for_prior_year_joiner() {
        let result =
            calculate_annual_reset_accrual(&LeaveType::Sick, dec("15"), date(2019, 3, 4), date(2025, 2, 1), 1);
        assert_eq!(result.accrued, dec("15"));
        assert!(!result.pro_rated);
    }

    #[test]
    fn test_reset_full_grant_for_january_first_joiner() {
        let result =
            calculate_annual_reset_accrual(&LeaveType::Sick, dec("15"), date(2025, 1, 1), date(2025, 2, 1), 1);
        assert_eq!(result.accrued, dec("15"));
        assert!(!result.pro_rated);
    }

    #[test]
    fn test_reset_pro_rated_for_mid_year_joiner() {
        let result = calculate_annual_reset_accrual(
            &LeaveType::Sick,
            dec("15"),
            date(2025, 7, 1),
            date(2025, 8, 1),
            1,
        );
        assert_eq!(result.accrued, dec("7.5"));
        assert!(result.pro_rated);
    }

    #[test]
    fn test_reset_january_joiner_after_first_gets_full_year() {
        // Joining on January 20 counts January through December, hitting the cap
        let result = calculate_annual_reset_accrual(
            &LeaveType::Emergency,
            dec("3"),
            date(2025, 1, 20),
            date(2025, 2, 1),
            1,
        );
        assert_eq!(result.accrued, dec("3"));
        assert!(result.pro_rated);
    }

    #[test]
    fn test_reset_future_joiner_gets_nothing() {
        let result = calculate_annual_reset_accrual(
            &LeaveType::Sick,
            dec("15"),
            date(2025, 9, 1),
            date(2025, 8, 1),
            1,
        );
        assert_eq!(result.accrued, Decimal::ZERO);
    }

    #[test]
    fn test_reset_audit_step_names_leave_type() {
        let result = calculate_annual_reset_accrual(
            &LeaveType::Emergency,
            dec("3"),
            date(2020, 1, 1),
            date(2025, 2, 1),
            9,
        );
        assert_eq!(result.audit_step.rule_id, "el_grant");
        assert_eq!(result.audit_step.policy_ref, "emergency_leave_days_per_year");
        assert_eq!(result.audit_step.output["accrued"], "3");
    }
}
