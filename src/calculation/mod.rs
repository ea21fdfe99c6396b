//! Calculation logic for the Leave Balance Engine.
//!
//! This module contains the calendar helpers, usage aggregation, accrual
//! (carry-over and annual-reset), the annual leave eligibility gate, and the
//! assembler that combines them into one employee's balance.

mod accrual;
mod balance;
mod date_arithmetic;
mod eligibility;
mod rounding;
mod usage;

pub use accrual::{
    AnnualResetAccrualResult, CarryOverAccrual, CarryOverAccrualResult,
    calculate_annual_reset_accrual, calculate_carry_over_accrual,
};
pub use balance::{
    BalanceAssembly, INELIGIBLE_ANNUAL_LEAVE_WARNING, UNKNOWN_LEAVE_TYPE_WARNING,
    assemble_balance,
};
pub use date_arithmetic::{days_between, months_between, year_end, year_start};
pub use eligibility::{
    EligibilityResult, check_annual_leave_eligibility, is_eligible_for_annual_leave,
};
pub use rounding::{DAY_PRECISION, floor_days};
pub use usage::{LeaveUsage, UsageResult, aggregate_usage, counted_days};
