//! Core data models for the Leave Balance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod balance_report;
mod employee;
mod leave_balance;
mod leave_request;

pub use balance_report::{AuditStep, AuditTrace, AuditWarning, BalanceReport};
pub use employee::Employee;
pub use leave_balance::{AnnualLeaveBalance, LeaveBalance, LeaveTypeBalance};
pub use leave_request::{LeaveCategory, LeaveRequest, LeaveStatus, LeaveType};
