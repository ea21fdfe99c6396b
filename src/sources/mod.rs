//! Data source contracts for the Leave Balance Engine.
//!
//! The engine never owns employee, leave request or settings data. It reads
//! them through these traits, which adapters over the HR data store
//! implement. [`InMemorySource`] is the adapter used by the server binary and
//! tests.

mod memory;

pub use memory::{InMemorySource, SeedData};

use crate::config::CompanySettings;
use crate::error::EngineResult;
use crate::models::{Employee, LeaveRequest};

/// Provides the employees of a company.
pub trait EmployeeSource: Send + Sync {
    /// Returns every employee of the company.
    fn get_employees(&self, company_id: &str) -> EngineResult<Vec<Employee>>;
}

/// Provides per-company leave settings.
pub trait SettingsSource: Send + Sync {
    /// Returns the company's settings, or `None` if it has none.
    fn get_company_settings(&self, company_id: &str) -> EngineResult<Option<CompanySettings>>;
}

/// Provides leave requests.
pub trait LeaveRequestSource: Send + Sync {
    /// Returns every leave request in the system, across all companies.
    fn get_leave_requests(&self) -> EngineResult<Vec<LeaveRequest>>;
}
