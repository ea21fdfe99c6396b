//! In-memory data source seeded from JSON.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::CompanySettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeaveRequest};

use super::{EmployeeSource, LeaveRequestSource, SettingsSource};

/// The JSON seed file layout.
///
/// Seeds carry HR records only. Company settings come from the YAML
/// configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// Employees of every company.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Leave requests of every employee.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequest>,
}

/// Read-only data held in memory.
///
/// # Example
///
/// ```
/// use leave_engine::sources::{EmployeeSource, InMemorySource};
///
/// let source = InMemorySource::default();
/// assert!(source.get_employees("acme").unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    employees: Vec<Employee>,
    leave_requests: Vec<LeaveRequest>,
    settings: Vec<CompanySettings>,
}

impl InMemorySource {
    /// Creates a source over the given data.
    pub fn new(
        employees: Vec<Employee>,
        leave_requests: Vec<LeaveRequest>,
        settings: Vec<CompanySettings>,
    ) -> Self {
        Self {
            employees,
            leave_requests,
            settings,
        }
    }

    /// Loads a JSON seed file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not a valid seed document.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let seed: SeedData =
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Ok(seed.into())
    }

    /// Returns the number of employees held.
    pub fn employee_count(&self) -> usize {
        self.employees.len()
    }

    /// Returns the number of leave requests held.
    pub fn leave_request_count(&self) -> usize {
        self.leave_requests.len()
    }
}

impl From<SeedData> for InMemorySource {
    fn from(seed: SeedData) -> Self {
        Self::new(seed.employees, seed.leave_requests, Vec::new())
    }
}

impl EmployeeSource for InMemorySource {
    fn get_employees(&self, company_id: &str) -> EngineResult<Vec<Employee>> {
        Ok(self
            .employees
            .iter()
            .filter(|e| e.company_id == company_id)
            .cloned()
            .collect())
    }
}

impl LeaveRequestSource for InMemorySource {
    fn get_leave_requests(&self) -> EngineResult<Vec<LeaveRequest>> {
        Ok(self.leave_requests.clone())
    }
}

impl SettingsSource for InMemorySource {
    fn get_company_settings(&self, company_id: &str) -> EngineResult<Option<CompanySettings>> {
        Ok(self
            .settings
            .iter()
            .find(|s| s.company_id == company_id)
            .cloned())
    }
}
