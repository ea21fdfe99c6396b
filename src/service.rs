//! Leave balance service.
//!
//! Reads employees, settings and leave requests through the source traits
//! and assembles one balance per employee. Nothing is cached: every call
//! recomputes from the sources.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::assemble_balance;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, BalanceReport, LeaveBalance, LeaveRequest};
use crate::sources::{EmployeeSource, LeaveRequestSource, SettingsSource};

/// Computes leave balances from the configured data sources.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use leave_engine::error::EngineError;
/// use leave_engine::service::LeaveBalanceService;
/// use leave_engine::sources::InMemorySource;
/// use chrono::NaiveDate;
///
/// let source = Arc::new(InMemorySource::default());
/// let service = LeaveBalanceService::new(source.clone(), source.clone(), source);
///
/// let as_of = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let result = service.get_leave_balances("acme", as_of);
/// assert!(matches!(result, Err(EngineError::SettingsNotFound { .. })));
/// ```
#[derive(Clone)]
pub struct LeaveBalanceService {
    employees: Arc<dyn EmployeeSource>,
    settings: Arc<dyn SettingsSource>,
    requests: Arc<dyn LeaveRequestSource>,
}

impl LeaveBalanceService {
    /// Creates a service over the given sources.
    pub fn new(
        employees: Arc<dyn EmployeeSource>,
        settings: Arc<dyn SettingsSource>,
        requests: Arc<dyn LeaveRequestSource>,
    ) -> Self {
        Self {
            employees,
            settings,
            requests,
        }
    }

    /// Computes the balances of every employee of a company.
    ///
    /// # Errors
    ///
    /// Returns `SettingsNotFound` if the company has no settings and
    /// `InvalidSettings` if they are out of range. Errors from the sources are
    /// returned unchanged.
    pub fn get_leave_balances(
        &self,
        company_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<LeaveBalance>> {
        Ok(self.company_report(company_id, as_of)?.balances)
    }

    /// Computes the balance of one employee.
    ///
    /// Returns `Ok(None)` if the company has no such employee. An employee
    /// without any leave requests gets a zero-usage balance, not `None`.
    pub fn get_employee_leave_balance(
        &self,
        employee_id: &str,
        company_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Option<LeaveBalance>> {
        let balance = self
            .get_leave_balances(company_id, as_of)?
            .into_iter()
            .find(|b| b.employee_id == employee_id);

        if balance.is_none() {
            debug!(company_id, employee_id, "Employee not found");
        }
        Ok(balance)
    }

    /// Computes the balances of a company together with the audit trace.
    pub fn company_report(&self, company_id: &str, as_of: NaiveDate) -> EngineResult<BalanceReport> {
        let start_time = Instant::now();

        let settings = self
            .settings
            .get_company_settings(company_id)?
            .ok_or_else(|| {
                warn!(company_id, "No leave settings configured for company");
                EngineError::SettingsNotFound {
                    company_id: company_id.to_string(),
                }
            })?;
        settings.validate().inspect_err(|e| {
            warn!(company_id, error = %e, "Company leave settings out of range");
        })?;
        let employees = self.employees.get_employees(company_id)?;
        let requests = self.requests.get_leave_requests()?;

        let mut requests_by_employee: HashMap<String, Vec<LeaveRequest>> = HashMap::new();
        for request in requests {
            requests_by_employee
                .entry(request.employee_id.clone())
                .or_default()
                .push(request);
        }

        let mut balances = Vec::with_capacity(employees.len());
        let mut steps = Vec::new();
        let mut warnings = Vec::new();
        let mut step_number: u32 = 1;

        for employee in &employees {
            let employee_requests = requests_by_employee
                .get(&employee.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);

            let assembly =
                assemble_balance(employee, employee_requests, &settings, as_of, step_number);
            step_number += assembly.audit_steps.len() as u32;

            balances.push(assembly.balance);
            steps.extend(assembly.audit_steps);
            warnings.extend(assembly.warnings);
        }

        let duration_us = start_time.elapsed().as_micros() as u64;
        info!(
            company_id,
            as_of = %as_of,
            employee_count = balances.len(),
            warning_count = warnings.len(),
            duration_us,
            "Leave balances computed"
        );

        Ok(BalanceReport {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            company_id: company_id.to_string(),
            as_of,
            balances,
            audit_trace: AuditTrace {
                steps,
                warnings,
                duration_us,
            },
        })
    }
}
