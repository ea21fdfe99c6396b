//! Request types for the Leave Balance Engine API.
//!
//! This module defines the query parameters of the balance lookups and the
//! JSON body of the `/leave-balances/calculate` endpoint.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{CompanySettings, DEFAULT_EMERGENCY_LEAVE_DAYS, LeavePolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, LeaveRequest, LeaveStatus, LeaveType};
use crate::sources::InMemorySource;

/// Query parameters accepted by the balance lookup endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceQuery {
    /// The evaluation date. Defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Request body for the `/leave-balances/calculate` endpoint.
///
/// Carries all data needed to compute balances without touching the
/// server's seeded data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The company the employees belong to.
    pub company_id: String,
    /// The evaluation date. Defaults to today (UTC).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// Leave settings. Defaults to the server's configuration for `company_id`.
    #[serde(default)]
    pub settings: Option<SettingsRequest>,
    /// The employees to compute balances for.
    pub employees: Vec<EmployeeRequest>,
    /// The employees' leave requests.
    #[serde(default)]
    pub leave_requests: Vec<LeaveRequestBody>,
}

/// Leave settings in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsRequest {
    /// Annual leave entitlement in days per year.
    pub annual_leave_days_per_year: Decimal,
    /// Sick leave entitlement in days per year.
    pub sick_leave_days_per_year: Decimal,
    /// Emergency leave entitlement in days per year.
    #[serde(default = "default_emergency_leave_days")]
    pub emergency_leave_days_per_year: Decimal,
    /// Tenure rules.
    #[serde(default)]
    pub policy: LeavePolicy,
}

fn default_emergency_leave_days() -> Decimal {
    Decimal::from(DEFAULT_EMERGENCY_LEAVE_DAYS)
}

/// Employee information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's first name.
    pub first_name: String,
    /// The employee's last name.
    #[serde(default)]
    pub last_name: String,
    /// The department the employee works in.
    #[serde(default)]
    pub department: String,
    /// The date the employee joined the company.
    pub join_date: NaiveDate,
}

/// Leave request information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequestBody {
    /// Unique identifier for the request.
    pub id: String,
    /// The employee who submitted the request.
    pub employee_id: String,
    /// The leave type label (e.g., "Annual Leave").
    pub leave_type: String,
    /// The first day of leave (inclusive).
    pub start_date: NaiveDate,
    /// The last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The approval state.
    pub status: LeaveStatus,
    /// When the request was submitted. Defaults to now.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SettingsRequest {
    /// Converts the request settings into the validated settings of `company_id`.
    pub fn into_settings(self, company_id: &str) -> EngineResult<CompanySettings> {
        let settings = CompanySettings {
            company_id: company_id.to_string(),
            name: String::new(),
            annual_leave_days_per_year: self.annual_leave_days_per_year,
            sick_leave_days_per_year: self.sick_leave_days_per_year,
            emergency_leave_days_per_year: self.emergency_leave_days_per_year,
            policy: self.policy,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl EmployeeRequest {
    /// Converts the request employee into an employee of `company_id`.
    pub fn into_employee(self, company_id: &str) -> Employee {
        Employee {
            id: self.id,
            company_id: company_id.to_string(),
            first_name: self.first_name,
            last_name: self.last_name,
            department: self.department,
            join_date: self.join_date,
        }
    }
}

impl TryFrom<LeaveRequestBody> for LeaveRequest {
    type Error = EngineError;

    fn try_from(body: LeaveRequestBody) -> EngineResult<Self> {
        let request = LeaveRequest {
            id: body.id,
            employee_id: body.employee_id,
            leave_type: LeaveType::parse(&body.leave_type),
            start_date: body.start_date,
            end_date: body.end_date,
            status: body.status,
            created_at: body.created_at.unwrap_or_else(Utc::now),
        };
        request.validate()?;
        Ok(request)
    }
}

impl CalculationRequest {
    /// Returns the evaluation date, defaulting to today.
    pub fn as_of(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Builds an in-memory source from the request.
    ///
    /// Inline settings, if present, are exposed through the source's
    /// [`SettingsSource`](crate::sources::SettingsSource) implementation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLeaveRequest` for the first request whose end date
    /// precedes its start date.
    pub fn into_source(self) -> EngineResult<InMemorySource> {
        let company_id = self.company_id;
        let employees = self
            .employees
            .into_iter()
            .map(|e| e.into_employee(&company_id))
            .collect();
        let leave_requests = self
            .leave_requests
            .into_iter()
            .map(LeaveRequest::try_from)
            .collect::<EngineResult<Vec<_>>>()?;
        let settings = self
            .settings
            .map(|s| s.into_settings(&company_id))
            .transpose()?
            .into_iter()
            .collect();

        Ok(InMemorySource::new(employees, leave_requests, settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{EmployeeSource, LeaveRequestSource, SettingsSource};

    fn request_json() -> serde_json::Value {
        serde_json::json!({
            "company_id": "acme",
            "as_of": "2025-06-01",
            "settings": {
                "annual_leave_days_per_year": 21,
                "sick_leave_days_per_year": 15
            },
            "employees": [
                {
                    "id": "emp_001",
                    "first_name": "Ahmad",
                    "join_date": "2024-06-01"
                }
            ],
            "leave_requests": [
                {
                    "id": "lr_001",
                    "employee_id": "emp_001",
                    "leave_type": "Sick Leave",
                    "start_date": "2025-01-10",
                    "end_date": "2025-01-12",
                    "status": "Approved"
                }
            ]
        })
    }

    #[test]
    fn test_deserialize_calculation_request() {
        let request: CalculationRequest = serde_json::from_value(request_json()).unwrap();
        assert_eq!(request.company_id, "acme");
        assert_eq!(request.as_of(), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(request.employees.len(), 1);
        let settings = request.settings.unwrap();
        assert_eq!(settings.emergency_leave_days_per_year, Decimal::from(3));
        assert_eq!(settings.policy, LeavePolicy::default());
    }

    #[test]
    fn test_into_source() {
        let request: CalculationRequest = serde_json::from_value(request_json()).unwrap();
        let source = request.into_source().unwrap();

        let employees = source.get_employees("acme").unwrap();
        assert_eq!(employees[0].company_id, "acme");
        let requests = source.get_leave_requests().unwrap();
        assert_eq!(requests[0].leave_type, LeaveType::Sick);
        assert!(source.get_company_settings("acme").unwrap().is_some());
    }

    #[test]
    fn test_into_source_without_settings() {
        let mut json = request_json();
        json.as_object_mut().unwrap().remove("settings");
        let request: CalculationRequest = serde_json::from_value(json).unwrap();
        let source = request.into_source().unwrap();
        assert!(source.get_company_settings("acme").unwrap().is_none());
    }

    #[test]
    fn test_out_of_range_settings_are_rejected() {
        let mut json = request_json();
        json["settings"]["sick_leave_days_per_year"] = serde_json::json!(-3);
        let request: CalculationRequest = serde_json::from_value(json).unwrap();

        match request.into_source() {
            Err(EngineError::InvalidSettings { company_id, message }) => {
                assert_eq!(company_id, "acme");
                assert!(message.contains("sick_leave_days_per_year"));
            }
            other => panic!("Expected InvalidSettings, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_leave_request_is_rejected() {
        let mut json = request_json();
        json["leave_requests"][0]["end_date"] = serde_json::json!("2025-01-01");
        let request: CalculationRequest = serde_json::from_value(json).unwrap();

        match request.into_source() {
            Err(EngineError::InvalidLeaveRequest { request_id, .. }) => {
                assert_eq!(request_id, "lr_001")
            }
            other => panic!("Expected InvalidLeaveRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_created_at_defaults_to_now() {
        let body = LeaveRequestBody {
            id: "lr_001".to_string(),
            employee_id: "emp_001".to_string(),
            leave_type: "Annual Leave".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
            status: LeaveStatus::Pending,
            created_at: None,
        };
        let before = Utc::now();
        let request = LeaveRequest::try_from(body).unwrap();
        assert!(request.created_at >= before);
    }
}
