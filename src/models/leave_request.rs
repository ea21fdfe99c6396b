//! Leave request model and the leave type taxonomy.
//!
//! Leave types arrive from upstream as free-form labels such as
//! `"Annual Leave"`. They are parsed into the closed [`LeaveType`] enum, with
//! [`LeaveType::Other`] holding any label the engine does not recognise.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaveStatus {
    /// Submitted and awaiting a decision.
    Pending,
    /// Approved by an approver; counts as used leave.
    Approved,
    /// Rejected; never counts toward usage.
    Rejected,
}

/// How a leave type's entitlement behaves across calendar years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveCategory {
    /// Earned monthly and carried across years, subject to an expiry cap.
    CarryOver,
    /// Granted fresh (in full or pro-rated) every calendar year.
    AnnualReset,
}

impl LeaveCategory {
    /// Returns true if usage is counted per calendar year.
    pub fn resets_annually(self) -> bool {
        matches!(self, LeaveCategory::AnnualReset)
    }
}

/// A type of leave.
///
/// # Example
///
/// ```
/// use leave_engine::models::{LeaveCategory, LeaveType};
///
/// let leave_type = LeaveType::parse("Sick Leave");
/// assert_eq!(leave_type, LeaveType::Sick);
/// assert_eq!(leave_type.code(), "SL");
/// assert_eq!(leave_type.category(), LeaveCategory::AnnualReset);
///
/// let unknown = LeaveType::parse("Hajj Leave");
/// assert_eq!(unknown.code(), "HA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LeaveType {
    /// Annual (vacation) leave.
    Annual,
    /// Sick leave.
    Sick,
    /// Emergency leave.
    Emergency,
    /// Any label the engine does not recognise.
    Other(String),
}

impl LeaveType {
    /// Parses an upstream leave type label. Never fails.
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "annual leave" | "annual" => LeaveType::Annual,
            "sick leave" | "sick" => LeaveType::Sick,
            "emergency leave" | "emergency" => LeaveType::Emergency,
            _ => LeaveType::Other(label.trim().to_string()),
        }
    }

    /// Returns the canonical display label.
    pub fn label(&self) -> &str {
        match self {
            LeaveType::Annual => "Annual Leave",
            LeaveType::Sick => "Sick Leave",
            LeaveType::Emergency => "Emergency Leave",
            LeaveType::Other(label) => label,
        }
    }

    /// Returns the two-letter code used in reports.
    ///
    /// Unrecognised types use the first two alphanumeric characters of
    /// their label, upper-cased.
    pub fn code(&self) -> String {
        match self {
            LeaveType::Annual => "AL".to_string(),
            LeaveType::Sick => "SL".to_string(),
            LeaveType::Emergency => "EL".to_string(),
            LeaveType::Other(label) => {
                let code: String = label
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .take(2)
                    .collect::<String>()
                    .to_uppercase();
                if code.is_empty() {
                    "XX".to_string()
                } else {
                    code
                }
            }
        }
    }

    /// Returns how this leave type accrues.
    pub fn category(&self) -> LeaveCategory {
        match self {
            LeaveType::Annual => LeaveCategory::CarryOver,
            LeaveType::Sick | LeaveType::Emergency | LeaveType::Other(_) => {
                LeaveCategory::AnnualReset
            }
        }
    }

    /// Returns true if the label was recognised.
    pub fn is_known(&self) -> bool {
        !matches!(self, LeaveType::Other(_))
    }
}

impl From<String> for LeaveType {
    fn from(label: String) -> Self {
        LeaveType::parse(&label)
    }
}

impl From<LeaveType> for String {
    fn from(leave_type: LeaveType) -> Self {
        leave_type.label().to_string()
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A request for leave submitted by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier for the request.
    pub id: String,
    /// The employee who submitted the request.
    pub employee_id: String,
    /// The type of leave requested.
    pub leave_type: LeaveType,
    /// The first day of leave (inclusive).
    pub start_date: NaiveDate,
    /// The last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// The approval state.
    pub status: LeaveStatus,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Returns true if the date range is well-formed (`end_date >= start_date`).
    pub fn has_valid_range(&self) -> bool {
        self.end_date >= self.start_date
    }

    /// Checks the request's invariants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidLeaveRequest`] if the end date precedes
    /// the start date.
    pub fn validate(&self) -> EngineResult<()> {
        if !self.has_valid_range() {
            return Err(EngineError::InvalidLeaveRequest {
                request_id: self.id.clone(),
                message: format!(
                    "end_date {} is before start_date {}",
                    self.end_date, self.start_date
                ),
            });
        }
        Ok(())
    }
}
