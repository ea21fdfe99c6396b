//! Employee model.
//!
//! Employees are owned by the HR records system; the engine only reads the
//! fields it needs to compute leave balances.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an employee whose leave balances are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The company the employee belongs to.
    pub company_id: String,
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

impl Employee {
    /// Returns the display name of the employee.
    ///
    /// # Examples
    ///
    /// ```
    /// use leave_engine::models::Employee;
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     company_id: "acme".to_string(),
    ///     first_name: "Fatima".to_string(),
    ///     last_name: "Al-Sabah".to_string(),
    ///     department: "Finance".to_string(),
    ///     join_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
    /// };
    /// assert_eq!(employee.full_name(), "Fatima Al-Sabah");
    /// ```
    pub fn full_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{} {}", first, last),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => self.id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            company_id: "acme".to_string(),
            first_name: "Ahmad".to_string(),
            last_name: "Hassan".to_string(),
            department: "Operations".to_string(),
            join_date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
        }
    }

    #[test]
    fn test_deserialize_employee() {
        let json = r#"{
            "id": "emp_001",
            "company_id": "acme",
            "first_name": "Ahmad",
            "last_name": "Hassan",
            "department": "Operations",
            "join_date": "2023-06-01"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee, create_test_employee());
    }

    #[test]
    fn test_deserialize_employee_without_optional_fields() {
        let json = r#"{
            "id": "emp_002",
            "company_id": "acme",
            "first_name": "Noura",
            "join_date": "2024-01-15"
        }"#;

        let employee: Employee = serde_json::from_str(json).unwrap();
        assert!(employee.last_name.is_empty());
        assert!(employee.department.is_empty());
        assert_eq!(employee.full_name(), "Noura");
    }

    #[test]
    fn test_full_name_joins_first_and_last() {
        assert_eq!(create_test_employee().full_name(), "Ahmad Hassan");
    }

    #[test]
    fn test_full_name_falls_back_to_id() {
        let mut employee = create_test_employee();
        employee.first_name = "  ".to_string();
        employee.last_name = String::new();
        assert_eq!(employee.full_name(), "emp_001");
    }
}
