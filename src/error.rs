//! Error types for the Leave Balance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing leave balances.

use thiserror::Error;

/// The main error type for the Leave Balance Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use leave_engine::error::EngineError;
///
/// let error = EngineError::SettingsNotFound {
///     company_id: "acme".to_string(),
/// };
/// assert_eq!(error.to_string(), "Company settings not found: acme");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No leave settings exist for the company. Balances cannot be computed
    /// without them and no defaults are substituted.
    #[error("Company settings not found: {company_id}")]
    SettingsNotFound {
        /// The company whose settings are missing.
        company_id: String,
    },

    /// A leave request was invalid or contained inconsistent data.
    #[error("Invalid leave request '{request_id}': {message}")]
    InvalidLeaveRequest {
        /// The ID of the invalid request.
        request_id: String,
        /// A description of what made the request invalid.
        message: String,
    },

    /// An upstream data source failed to return employees, requests or settings.
    #[error("Data source error: {message}")]
    DataSource {
        /// A description of the upstream failure.
        message: String,
    },

    /// Company leave settings hold values the engine cannot compute with.
    #[error("Invalid leave settings for '{company_id}': {message}")]
    InvalidSettings {
        /// The company whose settings are invalid.
        company_id: String,
        /// Which value is out of range.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/companies/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/companies/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_settings_not_found_displays_company() {
        let error = EngineError::SettingsNotFound {
            company_id: "globex".to_string(),
        };
        assert_eq!(error.to_string(), "Company settings not found: globex");
    }

    #[test]
    fn test_invalid_leave_request_displays_id_and_message() {
        let error = EngineError::InvalidLeaveRequest {
            request_id: "lr_001".to_string(),
            message: "end_date is before start_date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid leave request 'lr_001': end_date is before start_date"
        );
    }

    #[test]
    fn test_data_source_displays_message() {
        let error = EngineError::DataSource {
            message: "connection refused".to_string(),
        };
        assert_eq!(error.to_string(), "Data source error: connection refused");
    }

    #[test]
    fn test_invalid_settings_displays_company_and_message() {
        let error = EngineError::InvalidSettings {
            company_id: "acme".to_string(),
            message: "annual_leave_days_per_year must be between 0 and 366".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid leave settings for 'acme': annual_leave_days_per_year must be between 0 and 366"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_settings() -> EngineResult<()> {
            Err(EngineError::SettingsNotFound {
                company_id: "acme".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_settings()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::SettingsNotFound { .. })
        ));
    }
}
