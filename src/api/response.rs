//! Error responses for the Leave Balance Engine API.
//!
//! Every failure is returned as a JSON [`ApiError`] body. Engine errors are
//! mapped to a status code and a stable error code by
//! `From<EngineError> for ApiErrorResponse`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;

/// JSON body of an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable error code, e.g. `SETTINGS_NOT_FOUND`.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Extra context for the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Correlation id of the request, matching the server logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,
}

impl ApiError {
    /// Creates an error with a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            correlation_id: None,
        }
    }

    /// Attaches details to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// A request that deserialized but failed validation.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// A request body that is not valid JSON.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// An employee the company does not have.
    pub fn employee_not_found(employee_id: &str, company_id: &str) -> Self {
        Self::new(
            "EMPLOYEE_NOT_FOUND",
            format!("Employee not found: {}", employee_id),
        )
        .with_details(format!("Company '{}' has no such employee", company_id))
    }
}

/// An [`ApiError`] paired with its HTTP status.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Stamps the request's correlation id onto the body.
    pub fn for_request(mut self, correlation_id: Uuid) -> Self {
        self.error.correlation_id = Some(correlation_id);
        self
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

/// Status and error code for each engine error.
fn classify(error: &EngineError) -> (StatusCode, &'static str) {
    match error {
        EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
        }
        EngineError::SettingsNotFound { .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, "SETTINGS_NOT_FOUND")
        }
        EngineError::InvalidLeaveRequest { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_LEAVE_REQUEST")
        }
        EngineError::DataSource { .. } => (StatusCode::BAD_GATEWAY, "DATA_SOURCE_ERROR"),
        EngineError::InvalidSettings { .. } => (StatusCode::BAD_REQUEST, "INVALID_SETTINGS"),
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = classify(&error);
        let api_error = ApiError::new(code, error.to_string());

        let api_error = match &error {
            EngineError::SettingsNotFound { .. } => api_error.with_details(
                "Leave balances cannot be computed until the company's leave settings are configured",
            ),
            EngineError::InvalidLeaveRequest { request_id, .. } => {
                api_error.with_details(format!("Request '{}' ends before it starts", request_id))
            }
            _ => api_error,
        };

        ApiErrorResponse::new(status, api_error)
    }
}
