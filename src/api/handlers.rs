//! HTTP request handlers for the Leave Balance Engine API.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::service::LeaveBalanceService;
use crate::sources::SettingsSource;

use super::request::{BalanceQuery, CalculationRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/companies/:company_id/leave-balances",
            get(company_balances_handler),
        )
        .route(
            "/companies/:company_id/employees/:employee_id/leave-balance",
            get(employee_balance_handler),
        )
        .route("/leave-balances/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for GET /companies/:company_id/leave-balances.
///
/// Returns a balance report covering every employee of the company.
async fn company_balances_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
    query: Result<Query<BalanceQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id = %company_id,
        "Processing company balance request"
    );

    let as_of = match resolve_as_of(query, correlation_id) {
        Ok(as_of) => as_of,
        Err(response) => return response,
    };

    match state.service().company_report(&company_id, as_of) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                company_id = %company_id,
                employee_count = report.balances.len(),
                "Company balances computed"
            );
            json_ok(report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Company balance request failed"
            );
            json_error(err.into(), correlation_id)
        }
    }
}

/// Handler for GET /companies/:company_id/employees/:employee_id/leave-balance.
///
/// Returns one employee's balance, or 404 if the company has no such
/// employee.
async fn employee_balance_handler(
    State(state): State<AppState>,
    Path((company_id, employee_id)): Path<(String, String)>,
    query: Result<Query<BalanceQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        company_id = %company_id,
        employee_id = %employee_id,
        "Processing employee balance request"
    );

    let as_of = match resolve_as_of(query, correlation_id) {
        Ok(as_of) => as_of,
        Err(response) => return response,
    };

    match state
        .service()
        .get_employee_leave_balance(&employee_id, &company_id, as_of)
    {
        Ok(Some(balance)) => json_ok(balance),
        Ok(None) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                "Employee not found"
            );
            json_error(
                ApiErrorResponse::new(
                    StatusCode::NOT_FOUND,
                    ApiError::employee_not_found(&employee_id, &company_id),
                ),
                correlation_id,
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Employee balance request failed"
            );
            json_error(err.into(), correlation_id)
        }
    }
}

/// Handler for POST /leave-balances/calculate.
///
/// Computes balances for the employees and leave requests in the body.
/// Settings come from the body when present, otherwise from the loaded
/// configuration.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_error(
                ApiErrorResponse::new(StatusCode::BAD_REQUEST, error),
                correlation_id,
            );
        }
    };

    let as_of = request.as_of();
    let company_id = request.company_id.clone();
    let inline_settings = request.settings.is_some();

    let source = match request.into_source() {
        Ok(source) => Arc::new(source),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Invalid calculation request body"
            );
            return json_error(err.into(), correlation_id);
        }
    };

    let settings: Arc<dyn SettingsSource> = if inline_settings {
        source.clone()
    } else {
        state.config_handle()
    };
    let service = LeaveBalanceService::new(source.clone(), settings, source);

    match service.company_report(&company_id, as_of) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                company_id = %company_id,
                employee_count = report.balances.len(),
                inline_settings,
                "Calculation completed successfully"
            );
            json_ok(report)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            json_error(err.into(), correlation_id)
        }
    }
}

/// Reads `as_of` from the query string, defaulting to today.
fn resolve_as_of(
    query: Result<Query<BalanceQuery>, QueryRejection>,
    correlation_id: Uuid,
) -> Result<NaiveDate, Response> {
    match query {
        Ok(Query(query)) => Ok(query.as_of.unwrap_or_else(|| Utc::now().date_naive())),
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid query string"
            );
            Err(json_error(
                ApiErrorResponse::new(
                    StatusCode::BAD_REQUEST,
                    ApiError::validation_error(format!(
                        "Invalid query string: {}",
                        rejection.body_text()
                    )),
                ),
                correlation_id,
            ))
        }
    }
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn json_error(api_error: ApiErrorResponse, correlation_id: Uuid) -> Response {
    api_error.for_request(correlation_id).into_response()
}
