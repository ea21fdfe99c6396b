//! HTTP API module for the Leave Balance Engine.
//!
//! Exposes company-wide and per-employee balance lookups over the seeded
//! data, and a stateless calculation endpoint that takes its data in the
//! request body.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BalanceQuery, CalculationRequest, EmployeeRequest, LeaveRequestBody, SettingsRequest,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
