//! HTTP request handlers for the statutory payroll API.
//!
//! This module contains the handler functions for all API endpoints. The
//! handlers only translate between HTTP and the library; every figure comes
//! from the calculation, compliance and payslip modules.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_employee_breakdown, explain_breakdown};
use crate::compliance::{
    aggregate_bonus, aggregate_esi, aggregate_mlwf, aggregate_pf, aggregate_pt,
};
use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{ComplianceReport, ComplianceScheme};
use crate::payslip::format_payslip;

use super::request::{BreakdownRequest, ComplianceRequest, PayslipRequest, directory_from};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Header carrying the per-request correlation id.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/rates", get(get_rates_handler).put(put_rates_handler))
        .route("/breakdown", post(breakdown_handler))
        .route("/payslip", post(payslip_handler))
        .route("/compliance/:scheme", post(compliance_handler))
        .with_state(state)
}

/// Handler for GET /rates.
async fn get_rates_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Serving rate table");
    json_response(correlation_id, StatusCode::OK, &state.rates())
}

/// Handler for PUT /rates.
///
/// Replaces the shared rate table after validating it. Fields left out of
/// the body take their statutory defaults.
async fn put_rates_handler(
    State(state): State<AppState>,
    payload: Result<Json<RateTable>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing rate table update");

    let rates = match payload {
        Ok(Json(rates)) => rates,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.replace_rates(rates) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, "Rate table replaced");
            json_response(correlation_id, StatusCode::OK, &state.rates())
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /breakdown.
///
/// Returns the exact breakdown, its rounded display copy, and the audit
/// trace of rules applied.
async fn breakdown_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakdownRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing breakdown request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let rates = request.rates.unwrap_or_else(|| state.rates());

    let start_time = Instant::now();
    match explain_breakdown(request.monthly_ctc, &rates, request.month) {
        Ok(explanation) => {
            info!(
                correlation_id = %correlation_id,
                month = %request.month,
                gross = %explanation.breakdown.gross,
                net = %explanation.display.net,
                duration_us = start_time.elapsed().as_micros(),
                "Breakdown computed"
            );
            json_response(correlation_id, StatusCode::OK, &explanation)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /payslip.
async fn payslip_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayslipRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payslip request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let rates = state.rates();
    let directory = directory_from(&request.units, &request.departments);
    let employee = &request.employee;

    match compute_employee_breakdown(&employee.compensation(), &rates, request.month) {
        Ok(breakdown) => {
            let identity = employee.identity(directory.as_ref());
            let payslip = format_payslip(&identity, &breakdown, &request.month.label());
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.employee_id,
                net_pay = %payslip.net_pay,
                "Payslip formatted"
            );
            json_response(correlation_id, StatusCode::OK, &payslip)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /compliance/:scheme.
async fn compliance_handler(
    State(state): State<AppState>,
    Path(scheme): Path<String>,
    payload: Result<Json<ComplianceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, scheme = %scheme, "Processing compliance request");

    let Ok(scheme) = scheme.parse::<ComplianceScheme>() else {
        warn!(correlation_id = %correlation_id, scheme = %scheme, "Unknown compliance scheme");
        return error_response(
            correlation_id,
            ApiErrorResponse::new(StatusCode::NOT_FOUND, ApiError::unknown_scheme(&scheme)),
        );
    };

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let start_time = Instant::now();
    match run_compliance(scheme, &request, &state.rates()) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                scheme = %scheme,
                employees = request.roster.len(),
                rows = report.totals.employees,
                skipped = report.skipped.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Compliance report generated"
            );
            json_response(correlation_id, StatusCode::OK, &report)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Dispatches a compliance request to its scheme's aggregator.
fn run_compliance(
    scheme: ComplianceScheme,
    request: &ComplianceRequest,
    rates: &RateTable,
) -> EngineResult<ComplianceReport> {
    let directory = request.directory();
    let directory = directory.as_ref();
    let roster = &request.roster;

    match scheme {
        ComplianceScheme::Pf => aggregate_pf(roster, rates, request.pay_month()?, directory),
        ComplianceScheme::Esi => aggregate_esi(roster, rates, request.pay_month()?, directory),
        ComplianceScheme::Pt => aggregate_pt(roster, rates, request.pay_month()?, directory),
        ComplianceScheme::Mlwf => {
            aggregate_mlwf(roster, rates, &request.reporting_period()?, directory)
        }
        ComplianceScheme::Bonus => aggregate_bonus(roster, rates, directory),
    }
}

/// Maps a body extraction failure to a 400 response.
///
/// Syntax errors are `MALFORMED_JSON`; well-formed JSON that does not fit the
/// request shape (missing fields, a bad month) is `VALIDATION_ERROR`.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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

    error_response(
        correlation_id,
        ApiErrorResponse::new(StatusCode::BAD_REQUEST, error),
    )
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request rejected"
    );
    error_response(correlation_id, err.into())
}

fn error_response(correlation_id: Uuid, error: ApiErrorResponse) -> Response {
    with_correlation_id(correlation_id, error.into_response())
}

fn json_response<T: Serialize>(correlation_id: Uuid, status: StatusCode, body: &T) -> Response {
    with_correlation_id(correlation_id, (status, Json(body)).into_response())
}

fn with_correlation_id(correlation_id: Uuid, mut response: Response) -> Response {
    if let Ok(value) = HeaderValue::from_str(&correlation_id.to_string()) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}
