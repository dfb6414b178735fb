//! HTTP request handlers for the site labor cost API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    CostPolicy, aggregate_daily, aggregate_manpower, aggregate_monthly,
    calculate_allocation_costs, calculate_cost, calculate_payroll,
};
use crate::error::{EngineError, EngineResult};
use crate::models::WorkRecord;

use super::request::{
    AllocationCostRequest, CostRequest, ManpowerRequest, PayPeriodRequest, PayrollRequest,
};
use super::response::{ApiError, ApiErrorResponse, ManpowerReport};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/cost", post(cost_handler))
        .route("/payroll", post(payroll_handler))
        .route("/allocations/cost", post(allocation_cost_handler))
        .route("/manpower", post(manpower_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
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
    ApiErrorResponse::bad_request(error).into_response()
}

fn engine_error_response(err: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Calculation failed"
    );
    ApiErrorResponse::from(err).into_response()
}

/// Handler for POST /cost.
///
/// Splits and prices a single entry's hours.
async fn cost_handler(
    State(state): State<AppState>,
    payload: Result<Json<CostRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing cost request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let policy = CostPolicy::from_settings(state.config().settings());
    match calculate_cost(request.hours_worked, &request.rate_profile(), &policy, 1) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                total_cost = %result.breakdown.total_cost,
                "Cost calculated"
            );
            json_ok(result.breakdown)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /payroll.
///
/// Accepts a worker, a pay period and work records, and returns the
/// worker's payroll for the period.
async fn payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let worker = request.worker;
    let pay_period = match request.pay_period.into_period() {
        Ok(period) => period,
        Err(err) => return engine_error_response(err, correlation_id),
    };
    let records: Vec<WorkRecord> = request
        .records
        .into_iter()
        .map(|r| r.into_record(&worker.id))
        .collect();

    let start_time = Instant::now();
    match calculate_payroll(&worker, &pay_period, &records, state.config().config()) {
        Ok(result) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                worker_id = %worker.id,
                records_count = records.len(),
                gross_pay = %result.totals.gross_pay,
                duration_us = duration.as_micros(),
                "Payroll completed successfully"
            );
            json_ok(result)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /allocations/cost.
async fn allocation_cost_handler(
    State(state): State<AppState>,
    payload: Result<Json<AllocationCostRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allocation cost request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match calculate_allocation_costs(&request.allocations, state.config().config()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                allocations_count = result.lines.len(),
                total_cost = %result.totals.total_cost,
                "Allocation costs completed successfully"
            );
            json_ok(result)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

/// Handler for POST /manpower.
///
/// Rolls work records up per day, and per worker when `worker_id` is given.
async fn manpower_handler(
    State(state): State<AppState>,
    payload: Result<Json<ManpowerRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing manpower request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match build_manpower_report(request, state.config().settings().standard_day_hours) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                days = report.daily.len(),
                "Manpower aggregated"
            );
            json_ok(report)
        }
        Err(err) => engine_error_response(err, correlation_id),
    }
}

fn build_manpower_report(
    request: ManpowerRequest,
    standard_day_hours: Decimal,
) -> EngineResult<ManpowerReport> {
    let month = match request.pay_period {
        PayPeriodRequest::Month { year, month } => Some((year, month)),
        PayPeriodRequest::Range { .. } => None,
    };
    let pay_period = request.pay_period.into_period()?;
    let records = &request.records;

    let summary = match (request.worker_id.as_deref(), month) {
        (Some(worker_id), Some((year, month))) => Some(aggregate_monthly(
            records,
            worker_id,
            year,
            month,
            standard_day_hours,
        )?),
        (Some(worker_id), None) => Some(aggregate_manpower(
            records,
            worker_id,
            &pay_period,
            standard_day_hours,
        )?),
        (None, _) => None,
    };
    let daily = aggregate_daily(records, &pay_period, standard_day_hours)?;

    Ok(ManpowerReport {
        pay_period,
        summary,
        daily,
    })
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
