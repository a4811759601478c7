//! HTTP request handlers for the attendance and liquidation API.
//!
//! Handlers only orchestrate: request parsing, validation, and the calls
//! into the library. All payroll semantics live in the library modules.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::liquidation::{never_cancelled, LiquidationEngine};
use crate::models::{Employee, LiquidationPeriod, RunMode};
use crate::reconcile::Reconciler;
use crate::store::ReportSink;

use super::request::{LiquidateRequest, ReconcileRequest, RequestPlanner};
use super::response::{ApiError, ApiErrorResponse, ReconcileResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reconcile", post(reconcile_handler))
        .route("/liquidate", post(liquidate_handler))
        .with_state(state)
}

fn bad_request(error: ApiError) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Handler for the POST /reconcile endpoint.
///
/// Reconciles one employee's punch events over a date range into
/// jornadas.
async fn reconcile_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReconcileRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing reconcile request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    if request.date_from > request.date_to {
        return bad_request(ApiError::validation_error(
            "date_from must not be after date_to",
        ));
    }

    let employee: Employee = request.employee.clone().into();
    let events = request.clock_events();
    let planner = RequestPlanner::new(&request);
    let today = request.today.unwrap_or_else(|| Utc::now().date_naive());

    let start_time = Instant::now();
    let reconciler = Reconciler::new(state.config().schedule().clone());
    let jornadas = reconciler.reconcile_range(
        &employee,
        request.date_from,
        request.date_to,
        today,
        &events,
        &planner,
        &BTreeMap::new(),
    );

    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        jornadas = jornadas.len(),
        duration_ms = start_time.elapsed().as_millis() as u64,
        "Reconcile request complete"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(ReconcileResponse { jornadas }),
    )
        .into_response()
}

/// Handler for the POST /liquidate endpoint.
///
/// Runs a liquidation for a period over the supplied roster and
/// jornadas. Execute-mode reports are persisted whole before the
/// response is returned.
async fn liquidate_handler(
    State(state): State<AppState>,
    payload: Result<Json<LiquidateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing liquidate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return bad_request(rejection_error(correlation_id, rejection)),
    };

    let period = match build_period(&request) {
        Ok(period) => period,
        Err(error) => return bad_request(error),
    };

    let roster: Vec<Employee> = request.roster.into_iter().map(Into::into).collect();

    let start_time = Instant::now();
    let engine = LiquidationEngine::new(state.config().clone());
    let report = match engine.run(
        &period,
        &roster,
        &request.jornadas,
        request.mode,
        &never_cancelled(),
    ) {
        Ok(report) => report,
        Err(error) => {
            warn!(correlation_id = %correlation_id, %error, "Liquidation failed");
            let api_error: ApiErrorResponse = error.into();
            return api_error.into_response();
        }
    };

    if request.mode == RunMode::Execute {
        if let Err(error) = state.store().persist_report(&report) {
            warn!(correlation_id = %correlation_id, %error, "Report persistence failed");
            let api_error: ApiErrorResponse = error.into();
            return api_error.into_response();
        }
    }

    info!(
        correlation_id = %correlation_id,
        run_id = %report.run_id,
        payslips = report.payslips.len(),
        errors = report.errors.len(),
        duration_ms = start_time.elapsed().as_millis() as u64,
        "Liquidate request complete"
    );

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(report),
    )
        .into_response()
}

fn build_period(request: &LiquidateRequest) -> Result<LiquidationPeriod, ApiError> {
    let period = match request.period.fortnight {
        Some(half) => LiquidationPeriod::fortnight(request.period.year, request.period.month, half),
        None => LiquidationPeriod::monthly(request.period.year, request.period.month),
    };
    let mut period = period.ok_or_else(|| {
        ApiError::validation_error(format!(
            "invalid period: year {} month {} fortnight {:?}",
            request.period.year, request.period.month, request.period.fortnight
        ))
    })?;
    period.holidays = request.period.holidays.clone();
    Ok(period)
}
