//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::engine::{
    self, DayContext, PunchAction, TriggerContext, aggregate, next_action, scan_window,
};
use crate::error::EngineError;

use super::request::{BeaconRequest, PunchRequest, ReportRequest, ScanRequest, TriggerKind};
use super::response::{ApiError, ApiErrorResponse, PunchOutcome, PunchResponse, ScanResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/punch", post(punch_handler))
        .route("/beacon", post(beacon_handler))
        .route("/scan", post(scan_handler))
        .route("/report", post(report_handler))
        .with_state(state)
}

/// Turns a JSON extraction rejection into a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
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
    };
    (StatusCode::BAD_REQUEST, Json(error)).into_response()
}

/// Handler for the POST /punch endpoint.
///
/// Resolves the shift for the trigger moment, runs the punch state
/// machine, and applies the debounce guard to write decisions. The
/// caller owns the actual slot write.
async fn punch_handler(
    State(state): State<AppState>,
    payload: Result<Json<PunchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let now = request.now.unwrap_or_else(|| Local::now().naive_local());
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        trigger = ?request.trigger,
        %now,
        "processing punch trigger"
    );

    match request.trigger {
        TriggerKind::Manual => {
            if state.beacons().fresh(request.employee_id).is_none() {
                warn!(
                    correlation_id = %correlation_id,
                    employee_id = request.employee_id,
                    "manual trigger without a fresh beacon sighting"
                );
                return ApiErrorResponse::from(EngineError::BeaconExpired {
                    employee_id: request.employee_id,
                })
                .into_response();
            }
        }
        TriggerKind::Beacon => {
            if let Some(hardware_id) = &request.hardware_id {
                state.beacons().record(request.employee_id, hardware_id.clone());
            }
        }
    }

    let settings = state.settings();
    let Some(resolved) = engine::resolve(
        request.employee_id,
        &request.shift_definitions,
        now.date(),
        now.time(),
        settings.night_shift_cutoff,
    ) else {
        return ApiErrorResponse::from(EngineError::ShiftNotFound {
            employee_id: request.employee_id,
            date: now.date(),
        })
        .into_response();
    };

    let ctx = TriggerContext {
        employee_id: request.employee_id,
        now: now.time(),
        shift: resolved.definition,
        record: request.record.as_ref(),
        ot_authorizations: &request.ot_authorizations,
        settings,
    };

    let response = match next_action(&ctx) {
        PunchAction::Write { slot, mode, label } => {
            let is_debounced = state.debounce().check_and_record(request.employee_id, label);
            info!(
                correlation_id = %correlation_id,
                employee_id = request.employee_id,
                owning_date = %resolved.owning_date,
                slot = %slot,
                is_debounced,
                "punch decision"
            );
            PunchResponse {
                status: PunchOutcome::Success,
                action: Some(slot),
                mode: Some(mode),
                time: Some(now.time()),
                is_debounced,
                reason: None,
            }
        }
        PunchAction::None { reason } => {
            info!(
                correlation_id = %correlation_id,
                employee_id = request.employee_id,
                reason = %reason,
                "no punch action warranted"
            );
            PunchResponse {
                status: PunchOutcome::Info,
                action: None,
                mode: None,
                time: None,
                is_debounced: false,
                reason: Some(reason),
            }
        }
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Handler for the POST /beacon endpoint.
///
/// Records a beacon sighting so a later manual trigger can prove
/// physical presence.
async fn beacon_handler(
    State(state): State<AppState>,
    payload: Result<Json<BeaconRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee_id,
        hardware_id = %request.hardware_id,
        "recording beacon sighting"
    );
    state.beacons().record(request.employee_id, request.hardware_id);

    StatusCode::NO_CONTENT.into_response()
}

/// Handler for the POST /scan endpoint.
///
/// Runs the reconciliation scanner over the rolling window ending today.
async fn scan_handler(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let now = request.now.unwrap_or_else(|| Local::now().naive_local());
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee.id,
        %now,
        "processing reconciliation scan"
    );

    let ctx = DayContext {
        employee: &request.employee,
        definitions: &request.shift_definitions,
        records: &request.records,
        corrections: &request.corrections,
        events: &request.events,
        today: now.date(),
        now: now.time(),
        settings: state.settings(),
    };
    let findings = scan_window(&ctx);

    (StatusCode::OK, Json(ScanResponse { findings })).into_response()
}

/// Handler for the POST /report endpoint.
///
/// Classifies every day of the pay cycle containing the target date and
/// returns the per-day breakdown with totals.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let now = request.now.unwrap_or_else(|| Local::now().naive_local());
    info!(
        correlation_id = %correlation_id,
        employee_id = request.employee.id,
        target_date = %request.target_date,
        "processing monthly report"
    );

    let ctx = DayContext {
        employee: &request.employee,
        definitions: &request.shift_definitions,
        records: &request.records,
        corrections: &request.corrections,
        events: &request.events,
        today: now.date(),
        now: now.time(),
        settings: state.settings(),
    };
    let report = aggregate(&ctx, request.target_date);

    (StatusCode::OK, Json(report)).into_response()
}
