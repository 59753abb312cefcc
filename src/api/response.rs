//! Response types for the attendance engine API.
//!
//! This module defines the success envelopes and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{PunchSlot, SlotFinding, WriteMode};

/// Outcome classification of a punch trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchOutcome {
    /// A slot write was decided (or suppressed as a duplicate).
    Success,
    /// The trigger was understood but no write is warranted.
    Info,
}

/// Response body for the `/punch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchResponse {
    /// Whether the trigger produced a write decision.
    pub status: PunchOutcome,
    /// The slot the caller should write, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<PunchSlot>,
    /// Whether the write creates the day's record or updates it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<WriteMode>,
    /// The time to write into the slot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    /// Set when a duplicate trigger was suppressed; the caller must not
    /// write again but should still confirm to the user.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_debounced: bool,
    /// Why no write is warranted, on info outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Response body for the `/scan` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    /// Missing-or-pending findings, newest first.
    pub findings: Vec<SlotFinding>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ShiftNotFound { employee_id, date } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "SHIFT_NOT_FOUND",
                    "No shift assigned",
                    format!("No shift resolved for employee {} on {}", employee_id, date),
                ),
            },
            EngineError::Unauthorized { message } => ApiErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                error: ApiError::new("UNAUTHORIZED", message),
            },
            EngineError::OvertimePermissionDenied { employee_id } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::with_details(
                    "OT_PERMISSION_DENIED",
                    "Overtime permission denied",
                    format!("No overtime window is open for employee {}", employee_id),
                ),
            },
            EngineError::BeaconExpired { employee_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "BEACON_EXPIRED",
                    "No fresh beacon sighting",
                    format!(
                        "Employee {} has no beacon sighting within the freshness window",
                        employee_id
                    ),
                ),
            },
            EngineError::DataSource { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("DATA_SOURCE_ERROR", "Data source error", message),
            },
            EngineError::LockConflict => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::new(
                    "LOCK_CONFLICT",
                    "Report data is temporarily locked; retry shortly",
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Settings file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_engine_error_status_mapping() {
        let mapped: ApiErrorResponse = EngineError::BeaconExpired { employee_id: 7 }.into();
        assert_eq!(mapped.status, StatusCode::NOT_FOUND);
        assert_eq!(mapped.error.code, "BEACON_EXPIRED");

        let mapped: ApiErrorResponse = EngineError::LockConflict.into();
        assert_eq!(mapped.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_punch_response_omits_empty_fields() {
        let response = PunchResponse {
            status: PunchOutcome::Info,
            action: None,
            mode: None,
            time: None,
            is_debounced: false,
            reason: Some("shift end not reached (scheduled 18:00)".to_string()),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"info\""));
        assert!(!json.contains("action"));
        assert!(!json.contains("is_debounced"));
    }
}
