//! Request types for the attendance engine API.
//!
//! Every endpoint is stateless over request-supplied data: the caller
//! fetches records from its own persistence and hands them to the engine
//! in the request body.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{
    CorrectionRequest, EmployeeProfile, ExternalDayEvent, OvertimeAuthorization, PunchRecord,
    ShiftDefinition,
};

/// How a punch was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// A device-detected beacon proximity event.
    Beacon,
    /// An explicit user action from the menu; requires a fresh sighting.
    Manual,
}

/// Request body for the `/punch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRequest {
    /// The employee who triggered.
    pub employee_id: i64,
    /// How the punch was triggered.
    pub trigger: TriggerKind,
    /// The beacon hardware seen, for beacon triggers.
    #[serde(default)]
    pub hardware_id: Option<String>,
    /// The wall-clock moment of the trigger; defaults to the server's
    /// local time when omitted.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
    /// The company's shift definitions.
    pub shift_definitions: Vec<ShiftDefinition>,
    /// The company's overtime authorization rows.
    #[serde(default)]
    pub ot_authorizations: Vec<OvertimeAuthorization>,
    /// The punch record already on file for the owning day, if any.
    #[serde(default)]
    pub record: Option<PunchRecord>,
}

/// Request body for the `/beacon` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeaconRequest {
    /// The employee the sighting belongs to.
    pub employee_id: i64,
    /// Hardware id of the sighted beacon.
    pub hardware_id: String,
}

/// Request body for the `/scan` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    /// The employee under evaluation.
    pub employee: EmployeeProfile,
    /// The company's shift definitions.
    pub shift_definitions: Vec<ShiftDefinition>,
    /// Punch records covering the scan window.
    #[serde(default)]
    pub records: Vec<PunchRecord>,
    /// Correction requests covering the window.
    #[serde(default)]
    pub corrections: Vec<CorrectionRequest>,
    /// External holiday/leave/swap records; may be empty.
    #[serde(default)]
    pub events: Vec<ExternalDayEvent>,
    /// The scan moment; defaults to the server's local time.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

/// Request body for the `/report` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// The employee under evaluation.
    pub employee: EmployeeProfile,
    /// The company's shift definitions.
    pub shift_definitions: Vec<ShiftDefinition>,
    /// Punch records covering the cycle.
    #[serde(default)]
    pub records: Vec<PunchRecord>,
    /// Correction requests covering the cycle.
    #[serde(default)]
    pub corrections: Vec<CorrectionRequest>,
    /// External holiday/leave/swap records; may be empty.
    #[serde(default)]
    pub events: Vec<ExternalDayEvent>,
    /// Any date inside the pay cycle to report on.
    pub target_date: NaiveDate,
    /// The report moment; defaults to the server's local time.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punch_request_minimal_json() {
        let json = r#"{
            "employee_id": 7,
            "trigger": "beacon",
            "shift_definitions": []
        }"#;
        let request: PunchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, 7);
        assert_eq!(request.trigger, TriggerKind::Beacon);
        assert!(request.now.is_none());
        assert!(request.record.is_none());
        assert!(request.ot_authorizations.is_empty());
    }

    #[test]
    fn test_trigger_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&TriggerKind::Manual).unwrap(),
            "\"manual\""
        );
    }
}
