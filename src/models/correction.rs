//! Correction requests for forgotten punches.
//!
//! An employee who missed a punch submits a correction request that is
//! approved or rejected outside the engine. Only its *effect* matters
//! here: a pending request turns a missing slot into `pending` in scan
//! results, and an approved request writes the slot directly, bypassing
//! the action resolver.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::punch::PunchSlot;

/// Lifecycle state of a correction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionStatus {
    /// Awaiting HR approval.
    Pending,
    /// Approved; the slot write has been applied.
    Approved,
    /// Rejected; no write happened.
    Rejected,
}

/// An employee-submitted retroactive punch fix.
///
/// At most one *pending* request may exist per
/// (employee, date, timestamp type); enforcing that uniqueness is the
/// persistence collaborator's job, the engine only relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRequest {
    /// Public request identifier, `REQ-YYYYMMDD-XXXX`.
    pub request_id: String,
    /// The employee who filed the request.
    pub employee_id: i64,
    /// The employee's company.
    pub company_id: i64,
    /// Which slot the request corrects.
    pub timestamp_type: PunchSlot,
    /// The work-day the correction targets.
    pub date: NaiveDate,
    /// The time to write into the slot.
    pub time: NaiveTime,
    /// Free-text justification.
    #[serde(default)]
    pub reason: Option<String>,
    /// Current lifecycle state.
    pub status: CorrectionStatus,
}

impl CorrectionRequest {
    /// Generates a public request id of the form `REQ-YYYYMMDD-XXXX`.
    ///
    /// The four-character suffix is drawn from a fresh UUID, so collisions
    /// within a day are unlikely; the persistence layer still holds the
    /// uniqueness constraint.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::CorrectionRequest;
    /// use chrono::NaiveDate;
    ///
    /// let id = CorrectionRequest::generate_request_id(
    ///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    /// );
    /// assert!(id.starts_with("REQ-20260302-"));
    /// assert_eq!(id.len(), "REQ-20260302-".len() + 4);
    /// ```
    pub fn generate_request_id(date: NaiveDate) -> String {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .take(4)
            .collect::<String>()
            .to_ascii_uppercase();
        format!("REQ-{}-{}", date.format("%Y%m%d"), suffix)
    }
}
