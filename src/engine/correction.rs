//! Applying approved correction requests.
//!
//! Approval happens outside the engine; this module owns only the
//! effect: the requested slot is written directly, bypassing the punch
//! state machine, because the approver has already vouched for the time.

use tracing::info;

use crate::models::{CorrectionRequest, PunchRecord};

/// Applies an approved correction to the day's record.
///
/// Creates an empty record for the day when none exists, then writes
/// exactly the requested slot. Any previous value in that slot is
/// replaced; the other five slots are untouched.
pub fn apply_correction(
    record: Option<PunchRecord>,
    request: &CorrectionRequest,
) -> PunchRecord {
    let mut record = record.unwrap_or_else(|| PunchRecord {
        employee_id: request.employee_id,
        company_id: request.company_id,
        date: request.date,
        ..PunchRecord::default()
    });
    record.set_slot(request.timestamp_type, request.time);
    info!(
        request_id = %request.request_id,
        employee_id = request.employee_id,
        slot = %request.timestamp_type,
        date = %request.date,
        "applied approved correction"
    );
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CorrectionStatus, PunchSlot};
    use chrono::{NaiveDate, NaiveTime};

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
    }

    fn request(slot: PunchSlot) -> CorrectionRequest {
        CorrectionRequest {
            request_id: "REQ-20260302-AB12".to_string(),
            employee_id: 7,
            company_id: 10,
            timestamp_type: slot,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            time: time("18:05:00"),
            reason: Some("forgot to clock out".to_string()),
            status: CorrectionStatus::Approved,
        }
    }

    /// CA-001: applying to a missing record creates one with only the
    /// corrected slot filled
    #[test]
    fn test_apply_creates_record() {
        let record = apply_correction(None, &request(PunchSlot::WorkOut));
        assert_eq!(record.employee_id, 7);
        assert_eq!(record.end_time, Some(time("18:05:00")));
        let filled = PunchSlot::ALL
            .iter()
            .filter(|s| record.slot(**s).is_some())
            .count();
        assert_eq!(filled, 1);
    }

    /// CA-002: applying to an existing record touches only the one slot
    #[test]
    fn test_apply_preserves_other_slots() {
        let mut existing = PunchRecord {
            id: 5,
            employee_id: 7,
            company_id: 10,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            ..PunchRecord::default()
        };
        existing.start_time = Some(time("08:58:00"));

        let record = apply_correction(Some(existing), &request(PunchSlot::WorkOut));
        assert_eq!(record.start_time, Some(time("08:58:00")));
        assert_eq!(record.end_time, Some(time("18:05:00")));
        assert_eq!(record.id, 5);
    }
}
