//! Punch record model and slot addressing.
//!
//! A punch record holds the six timestamp slots for one employee on one
//! work-day. Slots are written one at a time by the action resolver or by
//! an approved correction request; records are never deleted.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One timestamp slot on a punch record.
///
/// Wire names follow the correction-request vocabulary (`work_in`,
/// `break_in`, ...) so the resolver, scanner, and correction flow all
/// address slots with the same tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchSlot {
    /// Clock in at shift start.
    WorkIn,
    /// Break start.
    BreakIn,
    /// Break end.
    BreakOut,
    /// Clock out at shift end.
    WorkOut,
    /// Overtime start.
    OtIn,
    /// Overtime end.
    OtOut,
}

impl PunchSlot {
    /// All slots in their scheduled order.
    pub const ALL: [PunchSlot; 6] = [
        PunchSlot::WorkIn,
        PunchSlot::BreakIn,
        PunchSlot::BreakOut,
        PunchSlot::WorkOut,
        PunchSlot::OtIn,
        PunchSlot::OtOut,
    ];

    /// Human-readable label for notifications and debounce keys.
    pub fn label(self) -> &'static str {
        match self {
            PunchSlot::WorkIn => "clock in",
            PunchSlot::BreakIn => "start break",
            PunchSlot::BreakOut => "back from break",
            PunchSlot::WorkOut => "clock out",
            PunchSlot::OtIn => "start overtime",
            PunchSlot::OtOut => "end overtime",
        }
    }
}

impl std::fmt::Display for PunchSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PunchSlot::WorkIn => "work_in",
            PunchSlot::BreakIn => "break_in",
            PunchSlot::BreakOut => "break_out",
            PunchSlot::WorkOut => "work_out",
            PunchSlot::OtIn => "ot_in",
            PunchSlot::OtOut => "ot_out",
        };
        write!(f, "{}", name)
    }
}

/// Whether a slot write creates the day's record or updates it in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// No record exists for the day yet; the write creates one.
    Insert,
    /// The day's record exists; the write fills one slot.
    Update,
}

/// The attendance record for one employee on one work-day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PunchRecord {
    /// Unique identifier for the record.
    pub id: i64,
    /// The employee this record belongs to.
    pub employee_id: i64,
    /// The company this record belongs to.
    pub company_id: i64,
    /// The work-day the record covers.
    pub date: NaiveDate,
    /// Clock-in time.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Break-start time.
    #[serde(default)]
    pub break_start_time: Option<NaiveTime>,
    /// Break-end time.
    #[serde(default)]
    pub break_end_time: Option<NaiveTime>,
    /// Clock-out time.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Overtime-start time.
    #[serde(default)]
    pub ot_start_time: Option<NaiveTime>,
    /// Overtime-end time.
    #[serde(default)]
    pub ot_end_time: Option<NaiveTime>,
    /// Whether overtime was authorized for this day.
    #[serde(default)]
    pub ot_authorized: bool,
}

impl PunchRecord {
    /// Returns the value currently held by a slot.
    pub fn slot(&self, slot: PunchSlot) -> Option<NaiveTime> {
        match slot {
            PunchSlot::WorkIn => self.start_time,
            PunchSlot::BreakIn => self.break_start_time,
            PunchSlot::BreakOut => self.break_end_time,
            PunchSlot::WorkOut => self.end_time,
            PunchSlot::OtIn => self.ot_start_time,
            PunchSlot::OtOut => self.ot_end_time,
        }
    }

    /// Writes a slot in place.
    pub fn set_slot(&mut self, slot: PunchSlot, time: NaiveTime) {
        match slot {
            PunchSlot::WorkIn => self.start_time = Some(time),
            PunchSlot::BreakIn => self.break_start_time = Some(time),
            PunchSlot::BreakOut => self.break_end_time = Some(time),
            PunchSlot::WorkOut => self.end_time = Some(time),
            PunchSlot::OtIn => self.ot_start_time = Some(time),
            PunchSlot::OtOut => self.ot_end_time = Some(time),
        }
    }

    /// Whether any break slot holds a value.
    pub fn has_break_activity(&self) -> bool {
        self.break_start_time.is_some() || self.break_end_time.is_some()
    }

    /// Whether the record holds any punch at all.
    pub fn has_any_activity(&self) -> bool {
        PunchSlot::ALL.iter().any(|s| self.slot(*s).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
    }

    fn empty_record() -> PunchRecord {
        PunchRecord {
            id: 1,
            employee_id: 7,
            company_id: 10,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            ..PunchRecord::default()
        }
    }

    /// PR-001: slot accessors address every field
    #[test]
    fn test_slot_get_set_round_trip() {
        let mut record = empty_record();
        for (i, slot) in PunchSlot::ALL.into_iter().enumerate() {
            assert!(record.slot(slot).is_none());
            let value = time(&format!("{:02}:00:00", 9 + i));
            record.set_slot(slot, value);
            assert_eq!(record.slot(slot), Some(value));
        }
    }

    /// PR-002: break activity detected from either slot
    #[test]
    fn test_has_break_activity() {
        let mut record = empty_record();
        assert!(!record.has_break_activity());
        record.break_end_time = Some(time("13:00:00"));
        assert!(record.has_break_activity());
    }

    /// PR-003: any activity includes OT slots
    #[test]
    fn test_has_any_activity() {
        let mut record = empty_record();
        assert!(!record.has_any_activity());
        record.ot_end_time = Some(time("21:00:00"));
        assert!(record.has_any_activity());
    }

    #[test]
    fn test_punch_slot_wire_names() {
        assert_eq!(serde_json::to_string(&PunchSlot::WorkIn).unwrap(), "\"work_in\"");
        assert_eq!(serde_json::to_string(&PunchSlot::OtOut).unwrap(), "\"ot_out\"");
        assert_eq!(PunchSlot::BreakOut.to_string(), "break_out");
    }

    #[test]
    fn test_punch_record_deserializes_sparse_json() {
        let json = r#"{
            "id": 3,
            "employee_id": 7,
            "company_id": 10,
            "date": "2026-03-02",
            "start_time": "08:58:00"
        }"#;
        let record: PunchRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.slot(PunchSlot::WorkIn), Some(time("08:58:00")));
        assert!(record.slot(PunchSlot::WorkOut).is_none());
        assert!(!record.ot_authorized);
    }
}
