//! Day classification and scan finding models.
//!
//! These are ephemeral outputs, recomputed per query and never stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::punch::PunchSlot;

/// Mutually exclusive payroll category for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCategory {
    /// Compensatory day off exchanged for a day worked.
    Swap,
    /// Public holiday with no attendance.
    Holiday,
    /// Approved full-day leave.
    Leave,
    /// Attendance (or an approved correction) on record.
    Worked,
    /// Configured weekly day off with no schedule.
    DayOff,
    /// Strictly after today; not yet classifiable.
    Future,
    /// Scheduled but no attendance and no excuse on record.
    Absent,
}

impl std::fmt::Display for DayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DayCategory::Swap => "swap",
            DayCategory::Holiday => "holiday",
            DayCategory::Leave => "leave",
            DayCategory::Worked => "worked",
            DayCategory::DayOff => "day_off",
            DayCategory::Future => "future",
            DayCategory::Absent => "absent",
        };
        write!(f, "{}", name)
    }
}

/// The classification of one day in report mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayClassification {
    /// The classified date.
    pub date: NaiveDate,
    /// The payroll category.
    pub category: DayCategory,
    /// Display text, e.g. `worked (late 12 min)` or `leave (sick)`.
    pub display: String,
    /// Leave type name, set when `category` is [`DayCategory::Leave`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leave_type: Option<String>,
    /// Minutes late past the effective shift start, when worked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub late_minutes: Option<i64>,
    /// Overtime hours recorded on the day, when worked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ot_hours: Option<Decimal>,
    /// Set when the day was worked on a public holiday.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub holiday_annotation: bool,
}

/// Status of one flagged slot in scan mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    /// The slot has no value and no pending correction.
    Missing,
    /// A pending correction request already covers the slot.
    Pending,
}

/// One missing-or-pending slot reported by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFinding {
    /// The work-day the slot belongs to.
    pub date: NaiveDate,
    /// Which slot is affected.
    pub slot_type: PunchSlot,
    /// Whether the slot is missing outright or awaiting approval.
    pub status: SlotStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_category_serialization() {
        assert_eq!(serde_json::to_string(&DayCategory::DayOff).unwrap(), "\"day_off\"");
        assert_eq!(serde_json::to_string(&DayCategory::Swap).unwrap(), "\"swap\"");
    }

    #[test]
    fn test_day_category_display() {
        assert_eq!(DayCategory::Absent.to_string(), "absent");
        assert_eq!(DayCategory::DayOff.to_string(), "day_off");
    }

    #[test]
    fn test_classification_omits_empty_fields() {
        let classification = DayClassification {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            category: DayCategory::Absent,
            display: "absent".to_string(),
            leave_type: None,
            late_minutes: None,
            ot_hours: None,
            holiday_annotation: false,
        };
        let json = serde_json::to_string(&classification).unwrap();
        assert!(!json.contains("late_minutes"));
        assert!(!json.contains("ot_hours"));
        assert!(!json.contains("holiday_annotation"));
    }

    #[test]
    fn test_slot_finding_round_trip() {
        let finding = SlotFinding {
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            slot_type: PunchSlot::BreakOut,
            status: SlotStatus::Pending,
        };
        let json = serde_json::to_string(&finding).unwrap();
        assert!(json.contains("\"slot_type\":\"break_out\""));
        assert!(json.contains("\"status\":\"pending\""));
        let back: SlotFinding = serde_json::from_str(&json).unwrap();
        assert_eq!(finding, back);
    }
}
