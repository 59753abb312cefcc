//! Shift definition and overtime authorization models.
//!
//! A shift definition is one row of the company's rotating schedule. The
//! same table encodes three distinct shapes, disambiguated only by which
//! optional fields are populated:
//!
//! - **specific date**: `month` set, `day_scope` holds days of the month
//! - **weekly pattern**: no `month`, `day_scope` holds ISO weekdays
//! - **default**: neither `month` nor `day_scope`
//!
//! Every consumer must resolve these identically; the resolution itself
//! lives in [`crate::engine::shift_resolver`].

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::scope::{DayScope, IdScope};

/// The shape of a shift definition row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftShape {
    /// Applies to listed days of one calendar month.
    SpecificDate,
    /// Applies to listed ISO weekdays (Mon=1..Sun=7), every week.
    WeeklyPattern,
    /// Applies whenever nothing more specific matched.
    Default,
}

/// One row of a company's shift schedule.
///
/// Authored externally and read-only to the engine. Exactly one of the
/// three [`ShiftShape`]s holds for any row; [`ShiftDefinition::shape`]
/// derives it from the populated fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDefinition {
    /// Unique identifier for the row.
    pub id: i64,
    /// The company this row belongs to.
    pub company_id: i64,
    /// Which employees the row applies to.
    pub employee_scope: IdScope,
    /// Calendar month (1-12) for specific-date rows.
    #[serde(default)]
    pub month: Option<u32>,
    /// Day numbers; day-of-month when `month` is set, ISO weekday otherwise.
    #[serde(default)]
    pub day_scope: Option<DayScope>,
    /// Scheduled clock-in time.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Scheduled clock-out time.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Scheduled break start.
    #[serde(default)]
    pub break_start_time: Option<NaiveTime>,
    /// Scheduled break end.
    #[serde(default)]
    pub break_end_time: Option<NaiveTime>,
    /// Scheduled overtime start.
    #[serde(default)]
    pub ot_start_time: Option<NaiveTime>,
    /// Scheduled overtime end.
    #[serde(default)]
    pub ot_end_time: Option<NaiveTime>,
    /// Whether the break slots are tracked for this shift.
    #[serde(default)]
    pub is_break_observed: bool,
    /// Free-time mode: no fixed schedule, only start/end are tracked.
    #[serde(default)]
    pub is_free_time: bool,
}

impl ShiftDefinition {
    /// Derives the row's shape from its populated fields.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{DayScope, IdScope, ShiftDefinition, ShiftShape};
    ///
    /// let mut row = ShiftDefinition {
    ///     id: 1,
    ///     company_id: 1,
    ///     employee_scope: IdScope::All,
    ///     month: None,
    ///     day_scope: DayScope::parse(Some("[1,2,3,4,5]")),
    ///     start_time: None,
    ///     end_time: None,
    ///     break_start_time: None,
    ///     break_end_time: None,
    ///     ot_start_time: None,
    ///     ot_end_time: None,
    ///     is_break_observed: false,
    ///     is_free_time: false,
    /// };
    /// assert_eq!(row.shape(), ShiftShape::WeeklyPattern);
    ///
    /// row.month = Some(4);
    /// assert_eq!(row.shape(), ShiftShape::SpecificDate);
    ///
    /// row.month = None;
    /// row.day_scope = None;
    /// assert_eq!(row.shape(), ShiftShape::Default);
    /// ```
    pub fn shape(&self) -> ShiftShape {
        match (self.month, &self.day_scope) {
            (Some(_), Some(_)) => ShiftShape::SpecificDate,
            (None, Some(_)) => ShiftShape::WeeklyPattern,
            _ => ShiftShape::Default,
        }
    }

    /// Whether the scheduled shift crosses midnight (end numerically
    /// earlier than start). Such rows are eligible for the night-shift
    /// lookback in the resolver.
    pub fn crosses_midnight(&self) -> bool {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => end < start,
            _ => false,
        }
    }
}

/// One overtime-authorization row for a company.
///
/// Authorizes the employees in scope to punch overtime while the clock is
/// inside `[ot_start, ot_end]` on the same day. Midnight-crossing windows
/// are not supported and are rejected by the gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeAuthorization {
    /// Unique identifier for the row.
    pub id: i64,
    /// The company this row belongs to.
    pub company_id: i64,
    /// Which employees the row authorizes.
    pub employee_scope: IdScope,
    /// Window start (inclusive).
    pub ot_start: NaiveTime,
    /// Window end (inclusive).
    pub ot_end: NaiveTime,
}

impl OvertimeAuthorization {
    /// Whether the authorized window crosses midnight.
    pub fn crosses_midnight(&self) -> bool {
        self.ot_end < self.ot_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IdScope;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
    }

    fn base_row() -> ShiftDefinition {
        ShiftDefinition {
            id: 1,
            company_id: 10,
            employee_scope: IdScope::All,
            month: None,
            day_scope: None,
            start_time: Some(time("09:00:00")),
            end_time: Some(time("18:00:00")),
            break_start_time: Some(time("12:00:00")),
            break_end_time: Some(time("13:00:00")),
            ot_start_time: None,
            ot_end_time: None,
            is_break_observed: true,
            is_free_time: false,
        }
    }

    /// SD-001: shape disambiguation covers all three cases
    #[test]
    fn test_shape_disambiguation() {
        let mut row = base_row();
        assert_eq!(row.shape(), ShiftShape::Default);

        row.day_scope = DayScope::parse(Some("1,2,3"));
        assert_eq!(row.shape(), ShiftShape::WeeklyPattern);

        row.month = Some(12);
        assert_eq!(row.shape(), ShiftShape::SpecificDate);
    }

    /// SD-002: month with no day scope still reads as default
    #[test]
    fn test_month_without_days_is_default() {
        let mut row = base_row();
        row.month = Some(6);
        assert_eq!(row.shape(), ShiftShape::Default);
    }

    /// SD-003: midnight crossing detected from times alone
    #[test]
    fn test_crosses_midnight() {
        let mut row = base_row();
        assert!(!row.crosses_midnight());

        row.start_time = Some(time("22:00:00"));
        row.end_time = Some(time("06:00:00"));
        assert!(row.crosses_midnight());
    }

    /// SD-004: missing times never count as midnight crossing
    #[test]
    fn test_free_time_row_never_crosses_midnight() {
        let mut row = base_row();
        row.start_time = None;
        row.end_time = None;
        row.is_free_time = true;
        assert!(!row.crosses_midnight());
    }

    #[test]
    fn test_overtime_authorization_crosses_midnight() {
        let auth = OvertimeAuthorization {
            id: 1,
            company_id: 10,
            employee_scope: IdScope::All,
            ot_start: time("22:00:00"),
            ot_end: time("02:00:00"),
        };
        assert!(auth.crosses_midnight());
    }

    #[test]
    fn test_shift_definition_serialization_round_trip() {
        let row = base_row();
        let json = serde_json::to_string(&row).unwrap();
        let back: ShiftDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(row, back);
    }

    #[test]
    fn test_shift_definition_deserializes_with_defaults() {
        let json = r#"{
            "id": 5,
            "company_id": 2,
            "employee_scope": "all",
            "start_time": "08:30:00",
            "end_time": "17:30:00"
        }"#;
        let row: ShiftDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(row.shape(), ShiftShape::Default);
        assert!(!row.is_free_time);
        assert!(!row.is_break_observed);
    }
}
