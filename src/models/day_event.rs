//! External day events: holidays, leave spans, and shift swaps.
//!
//! These records come from an external leave system and may be absent
//! entirely for companies that never linked one. They are read-only and
//! only consulted by the day-status classifier.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A company public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// An approved leave span, possibly partial-day.
///
/// A span with no `start_time` covers whole days. A partial-day span
/// (both times set) only shifts the effective shift start when it
/// overlaps the scheduled clock-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveSpan {
    /// The leave type name as configured upstream (e.g. "sick", "annual").
    pub leave_type: String,
    /// First day of the span (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the span (inclusive).
    pub end_date: NaiveDate,
    /// Partial-day start, when the leave covers only part of a day.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Partial-day end.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
}

impl LeaveSpan {
    /// Whether the span covers the given date at all.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Whether the span is whole-day (no partial-day start time).
    pub fn is_full_day(&self) -> bool {
        self.start_time.is_none()
    }
}

/// An approved swap: a compensatory day off taken on `new_date` in
/// exchange for a day worked on an original rest day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftSwap {
    /// The date taken off.
    pub new_date: NaiveDate,
}

/// Union of the external records that can touch a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExternalDayEvent {
    /// A public holiday.
    Holiday(PublicHoliday),
    /// An approved leave span.
    Leave(LeaveSpan),
    /// An approved swap day.
    Swap(ShiftSwap),
}
