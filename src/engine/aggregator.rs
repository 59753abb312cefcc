//! Monthly report aggregation over the day classifier.
//!
//! A pay cycle runs from the day after one cutoff to the next cutoff
//! (cutoff day 25 gives 26th-to-25th cycles). The aggregator classifies
//! every day of the cycle containing a target date and accumulates
//! payroll-facing totals.

use std::collections::BTreeMap;
use std::thread;
use std::time::Duration;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{DayCategory, DayClassification};

use super::day_status::{self, DayContext};

/// The pay cycle containing a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleBounds {
    /// First day of the cycle (inclusive).
    pub start: NaiveDate,
    /// Last day of the cycle (inclusive).
    pub end: NaiveDate,
}

impl CycleBounds {
    /// Human-readable period label, e.g. `2026-02-26 to 2026-03-25`.
    pub fn label(&self) -> String {
        format!("{} to {}", self.start, self.end)
    }
}

/// Accumulated totals over one cycle.
///
/// `future` and `day_off` days are not counted anywhere: every other
/// classified day lands in exactly one bucket, so
/// `work_days + leaves + absent_days + swap_days` equals the number of
/// counted days.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportTotals {
    /// Days classified as worked.
    pub work_days: u32,
    /// Worked days with nonzero lateness.
    pub late_count: u32,
    /// Total minutes late across the cycle.
    pub late_minutes: i64,
    /// Leave days per leave type.
    pub leave_by_type: BTreeMap<String, u32>,
    /// Days classified as absent.
    pub absent_days: u32,
    /// Total overtime hours.
    pub ot_hours: Decimal,
    /// Days classified as swap.
    pub swap_days: u32,
    /// Public holidays with no attendance.
    pub holiday_days: u32,
}

/// One employee's report for one pay cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    /// First day of the cycle.
    pub period_start: NaiveDate,
    /// Last day of the cycle.
    pub period_end: NaiveDate,
    /// Display label for the period.
    pub period_label: String,
    /// Per-day classifications, in date order.
    pub days: Vec<DayClassification>,
    /// Accumulated totals.
    pub totals: ReportTotals,
}

/// Computes the pay cycle containing `target` for a cutoff day-of-month.
///
/// A target on or before the cutoff belongs to the cycle ending this
/// month; a later target belongs to the cycle ending next month. The
/// start is one month before the end, plus a day.
///
/// # Example
///
/// ```
/// use attendance_engine::engine::aggregator::cycle_bounds;
/// use chrono::NaiveDate;
///
/// let bounds = cycle_bounds(NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(), 25);
/// assert_eq!(bounds.start, NaiveDate::from_ymd_opt(2026, 2, 26).unwrap());
/// assert_eq!(bounds.end, NaiveDate::from_ymd_opt(2026, 3, 25).unwrap());
/// ```
pub fn cycle_bounds(target: NaiveDate, cutoff_day: u32) -> CycleBounds {
    let this_month_cutoff = target
        .with_day(cutoff_day)
        .unwrap_or_else(|| last_day_of_month(target));
    let end = if target.day() > cutoff_day {
        next_month(this_month_cutoff)
    } else {
        this_month_cutoff
    };
    let start = end
        .checked_sub_months(Months::new(1))
        .and_then(|d| d.succ_opt())
        .unwrap_or(end);
    CycleBounds { start, end }
}

fn next_month(date: NaiveDate) -> NaiveDate {
    date.checked_add_months(Months::new(1)).unwrap_or(date)
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    next_month(first).pred_opt().unwrap_or(date)
}

/// Builds the report for the cycle containing `target`.
///
/// Drives report-mode classification for every day of the cycle and
/// accumulates totals. `future` and `day_off` days appear in the per-day
/// list but never in a counted bucket.
pub fn aggregate(ctx: &DayContext<'_>, target: NaiveDate) -> MonthlyReport {
    let bounds = cycle_bounds(target, ctx.employee.cycle_cutoff_day);
    let mut days = Vec::new();
    let mut totals = ReportTotals::default();

    let mut date = bounds.start;
    while date <= bounds.end {
        let classification = day_status::classify(date, ctx);
        tally(&mut totals, &classification);
        days.push(classification);
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    info!(
        employee_id = ctx.employee.id,
        period = %bounds.label(),
        work_days = totals.work_days,
        absent_days = totals.absent_days,
        "monthly report aggregated"
    );

    MonthlyReport {
        period_start: bounds.start,
        period_end: bounds.end,
        period_label: bounds.label(),
        days,
        totals,
    }
}

fn tally(totals: &mut ReportTotals, day: &DayClassification) {
    match day.category {
        DayCategory::Worked => {
            totals.work_days += 1;
            if let Some(minutes) = day.late_minutes.filter(|m| *m > 0) {
                totals.late_count += 1;
                totals.late_minutes += minutes;
            }
            if let Some(hours) = day.ot_hours {
                totals.ot_hours += hours;
            }
        }
        DayCategory::Leave => {
            let leave_type = day.leave_type.clone().unwrap_or_else(|| "leave".to_string());
            *totals.leave_by_type.entry(leave_type).or_insert(0) += 1;
        }
        DayCategory::Absent => totals.absent_days += 1,
        DayCategory::Swap => totals.swap_days += 1,
        DayCategory::Holiday => totals.holiday_days += 1,
        DayCategory::DayOff | DayCategory::Future => {}
    }
}

/// Runs a batched read, retrying on lock conflicts with linear backoff.
///
/// Attempt `n` waits `n * read_retry_backoff_ms` before retrying. Only
/// [`EngineError::LockConflict`] is retried; everything else propagates
/// immediately.
pub fn with_read_retry<T, F>(settings: &EngineSettings, mut read: F) -> EngineResult<T>
where
    F: FnMut() -> EngineResult<T>,
{
    let mut attempt: u32 = 1;
    loop {
        match read() {
            Err(EngineError::LockConflict) if attempt < settings.read_retry_attempts => {
                warn!(attempt, "batched read hit a lock conflict; retrying");
                thread::sleep(Duration::from_millis(
                    settings.read_retry_backoff_ms * u64::from(attempt),
                ));
                attempt += 1;
            }
            outcome => return outcome,
        }
    }
}
