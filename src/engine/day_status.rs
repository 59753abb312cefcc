//! Day status classification: report mode and scan mode.
//!
//! Both modes reason over one [`DayContext`], a snapshot of everything
//! already fetched for an employee, and both resolve the schedule through
//! [`shift_resolver`](super::shift_resolver) so report, scan, and punch
//! semantics cannot drift apart.
//!
//! Report mode collapses a day to a single payroll category through a
//! priority cascade. Scan mode inspects the day slot by slot and flags
//! what is missing or awaiting a correction approval.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::config::EngineSettings;
use crate::models::{
    CorrectionRequest, CorrectionStatus, DayCategory, DayClassification, EmployeeProfile,
    ExternalDayEvent, LeaveSpan, PunchRecord, PunchSlot, ShiftDefinition, SlotFinding, SlotStatus,
};

use super::shift_resolver;

/// Everything the classifier may consult for one employee.
///
/// Built once per scan or report pass from already-fetched data; the
/// classifier itself performs no I/O. `today` and `now` are captured once
/// per pass so a pass that straddles midnight stays self-consistent.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    /// The employee under evaluation.
    pub employee: &'a EmployeeProfile,
    /// The company's shift definitions.
    pub definitions: &'a [ShiftDefinition],
    /// Punch records covering the evaluated range.
    pub records: &'a [PunchRecord],
    /// Correction requests (any status) covering the evaluated range.
    pub corrections: &'a [CorrectionRequest],
    /// External holiday/leave/swap records; may be empty.
    pub events: &'a [ExternalDayEvent],
    /// The date of the pass.
    pub today: NaiveDate,
    /// The clock time of the pass.
    pub now: NaiveTime,
    /// Engine settings (scan grace).
    pub settings: &'a EngineSettings,
}

impl<'a> DayContext<'a> {
    fn record_for(&self, date: NaiveDate) -> Option<&'a PunchRecord> {
        self.records.iter().find(|r| r.date == date)
    }

    fn swap_on(&self, date: NaiveDate) -> bool {
        self.events.iter().any(|e| match e {
            ExternalDayEvent::Swap(s) => s.new_date == date,
            _ => false,
        })
    }

    fn holiday_on(&self, date: NaiveDate) -> Option<&'a str> {
        self.events.iter().find_map(|e| match e {
            ExternalDayEvent::Holiday(h) if h.date == date => Some(h.name.as_str()),
            _ => None,
        })
    }

    fn full_day_leave_on(&self, date: NaiveDate) -> Option<&'a LeaveSpan> {
        self.events.iter().find_map(|e| match e {
            ExternalDayEvent::Leave(span) if span.covers(date) && span.is_full_day() => Some(span),
            _ => None,
        })
    }

    fn partial_leaves_on(&self, date: NaiveDate) -> impl Iterator<Item = &'a LeaveSpan> {
        self.events.iter().filter_map(move |e| match e {
            ExternalDayEvent::Leave(span) if span.covers(date) && !span.is_full_day() => Some(span),
            _ => None,
        })
    }

    fn approved_correction(&self, date: NaiveDate, slot: PunchSlot) -> Option<&'a CorrectionRequest> {
        self.corrections.iter().find(|c| {
            c.date == date && c.timestamp_type == slot && c.status == CorrectionStatus::Approved
        })
    }

    fn has_approved_correction(&self, date: NaiveDate) -> bool {
        self.corrections
            .iter()
            .any(|c| c.date == date && c.status == CorrectionStatus::Approved)
    }

    fn has_pending_correction(&self, date: NaiveDate) -> bool {
        self.corrections
            .iter()
            .any(|c| c.date == date && c.status == CorrectionStatus::Pending)
    }

    fn pending_correction_for(&self, date: NaiveDate, slot: PunchSlot) -> bool {
        self.corrections.iter().any(|c| {
            c.date == date && c.timestamp_type == slot && c.status == CorrectionStatus::Pending
        })
    }

    /// Attendance evidence: a punch on record or an approved correction.
    fn worked_evidence(&self, date: NaiveDate) -> bool {
        self.record_for(date).is_some_and(|r| r.has_any_activity())
            || self.has_approved_correction(date)
    }
}

/// Classifies one day for reporting.
///
/// The cascade is first-match-wins: swap, holiday (worked-on-holiday
/// stays `worked` with an annotation), full-day leave, worked, weekly
/// day off, future, absent. Every date yields exactly one category.
pub fn classify(date: NaiveDate, ctx: &DayContext<'_>) -> DayClassification {
    if ctx.swap_on(date) {
        return plain(date, DayCategory::Swap);
    }

    let holiday = ctx.holiday_on(date);
    if let Some(name) = holiday {
        if !ctx.worked_evidence(date) {
            return DayClassification {
                display: format!("holiday ({})", name),
                ..plain(date, DayCategory::Holiday)
            };
        }
        // Worked on a holiday falls through to the worked branch below.
    }

    if let Some(span) = ctx.full_day_leave_on(date) {
        if !ctx.worked_evidence(date) && !ctx.has_pending_correction(date) {
            return DayClassification {
                display: format!("leave ({})", span.leave_type),
                leave_type: Some(span.leave_type.clone()),
                ..plain(date, DayCategory::Leave)
            };
        }
    }

    if ctx.worked_evidence(date) {
        return classify_worked(date, ctx, holiday.is_some());
    }

    let shift = shift_resolver::resolve_for_date(ctx.employee.id, ctx.definitions, date);
    if shift.is_none() && ctx.employee.is_weekly_day_off(date) {
        return plain(date, DayCategory::DayOff);
    }

    if date > ctx.today {
        return plain(date, DayCategory::Future);
    }

    plain(date, DayCategory::Absent)
}

fn plain(date: NaiveDate, category: DayCategory) -> DayClassification {
    DayClassification {
        date,
        category,
        display: category.to_string(),
        leave_type: None,
        late_minutes: None,
        ot_hours: None,
        holiday_annotation: false,
    }
}

fn classify_worked(date: NaiveDate, ctx: &DayContext<'_>, on_holiday: bool) -> DayClassification {
    let record = ctx.record_for(date);
    let shift = shift_resolver::resolve_for_date(ctx.employee.id, ctx.definitions, date);

    let actual_start = record
        .and_then(|r| r.start_time)
        .or_else(|| ctx.approved_correction(date, PunchSlot::WorkIn).map(|c| c.time));

    let late_minutes = match (actual_start, shift.and_then(|s| s.start_time)) {
        (Some(actual), Some(scheduled)) => {
            let effective = effective_start(date, scheduled, ctx);
            Some((actual - effective).num_minutes().max(0))
        }
        _ => None,
    };

    let ot_hours = record.and_then(overtime_hours);

    let mut notes: Vec<String> = Vec::new();
    if on_holiday {
        notes.push("holiday".to_string());
    }
    if let Some(minutes) = late_minutes.filter(|m| *m > 0) {
        notes.push(format!("late {} min", minutes));
    }
    let display = if notes.is_empty() {
        "worked".to_string()
    } else {
        format!("worked ({})", notes.join(", "))
    };

    DayClassification {
        date,
        category: DayCategory::Worked,
        display,
        leave_type: None,
        late_minutes,
        ot_hours,
        holiday_annotation: on_holiday,
    }
}

/// The start the employee is actually held to: a partial-day leave that
/// overlaps the scheduled clock-in pushes the effective start to the
/// leave's end.
fn effective_start(date: NaiveDate, scheduled: NaiveTime, ctx: &DayContext<'_>) -> NaiveTime {
    let mut effective = scheduled;
    for span in ctx.partial_leaves_on(date) {
        if let (Some(from), Some(until)) = (span.start_time, span.end_time) {
            if from <= scheduled && scheduled <= until && until > effective {
                effective = until;
            }
        }
    }
    effective
}

/// Overtime hours from the OT slot pair, rounded to two decimals.
///
/// An `ot_end` earlier than `ot_start` means the overtime ran past
/// midnight into the next day.
fn overtime_hours(record: &PunchRecord) -> Option<Decimal> {
    let start = record.ot_start_time?;
    let end = record.ot_end_time?;
    let minutes = if end >= start {
        (end - start).num_minutes()
    } else {
        (end - start).num_minutes() + 24 * 60
    };
    Some((Decimal::from(minutes) / Decimal::from(60)).round_dp(2))
}

/// Inspects one day slot by slot for the reconciliation scanner.
///
/// Exclusions are whole-day: outside the employment period, a weekly day
/// off with zero activity, or a day fully excused by a swap, holiday, or
/// full-day leave with zero activity produces no findings at all.
pub fn scan_day(date: NaiveDate, ctx: &DayContext<'_>) -> Vec<SlotFinding> {
    if !ctx.employee.is_employed_on(date) {
        return Vec::new();
    }

    let record = ctx.record_for(date);
    let has_activity = record.is_some_and(|r| r.has_any_activity());

    if !has_activity
        && (ctx.employee.is_weekly_day_off(date)
            || ctx.swap_on(date)
            || ctx.holiday_on(date).is_some()
            || ctx.full_day_leave_on(date).is_some())
    {
        return Vec::new();
    }

    let shift = shift_resolver::resolve_for_date(ctx.employee.id, ctx.definitions, date);
    let now_dt = ctx.today.and_time(ctx.now);
    let grace = Duration::minutes(ctx.settings.scan_grace_minutes);

    let mut findings = Vec::new();
    for slot in PunchSlot::ALL {
        if record.is_some_and(|r| r.slot(slot).is_some()) {
            continue;
        }
        if matches!(slot, PunchSlot::OtIn | PunchSlot::OtOut)
            && !record.is_some_and(|r| r.ot_authorized)
        {
            continue;
        }

        let forced = is_forced(slot, record);
        if !forced && !slot_expected(slot, shift, date, now_dt, grace) {
            continue;
        }

        let status = if ctx.pending_correction_for(date, slot) {
            SlotStatus::Pending
        } else {
            SlotStatus::Missing
        };
        findings.push(SlotFinding {
            date,
            slot_type: slot,
            status,
        });
    }
    findings
}

/// Consistency overrides: a slot proven necessary by its neighbors is
/// evaluated even with no schedule and before its scheduled time.
fn is_forced(slot: PunchSlot, record: Option<&PunchRecord>) -> bool {
    let Some(record) = record else { return false };
    match slot {
        PunchSlot::WorkIn => record.end_time.is_some() || record.has_break_activity(),
        PunchSlot::BreakIn => record.break_end_time.is_some(),
        PunchSlot::BreakOut => record.break_start_time.is_some(),
        PunchSlot::WorkOut => record.ot_start_time.is_some() || record.ot_end_time.is_some(),
        PunchSlot::OtIn => record.ot_end_time.is_some(),
        PunchSlot::OtOut => false,
    }
}

/// Whether an unforced slot is due by `now`.
///
/// A slot with no resolved schedule is never expected. A
/// midnight-crossing shift's clock-out belongs to the following morning,
/// so it is only due once `date + 1` reaches the shift end.
fn slot_expected(
    slot: PunchSlot,
    shift: Option<&ShiftDefinition>,
    date: NaiveDate,
    now_dt: NaiveDateTime,
    grace: Duration,
) -> bool {
    let Some(shift) = shift else { return false };

    if matches!(slot, PunchSlot::BreakIn | PunchSlot::BreakOut) && !shift.is_break_observed {
        return false;
    }

    let scheduled = match slot {
        PunchSlot::WorkIn => shift.start_time,
        PunchSlot::BreakIn => shift.break_start_time,
        PunchSlot::BreakOut => shift.break_end_time,
        PunchSlot::WorkOut => shift.end_time,
        PunchSlot::OtIn => shift.ot_start_time,
        PunchSlot::OtOut => shift.ot_end_time,
    };
    let Some(scheduled) = scheduled else { return false };

    let due_date = if slot == PunchSlot::WorkOut && shift.crosses_midnight() {
        match date.succ_opt() {
            Some(next) => next,
            None => return false,
        }
    } else {
        date
    };

    now_dt > due_date.and_time(scheduled) + grace
}
