//! The punch state machine.
//!
//! Given a resolved shift, the current time, and whatever punches are
//! already on record, `next_action` decides the single slot a trigger
//! should fill, or explains why none should be written. The beacon
//! handler, the manual menu trigger, and the proactive notification check
//! all flow through this one function so they can never disagree.

use chrono::NaiveTime;

use crate::config::EngineSettings;
use crate::models::{OvertimeAuthorization, PunchRecord, PunchSlot, ShiftDefinition, WriteMode};

use super::overtime_gate::{self, OvertimeDecision};

/// Everything `next_action` needs, fetched up front by the caller.
///
/// The resolver performs no I/O of its own.
#[derive(Debug)]
pub struct TriggerContext<'a> {
    /// The employee who triggered.
    pub employee_id: i64,
    /// The current clock time.
    pub now: NaiveTime,
    /// The resolved shift for the owning date.
    pub shift: &'a ShiftDefinition,
    /// The day's punch record, if one exists.
    pub record: Option<&'a PunchRecord>,
    /// The company's overtime authorization rows.
    pub ot_authorizations: &'a [OvertimeAuthorization],
    /// Engine settings (early-break grace).
    pub settings: &'a EngineSettings,
}

/// The decision for one trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PunchAction {
    /// Nothing should be written.
    None {
        /// Why no write is warranted.
        reason: String,
    },
    /// Write one slot with the current time.
    Write {
        /// The slot to fill.
        slot: PunchSlot,
        /// Whether the write creates the day's record or updates it.
        mode: WriteMode,
        /// Human-readable action label (also the debounce key).
        label: &'static str,
    },
}

impl PunchAction {
    fn write(slot: PunchSlot, record: Option<&PunchRecord>) -> Self {
        PunchAction::Write {
            slot,
            mode: if record.is_some() {
                WriteMode::Update
            } else {
                WriteMode::Insert
            },
            label: slot.label(),
        }
    }

    fn none(reason: impl Into<String>) -> Self {
        PunchAction::None {
            reason: reason.into(),
        }
    }
}

/// Decides the next slot to write for a trigger.
///
/// States are evaluated in shift order, each guarded by "slot not yet
/// filled". Early clock-ins are always accepted (lateness is a derived
/// display value, never blocking); clocking out before the scheduled end
/// is hard-gated; the break-start gate allows a configurable few minutes
/// of early grace.
///
/// Free-time shifts are the exception to the fill-once rule: once
/// started, every further trigger rewrites `work_out`, so the last
/// trigger of the day stands as the clock-out.
///
/// # Example
///
/// ```
/// use attendance_engine::config::EngineSettings;
/// use attendance_engine::engine::action_resolver::{next_action, PunchAction, TriggerContext};
/// use attendance_engine::models::{IdScope, PunchSlot, ShiftDefinition};
/// use chrono::NaiveTime;
///
/// let shift = ShiftDefinition {
///     id: 1,
///     company_id: 1,
///     employee_scope: IdScope::All,
///     month: None,
///     day_scope: None,
///     start_time: NaiveTime::from_hms_opt(9, 0, 0),
///     end_time: NaiveTime::from_hms_opt(18, 0, 0),
///     break_start_time: None,
///     break_end_time: None,
///     ot_start_time: None,
///     ot_end_time: None,
///     is_break_observed: false,
///     is_free_time: false,
/// };
/// let settings = EngineSettings::default();
/// let ctx = TriggerContext {
///     employee_id: 7,
///     now: NaiveTime::from_hms_opt(8, 50, 0).unwrap(),
///     shift: &shift,
///     record: None,
///     ot_authorizations: &[],
///     settings: &settings,
/// };
/// match next_action(&ctx) {
///     PunchAction::Write { slot, .. } => assert_eq!(slot, PunchSlot::WorkIn),
///     other => panic!("unexpected action: {:?}", other),
/// }
/// ```
pub fn next_action(ctx: &TriggerContext<'_>) -> PunchAction {
    if ctx.shift.is_free_time {
        return free_time_action(ctx.record);
    }

    let record = ctx.record;
    let has_start = record.and_then(|r| r.start_time).is_some();
    let has_break_start = record.and_then(|r| r.break_start_time).is_some();
    let has_break_end = record.and_then(|r| r.break_end_time).is_some();
    let has_end = record.and_then(|r| r.end_time).is_some();

    if !has_start {
        return morning_action(ctx);
    }

    if ctx.shift.is_break_observed && !has_break_start {
        return break_start_action(ctx);
    }

    if ctx.shift.is_break_observed && has_break_start && !has_break_end {
        // Returning early or returning late are both legitimate; lateness
        // is derived at report time.
        return PunchAction::write(PunchSlot::BreakOut, record);
    }

    if !has_end {
        return end_action(ctx);
    }

    overtime_action(ctx)
}

/// Free time tracks only start and end. Once both exist, further
/// triggers keep rewriting the end, so the last trigger of the day
/// stands as the clock-out.
fn free_time_action(record: Option<&PunchRecord>) -> PunchAction {
    match record {
        None => PunchAction::write(PunchSlot::WorkIn, None),
        Some(r) if r.start_time.is_none() => PunchAction::write(PunchSlot::WorkIn, record),
        Some(_) => PunchAction::write(PunchSlot::WorkOut, record),
    }
}

fn morning_action(ctx: &TriggerContext<'_>) -> PunchAction {
    let now = ctx.now;
    let shift = ctx.shift;
    let slot_empty = |slot: PunchSlot| ctx.record.is_none_or(|r| r.slot(slot).is_none());

    // Forgot to clock in but the day is over: skip straight to the
    // clock-out slot. A midnight-crossing shift's evening hours read as
    // "after the end" numerically, so the shortcut is day shifts only.
    if !shift.crosses_midnight()
        && shift.end_time.is_some_and(|end| now > end)
        && slot_empty(PunchSlot::WorkOut)
    {
        return PunchAction::write(PunchSlot::WorkOut, ctx.record);
    }

    if let Some(break_start) = shift.break_start_time {
        if now > break_start {
            let past_break = shift.break_end_time.is_some_and(|break_end| now > break_end);
            if past_break && slot_empty(PunchSlot::BreakOut) {
                return PunchAction::write(PunchSlot::BreakOut, ctx.record);
            }
            if !past_break && slot_empty(PunchSlot::BreakIn) {
                return PunchAction::write(PunchSlot::BreakIn, ctx.record);
            }
        }
    }

    // Early punches are always allowed; arriving after start is recorded
    // as-is and surfaces as lateness in reports.
    PunchAction::write(PunchSlot::WorkIn, ctx.record)
}

fn break_start_action(ctx: &TriggerContext<'_>) -> PunchAction {
    if let Some(break_start) = ctx.shift.break_start_time {
        let grace = chrono::Duration::minutes(ctx.settings.break_early_grace_minutes);
        if ctx.now < break_start - grace {
            return PunchAction::none(format!(
                "break has not started yet (allowed from {} minutes before {})",
                ctx.settings.break_early_grace_minutes,
                break_start.format("%H:%M"),
            ));
        }
    }
    PunchAction::write(PunchSlot::BreakIn, ctx.record)
}

fn end_action(ctx: &TriggerContext<'_>) -> PunchAction {
    if let Some(end) = ctx.shift.end_time {
        // For a midnight-crossing shift the evening hours are still
        // before the (next-morning) end.
        let still_open = match ctx.shift.start_time {
            Some(start) if end < start => ctx.now >= start || ctx.now < end,
            _ => ctx.now < end,
        };
        if still_open {
            return PunchAction::none(format!(
                "shift end not reached (scheduled {})",
                end.format("%H:%M"),
            ));
        }
    }
    PunchAction::write(PunchSlot::WorkOut, ctx.record)
}

fn overtime_action(ctx: &TriggerContext<'_>) -> PunchAction {
    let has_ot_start = ctx.record.and_then(|r| r.ot_start_time).is_some();
    let has_ot_end = ctx.record.and_then(|r| r.ot_end_time).is_some();

    if !has_ot_start {
        return match overtime_gate::authorize(ctx.employee_id, ctx.ot_authorizations, ctx.now) {
            OvertimeDecision::Authorized => PunchAction::write(PunchSlot::OtIn, ctx.record),
            OvertimeDecision::Denied => PunchAction::none("OT permission denied"),
            OvertimeDecision::UnsupportedWindow => {
                PunchAction::none("overtime window crossing midnight is not supported")
            }
        };
    }

    if !has_ot_end {
        return PunchAction::write(PunchSlot::OtOut, ctx.record);
    }

    PunchAction::none("all slots filled")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IdScope, PunchRecord};
    use chrono::NaiveDate;

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M:%S").unwrap()
    }

    fn shift() -> ShiftDefinition {
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

    fn record() -> PunchRecord {
        PunchRecord {
            id: 1,
            employee_id: 7,
            company_id: 10,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            ..PunchRecord::default()
        }
    }

    fn ctx<'a>(
        shift: &'a ShiftDefinition,
        now: &str,
        record: Option<&'a PunchRecord>,
        ot: &'a [OvertimeAuthorization],
        settings: &'a EngineSettings,
    ) -> TriggerContext<'a> {
        TriggerContext {
            employee_id: 7,
            now: time(now),
            shift,
            record,
            ot_authorizations: ot,
            settings,
        }
    }

    fn expect_write(action: PunchAction, slot: PunchSlot, mode: WriteMode) {
        match action {
            PunchAction::Write {
                slot: s, mode: m, ..
            } => {
                assert_eq!(s, slot);
                assert_eq!(m, mode);
            }
            other => panic!("expected write of {:?}, got {:?}", slot, other),
        }
    }

    fn expect_none(action: PunchAction, fragment: &str) {
        match action {
            PunchAction::None { reason } => {
                assert!(
                    reason.contains(fragment),
                    "reason '{}' missing '{}'",
                    reason,
                    fragment
                );
            }
            other => panic!("expected none, got {:?}", other),
        }
    }

    /// AR-001: early clock-in is accepted (insert when no record)
    #[test]
    fn test_early_clock_in_allowed() {
        let shift = shift();
        let settings = EngineSettings::default();
        let action = next_action(&ctx(&shift, "08:50:00", None, &[], &settings));
        expect_write(action, PunchSlot::WorkIn, WriteMode::Insert);
    }

    /// AR-002: late clock-in is still a clock-in (lateness non-blocking)
    #[test]
    fn test_late_clock_in_allowed() {
        let shift = shift();
        let settings = EngineSettings::default();
        let action = next_action(&ctx(&shift, "09:05:00", None, &[], &settings));
        expect_write(action, PunchSlot::WorkIn, WriteMode::Insert);
    }

    /// AR-003: no start and past shift end skips straight to clock-out
    #[test]
    fn test_forgot_start_past_end_writes_end() {
        let shift = shift();
        let settings = EngineSettings::default();
        let action = next_action(&ctx(&shift, "18:30:00", None, &[], &settings));
        expect_write(action, PunchSlot::WorkOut, WriteMode::Insert);
    }

    /// AR-004: no start, inside break window, writes break start
    #[test]
    fn test_forgot_start_in_break_window() {
        let shift = shift();
        let settings = EngineSettings::default();
        let action = next_action(&ctx(&shift, "12:30:00", None, &[], &settings));
        expect_write(action, PunchSlot::BreakIn, WriteMode::Insert);
    }

    /// AR-005: no start, past break end, writes break end
    #[test]
    fn test_forgot_start_past_break_end() {
        let shift = shift();
        let settings = EngineSettings::default();
        let action = next_action(&ctx(&shift, "13:30:00", None, &[], &settings));
        expect_write(action, PunchSlot::BreakOut, WriteMode::Insert);
    }

    /// AR-006: break start rejected more than 5 minutes early
    #[test]
    fn test_break_start_too_early_rejected() {
        let shift = shift();
        let settings = EngineSettings::default();
        let mut rec = record();
        rec.start_time = Some(time("08:55:00"));
        let action = next_action(&ctx(&shift, "11:50:00", Some(&rec), &[], &settings));
        expect_none(action, "break has not started yet");
    }

    /// AR-007: break start accepted inside the early grace
    #[test]
    fn test_break_start_within_grace() {
        let shift = shift();
        let settings = EngineSettings::default();
        let mut rec = record();
        rec.start_time = Some(time("08:55:00"));
        let action = next_action(&ctx(&shift, "11:56:00", Some(&rec), &[], &settings));
        expect_write(action, PunchSlot::BreakIn, WriteMode::Update);
    }

    /// AR-008: break end is never gated
    #[test]
    fn test_break_end_ungated() {
        let shift = shift();
        let settings = EngineSettings::default();
        let mut rec = record();
        rec.start_time = Some(time("08:55:00"));
        rec.break_start_time = Some(time("12:00:00"));
        let action = next_action(&ctx(&shift, "12:10:00", Some(&rec), &[], &settings));
        expect_write(action, PunchSlot::BreakOut, WriteMode::Update);
    }

    /// AR-009: clock-out hard-gated before scheduled end
    #[test]
    fn test_clock_out_before_end_rejected() {
        let shift = shift();
        let settings = EngineSettings::default();
        let mut rec = record();
        rec.start_time = Some(time("08:55:00"));
        rec.break_start_time = Some(time("12:00:00"));
        rec.break_end_time = Some(time("13:00:00"));
        let action = next_action(&ctx(&shift, "17:59:00", Some(&rec), &[], &settings));
        expect_none(action, "shift end not reached");
    }

    /// AR-010: clock-out allowed at exactly the scheduled end
    #[test]
    fn test_clock_out_at_end_allowed() {
        let shift = shift();
        let settings = EngineSettings::default();
        let mut rec = record();
        rec.start_time = Some(time("08:55:00"));
        rec.break_start_time = Some(time("12:00:00"));
        rec.break_end_time = Some(time("13:00:00"));
        let action = next_action(&ctx(&shift, "18:00:00", Some(&rec), &[], &settings));
        expect_write(action, PunchSlot::WorkOut, WriteMode::Update);
    }

    /// AR-011: unobserved break goes straight from start to end gate
    #[test]
    fn test_unobserved_break_skipped() {
        let mut shift = shift();
        shift.is_break_observed = false;
        let settings = EngineSettings::default();
        let mut rec = record();
        rec.start_time = Some(time("08:55:00"));
        let action = next_action(&ctx(&shift, "12:30:00", Some(&rec), &[], &settings));
        expect_none(action, "shift end not reached");
    }

    /// AR-012: OT start denied without authorization
    #[test]
    fn test_ot_denied_without_authorization() {
        let shift = shift();
        let settings = EngineSettings::default();
        let mut rec = record();
        rec.start_time = Some(time("08:55:00"));
        rec.break_start_time = Some(time("12:00:00"));
        rec.break_end_time = Some(time("13:00:00"));
        rec.end_time = Some(time("18:00:00"));
        let action = next_action(&ctx(&shift, "18:30:00", Some(&rec), &[], &settings));
        expect_none(action, "OT permission denied");
    }

    /// AR-013: OT start written when a window authorizes it
    #[test]
    fn test_ot_start_with_authorization() {
        let shift = shift();
        let settings = EngineSettings::default();
        let auth = vec![OvertimeAuthorization {
            id: 1,
            company_id: 10,
            employee_scope: IdScope::All,
            ot_start: time("18:00:00"),
            ot_end: time("21:00:00"),
        }];
        let mut rec = record();
        rec.start_time = Some(time("08:55:00"));
        rec.break_start_time = Some(time("12:00:00"));
        rec.break_end_time = Some(time("13:00:00"));
        rec.end_time = Some(time("18:00:00"));
        let action = next_action(&ctx(&shift, "18:30:00", Some(&rec), &auth, &settings));
        expect_write(action, PunchSlot::OtIn, WriteMode::Update);
    }

    /// AR-014: OT end needs no gate, then everything is filled
    #[test]
    fn test_ot_end_then_all_filled() {
        let shift = shift();
        let settings = EngineSettings::default();
        let mut rec = record();
        rec.start_time = Some(time("08:55:00"));
        rec.break_start_time = Some(time("12:00:00"));
        rec.break_end_time = Some(time("13:00:00"));
        rec.end_time = Some(time("18:00:00"));
        rec.ot_start_time = Some(time("18:30:00"));
        let action = next_action(&ctx(&shift, "20:00:00", Some(&rec), &[], &settings));
        expect_write(action, PunchSlot::OtOut, WriteMode::Update);

        rec.ot_end_time = Some(time("20:00:00"));
        let action = next_action(&ctx(&shift, "20:30:00", Some(&rec), &[], &settings));
        expect_none(action, "all slots filled");
    }

    /// AR-015: midnight-crossing OT window rejected with a clear reason
    #[test]
    fn test_ot_crossing_window_rejected() {
        let shift = shift();
        let settings = EngineSettings::default();
        let auth = vec![OvertimeAuthorization {
            id: 1,
            company_id: 10,
            employee_scope: IdScope::All,
            ot_start: time("22:00:00"),
            ot_end: time("02:00:00"),
        }];
        let mut rec = record();
        rec.start_time = Some(time("08:55:00"));
        rec.break_start_time = Some(time("12:00:00"));
        rec.break_end_time = Some(time("13:00:00"));
        rec.end_time = Some(time("18:00:00"));
        let action = next_action(&ctx(&shift, "23:00:00", Some(&rec), &auth, &settings));
        expect_none(action, "crossing midnight");
    }

    /// AR-016: free time opens with a start then keeps rewriting the end
    #[test]
    fn test_free_time_overwrite_semantics() {
        let mut shift = shift();
        shift.is_free_time = true;
        let settings = EngineSettings::default();

        let action = next_action(&ctx(&shift, "10:00:00", None, &[], &settings));
        expect_write(action, PunchSlot::WorkIn, WriteMode::Insert);

        let mut rec = record();
        rec.start_time = Some(time("10:00:00"));
        let action = next_action(&ctx(&shift, "15:00:00", Some(&rec), &[], &settings));
        expect_write(action, PunchSlot::WorkOut, WriteMode::Update);

        // A repeated close overwrites the previous end.
        rec.end_time = Some(time("15:00:00"));
        let action = next_action(&ctx(&shift, "16:00:00", Some(&rec), &[], &settings));
        expect_write(action, PunchSlot::WorkOut, WriteMode::Update);
    }

    /// AR-017: night shift evening triggers do not reach the end slot
    #[test]
    fn test_night_shift_evening_gated() {
        let mut shift = shift();
        shift.start_time = Some(time("22:00:00"));
        shift.end_time = Some(time("06:00:00"));
        shift.break_start_time = None;
        shift.break_end_time = None;
        shift.is_break_observed = false;
        let settings = EngineSettings::default();

        // No record yet at 22:30: this is a clock-in, not a late
        // clock-out.
        let action = next_action(&ctx(&shift, "22:30:00", None, &[], &settings));
        expect_write(action, PunchSlot::WorkIn, WriteMode::Insert);

        // Started, still before midnight: the end gate holds.
        let mut rec = record();
        rec.start_time = Some(time("22:01:00"));
        let action = next_action(&ctx(&shift, "23:30:00", Some(&rec), &[], &settings));
        expect_none(action, "shift end not reached");

        // Early morning, still before the scheduled end.
        let action = next_action(&ctx(&shift, "02:00:00", Some(&rec), &[], &settings));
        expect_none(action, "shift end not reached");

        // At the scheduled end the clock-out writes.
        let action = next_action(&ctx(&shift, "06:00:00", Some(&rec), &[], &settings));
        expect_write(action, PunchSlot::WorkOut, WriteMode::Update);
    }

    /// AR-018: no non-free write ever targets an already-filled slot
    #[test]
    fn test_never_rewrites_filled_slot() {
        let shift = shift();
        let settings = EngineSettings::default();
        let auth = vec![OvertimeAuthorization {
            id: 1,
            company_id: 10,
            employee_scope: IdScope::All,
            ot_start: time("00:00:00"),
            ot_end: time("23:59:59"),
        }];
        let mut rec = record();
        for probe in ["09:00:00", "12:00:00", "13:00:00", "18:00:00", "19:00:00", "21:00:00"] {
            let action = next_action(&ctx(&shift, probe, Some(&rec), &auth, &settings));
            if let PunchAction::Write { slot, .. } = action {
                assert!(rec.slot(slot).is_none(), "slot {:?} already filled", slot);
                rec.set_slot(slot, time(probe));
            }
        }
    }
}
