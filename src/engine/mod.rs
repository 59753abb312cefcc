//! Core reconciliation logic for the attendance engine.
//!
//! This module contains the temporal reasoning: shift resolution against
//! the loosely-encoded schedule, the punch action state machine, the
//! overtime authorization gate, duplicate-trigger debouncing and beacon
//! presence, day status classification for scan and report modes, the
//! rolling reconciliation scanner, pay-cycle aggregation, and approved
//! correction application.

pub mod action_resolver;
pub mod aggregator;
pub mod correction;
pub mod day_status;
pub mod debounce;
pub mod overtime_gate;
pub mod scanner;
pub mod shift_resolver;

pub use action_resolver::{PunchAction, TriggerContext, next_action};
pub use aggregator::{
    CycleBounds, MonthlyReport, ReportTotals, aggregate, cycle_bounds, with_read_retry,
};
pub use correction::apply_correction;
pub use day_status::{DayContext, classify, scan_day};
pub use debounce::{BeaconCache, BeaconSighting, DebounceGuard};
pub use overtime_gate::{OvertimeDecision, authorize};
pub use scanner::scan_window;
pub use shift_resolver::{ResolvedShift, resolve, resolve_for_date};
