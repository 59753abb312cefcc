//! The reconciliation scanner.
//!
//! Walks a rolling window of recent days and collects every missing or
//! pending punch slot, newest first, so the most actionable gaps surface
//! at the top of whatever list the caller renders.

use tracing::info;

use crate::models::SlotFinding;

use super::day_status::{self, DayContext};

/// Scans the rolling window ending on `ctx.today` for slot findings.
///
/// The window length comes from settings (30 days by default). Days are
/// visited newest first and each day's findings keep their slot order,
/// so the output is fully ordered without a sort.
///
/// # Example
///
/// ```no_run
/// use attendance_engine::engine::scanner::scan_window;
/// # use attendance_engine::engine::day_status::DayContext;
/// # fn demo(ctx: &DayContext<'_>) {
/// let findings = scan_window(ctx);
/// for finding in &findings {
///     println!("{} {} is {:?}", finding.date, finding.slot_type, finding.status);
/// }
/// # }
/// ```
pub fn scan_window(ctx: &DayContext<'_>) -> Vec<SlotFinding> {
    let mut findings = Vec::new();
    let mut date = ctx.today;

    for _ in 0..ctx.settings.scan_window_days {
        findings.extend(day_status::scan_day(date, ctx));
        match date.pred_opt() {
            Some(previous) => date = previous,
            None => break,
        }
    }

    info!(
        employee_id = ctx.employee.id,
        window_days = ctx.settings.scan_window_days,
        findings = findings.len(),
        "reconciliation scan complete"
    );
    findings
}
