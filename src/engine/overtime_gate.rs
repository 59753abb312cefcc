//! Overtime authorization checks.
//!
//! Overtime is opt-in per company: an employee may only open an OT slot
//! while the clock sits inside an authorization window that names them.
//! Scope parsing is shared with shift resolution, so a corrupt row is a
//! non-match here too.

use chrono::NaiveTime;
use tracing::warn;

use crate::models::OvertimeAuthorization;

/// Outcome of an overtime authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvertimeDecision {
    /// The clock is inside an authorized window.
    Authorized,
    /// No window covers the employee right now.
    Denied,
    /// The only matching windows cross midnight, which the engine does
    /// not support; the caller should reject with a clear reason rather
    /// than guess.
    UnsupportedWindow,
}

/// Checks whether an employee is authorized for overtime at `clock`.
///
/// The window test is inclusive on both ends and same-day only. A
/// matching row whose window crosses midnight never authorizes; if such
/// rows are the employee's only coverage the decision is
/// [`OvertimeDecision::UnsupportedWindow`].
///
/// # Example
///
/// ```
/// use attendance_engine::engine::overtime_gate::{authorize, OvertimeDecision};
/// use attendance_engine::models::{IdScope, OvertimeAuthorization};
/// use chrono::NaiveTime;
///
/// let rows = vec![OvertimeAuthorization {
///     id: 1,
///     company_id: 1,
///     employee_scope: IdScope::All,
///     ot_start: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     ot_end: NaiveTime::from_hms_opt(21, 0, 0).unwrap(),
/// }];
///
/// let at_19 = NaiveTime::from_hms_opt(19, 0, 0).unwrap();
/// assert_eq!(authorize(7, &rows, at_19), OvertimeDecision::Authorized);
///
/// let at_22 = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
/// assert_eq!(authorize(7, &rows, at_22), OvertimeDecision::Denied);
/// ```
pub fn authorize(
    employee_id: i64,
    rows: &[OvertimeAuthorization],
    clock: NaiveTime,
) -> OvertimeDecision {
    let mut saw_crossing = false;

    for row in rows {
        if !row.employee_scope.contains(employee_id) {
            continue;
        }
        if row.crosses_midnight() {
            warn!(
                employee_id,
                row_id = row.id,
                "overtime window crosses midnight; not supported"
            );
            saw_crossing = true;
            continue;
        }
        if clock >= row.ot_start && clock <= row.ot_end {
            return OvertimeDecision::Authorized;
        }
    }

    if saw_crossing {
        OvertimeDecision::UnsupportedWindow
    } else {
        OvertimeDecision::Denied
    }
}
