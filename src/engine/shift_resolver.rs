//! Shift resolution: picking the applicable definition for a date.
//!
//! Every call site (punch trigger, scanner, monthly report) resolves the
//! schedule through this module so the ambiguous row encoding is read
//! exactly one way. Priority is by shape, not input position: a
//! specific-date row always outranks a weekly pattern, which always
//! outranks a default row, regardless of how the rows were ordered by the
//! data source. Ties within one shape keep the supplied order.

use chrono::{Datelike, NaiveDate, NaiveTime};
use tracing::debug;

use crate::models::{ShiftDefinition, ShiftShape};

/// A resolved shift together with the date that owns it.
///
/// The owning date differs from the queried date only for night-shift
/// lookback: a 02:00 query that falls through to yesterday's
/// midnight-crossing shift is bookkept under yesterday.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedShift<'a> {
    /// The matched schedule row.
    pub definition: &'a ShiftDefinition,
    /// The work-day the match belongs to.
    pub owning_date: NaiveDate,
}

/// Resolves the shift definition for an employee on a date.
///
/// Rows whose employee scope does not contain the employee, or whose
/// scope failed to parse, are skipped silently. If nothing matches and
/// the query time is before the night cutoff, the previous day is retried
/// restricted to midnight-crossing rows.
///
/// # Example
///
/// ```
/// use attendance_engine::engine::shift_resolver::resolve;
/// use attendance_engine::models::{DayScope, IdScope, ShiftDefinition};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let weekday_row = ShiftDefinition {
///     id: 1,
///     company_id: 1,
///     employee_scope: IdScope::All,
///     month: None,
///     day_scope: DayScope::parse(Some("[1,2,3,4,5]")),
///     start_time: NaiveTime::from_hms_opt(9, 0, 0),
///     end_time: NaiveTime::from_hms_opt(18, 0, 0),
///     break_start_time: None,
///     break_end_time: None,
///     ot_start_time: None,
///     ot_end_time: None,
///     is_break_observed: false,
///     is_free_time: false,
/// };
///
/// // 2026-03-02 is a Monday
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
/// let cutoff = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
/// let resolved = resolve(7, std::slice::from_ref(&weekday_row), date, noon, cutoff).unwrap();
/// assert_eq!(resolved.owning_date, date);
/// ```
pub fn resolve<'a>(
    employee_id: i64,
    definitions: &'a [ShiftDefinition],
    date: NaiveDate,
    query_time: NaiveTime,
    night_cutoff: NaiveTime,
) -> Option<ResolvedShift<'a>> {
    if let Some(definition) = resolve_for_date(employee_id, definitions, date) {
        return Some(ResolvedShift {
            definition,
            owning_date: date,
        });
    }

    // Night-shift lookback: an early-morning query may belong to
    // yesterday's shift that runs past midnight.
    if query_time < night_cutoff {
        let yesterday = date.pred_opt()?;
        let night_rows: Vec<&ShiftDefinition> = definitions
            .iter()
            .filter(|d| d.crosses_midnight())
            .collect();
        if let Some(definition) = resolve_among(employee_id, &night_rows, yesterday) {
            debug!(
                employee_id,
                %yesterday,
                shift_id = definition.id,
                "resolved night shift under previous day"
            );
            return Some(ResolvedShift {
                definition,
                owning_date: yesterday,
            });
        }
    }

    None
}

/// Resolves the shift definition for a date with no night-shift lookback.
///
/// This is the form the classifier uses: report and scan passes reason
/// about whole days, so early-morning fallthrough does not apply.
pub fn resolve_for_date<'a>(
    employee_id: i64,
    definitions: &'a [ShiftDefinition],
    date: NaiveDate,
) -> Option<&'a ShiftDefinition> {
    let refs: Vec<&ShiftDefinition> = definitions.iter().collect();
    resolve_among(employee_id, &refs, date)
}

fn resolve_among<'a>(
    employee_id: i64,
    definitions: &[&'a ShiftDefinition],
    date: NaiveDate,
) -> Option<&'a ShiftDefinition> {
    for shape in [
        ShiftShape::SpecificDate,
        ShiftShape::WeeklyPattern,
        ShiftShape::Default,
    ] {
        for definition in definitions {
            if definition.shape() != shape {
                continue;
            }
            if !definition.employee_scope.contains(employee_id) {
                continue;
            }
            if matches_date(definition, date) {
                return Some(definition);
            }
        }
    }
    None
}

fn matches_date(definition: &ShiftDefinition, date: NaiveDate) -> bool {
    match definition.shape() {
        ShiftShape::SpecificDate => {
            definition.month == Some(date.month())
                && definition
                    .day_scope
                    .as_ref()
                    .is_some_and(|days| days.contains(date.day()))
        }
        ShiftShape::WeeklyPattern => definition
            .day_scope
            .as_ref()
            .is_some_and(|days| days.contains(date.weekday().number_from_monday())),
        ShiftShape::Default => true,
    }
}
