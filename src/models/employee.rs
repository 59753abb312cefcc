//! Employee profile model.

use std::collections::HashSet;

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Default pay-cycle cutoff day-of-month when a company never set one.
pub const DEFAULT_CYCLE_CUTOFF_DAY: u32 = 25;

/// The engine's view of one employee.
///
/// Carries only what the temporal reasoning needs: employment bounds for
/// scan exclusions, the configured weekly day-off set, and the company's
/// pay-cycle cutoff day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: i64,
    /// The company the employee belongs to.
    pub company_id: i64,
    /// Display name.
    pub name: String,
    /// First day of employment; earlier days are excluded from scans.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of employment; later days are excluded from scans.
    #[serde(default)]
    pub resign_date: Option<NaiveDate>,
    /// Configured weekly days off.
    #[serde(default)]
    pub day_off: HashSet<Weekday>,
    /// Day-of-month on which the company's pay cycle ends.
    #[serde(default = "default_cutoff")]
    pub cycle_cutoff_day: u32,
}

fn default_cutoff() -> u32 {
    DEFAULT_CYCLE_CUTOFF_DAY
}

impl EmployeeProfile {
    /// Whether the given date falls inside the employment period.
    pub fn is_employed_on(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(resign) = self.resign_date {
            if date > resign {
                return false;
            }
        }
        true
    }

    /// Whether the given date is one of the employee's weekly days off.
    pub fn is_weekly_day_off(&self, date: NaiveDate) -> bool {
        use chrono::Datelike;
        self.day_off.contains(&date.weekday())
    }
}
