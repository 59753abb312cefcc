//! Scope parsing for string-encoded membership lists.
//!
//! Shift and overtime rows carry their employee and day scopes as loosely
//! delimited strings authored upstream (`"[1,2,3]"`, `"1, 2, 3"`,
//! `"\"4\",\"7\""`, or the literal `all`). These are parsed once per load
//! into explicit sets. A malformed entry is dropped and a fully malformed
//! list becomes an empty scope: one corrupt row must never block every
//! other employee.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Characters stripped before splitting a scope list.
const STRIP_CHARS: &[char] = &['[', ']', '"', '\\'];

/// The set of employees a schedule row applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdScope {
    /// The row applies to every employee of the company.
    All,
    /// The row applies to this explicit set of employee ids.
    Ids(HashSet<i64>),
}

impl IdScope {
    /// Parses a scope from its stored string form.
    ///
    /// `None`, an empty string, and unparseable content all yield an empty
    /// id set. The literal `"all"` (case-insensitive) yields [`IdScope::All`].
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::IdScope;
    ///
    /// let scope = IdScope::parse(Some("[\"4\", \"7\"]"));
    /// assert!(scope.contains(4));
    /// assert!(scope.contains(7));
    /// assert!(!scope.contains(5));
    ///
    /// assert!(IdScope::parse(Some("all")).contains(999));
    /// assert!(!IdScope::parse(Some("not a list")).contains(1));
    /// ```
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return IdScope::Ids(HashSet::new());
        };
        let cleaned = clean(raw);
        if cleaned.eq_ignore_ascii_case("all") {
            return IdScope::All;
        }
        let ids = cleaned
            .split(',')
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .collect();
        IdScope::Ids(ids)
    }

    /// Returns whether the scope contains the given employee id.
    pub fn contains(&self, employee_id: i64) -> bool {
        match self {
            IdScope::All => true,
            IdScope::Ids(ids) => ids.contains(&employee_id),
        }
    }

    /// Returns whether the scope matches nobody at all.
    pub fn is_empty(&self) -> bool {
        match self {
            IdScope::All => false,
            IdScope::Ids(ids) => ids.is_empty(),
        }
    }
}

/// A set of day numbers: day-of-month (1-31) for specific-date rows or
/// ISO weekday (Mon=1..Sun=7) for weekly-pattern rows. Which meaning
/// applies is decided by the owning row's shape, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayScope(HashSet<u32>);

impl DayScope {
    /// Parses a day scope from its stored string form.
    ///
    /// Returns `None` when the input is absent or contains no parseable
    /// numbers, so an unpopulated day scope reads the same as a missing
    /// column.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::DayScope;
    ///
    /// let scope = DayScope::parse(Some("[1,2,3,4,5]")).unwrap();
    /// assert!(scope.contains(3));
    /// assert!(!scope.contains(6));
    /// assert!(DayScope::parse(Some("garbage")).is_none());
    /// ```
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        let days: HashSet<u32> = clean(raw)
            .split(',')
            .filter_map(|part| part.trim().parse::<u32>().ok())
            .collect();
        if days.is_empty() { None } else { Some(DayScope(days)) }
    }

    /// Returns whether the scope contains the given day number.
    pub fn contains(&self, day: u32) -> bool {
        self.0.contains(&day)
    }
}

fn clean(raw: &str) -> String {
    raw.chars().filter(|c| !STRIP_CHARS.contains(c)).collect::<String>().trim().to_string()
}
