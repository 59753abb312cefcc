//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Domain conditions that are part of normal operation (no shift assigned,
//! an overtime window that is closed) are variants here rather than panics,
//! so every caller handles them the same way.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the attendance engine.
///
/// Malformed scope encodings in shift or overtime rows are deliberately
/// *not* represented here: a corrupt row is treated as "no match" so that
/// one bad row cannot block every other employee.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
/// use chrono::NaiveDate;
///
/// let error = EngineError::ShiftNotFound {
///     employee_id: 42,
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "No shift assigned for employee 42 on 2026-03-02"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No shift definition resolved for the employee and date.
    ///
    /// Non-fatal: surfaced as "no shift assigned" and never auto-retried.
    #[error("No shift assigned for employee {employee_id} on {date}")]
    ShiftNotFound {
        /// The employee the lookup was for.
        employee_id: i64,
        /// The date the lookup was for.
        date: NaiveDate,
    },

    /// The employee is not allowed to perform this action.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// A description of the mismatch.
        message: String,
    },

    /// The overtime window is closed for this employee right now.
    #[error("Overtime permission denied for employee {employee_id}")]
    OvertimePermissionDenied {
        /// The employee the check was for.
        employee_id: i64,
    },

    /// A manual trigger arrived with no fresh beacon sighting on record.
    #[error("Beacon sighting expired or not found for employee {employee_id}")]
    BeaconExpired {
        /// The employee the trigger was for.
        employee_id: i64,
    },

    /// An upstream data read failed. Propagated to the caller, which owns
    /// retry policy.
    #[error("Data source error: {message}")]
    DataSource {
        /// A description of the failure.
        message: String,
    },

    /// A batched read hit a lock conflict. The aggregator retries this
    /// variant with linear backoff; everything else propagates as-is.
    #[error("Lock conflict while reading report data")]
    LockConflict,

    /// Settings file was not found at the specified path.
    #[error("Settings file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Settings file could not be parsed.
    #[error("Failed to parse settings file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
