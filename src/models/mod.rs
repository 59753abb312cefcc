//! Core data models for the attendance engine.
//!
//! This module contains all the domain models used throughout the engine.

mod classification;
mod correction;
mod day_event;
mod employee;
mod punch;
mod scope;
mod shift_definition;

pub use classification::{DayCategory, DayClassification, SlotFinding, SlotStatus};
pub use correction::{CorrectionRequest, CorrectionStatus};
pub use day_event::{ExternalDayEvent, LeaveSpan, PublicHoliday, ShiftSwap};
pub use employee::{DEFAULT_CYCLE_CUTOFF_DAY, EmployeeProfile};
pub use punch::{PunchRecord, PunchSlot, WriteMode};
pub use scope::{DayScope, IdScope};
pub use shift_definition::{OvertimeAuthorization, ShiftDefinition, ShiftShape};
