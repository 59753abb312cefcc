//! Attendance reconciliation engine for beacon-based time tracking.
//!
//! This crate decides which timestamp slot a clock trigger should fill,
//! scans recent history for missing punches, and classifies every day of
//! a pay cycle for payroll-style reporting. All call sites share one
//! shift-resolution and one day-classification core.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
