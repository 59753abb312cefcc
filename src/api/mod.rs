//! HTTP API module for the attendance engine.
//!
//! A thin stateless surface: every request carries the already-fetched
//! data the engine needs (persistence stays with the caller), and the
//! response is the engine's decision. Only the debounce and beacon
//! stores live in process state.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BeaconRequest, PunchRequest, ReportRequest, ScanRequest, TriggerKind};
pub use response::{ApiError, PunchOutcome, PunchResponse, ScanResponse};
pub use state::AppState;
