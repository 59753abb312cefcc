//! Engine settings and loading.
//!
//! Settings are optional: [`EngineSettings::default`] encodes the rules
//! the engine ships with (60 s debounce, 5-minute graces, 06:00 night
//! cutoff, 30-day scan window), and a YAML file may override individual
//! fields.

mod loader;
mod types;

pub use types::EngineSettings;
