//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::EngineSettings;
use crate::engine::{BeaconCache, DebounceGuard};

/// Shared application state.
///
/// Carries the engine settings plus the two process-local stores the
/// punch flow relies on: the duplicate-trigger debounce map and the
/// last-seen beacon cache.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<EngineSettings>,
    debounce: Arc<DebounceGuard>,
    beacons: Arc<BeaconCache>,
}

impl AppState {
    /// Creates application state from the given settings.
    pub fn new(settings: EngineSettings) -> Self {
        let debounce = DebounceGuard::new(Duration::from_secs(settings.debounce_window_secs));
        let beacons = BeaconCache::new(Duration::from_secs(
            settings.beacon_ttl_minutes.max(0) as u64 * 60,
        ));
        Self {
            settings: Arc::new(settings),
            debounce: Arc::new(debounce),
            beacons: Arc::new(beacons),
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the debounce guard.
    pub fn debounce(&self) -> &DebounceGuard {
        &self.debounce
    }

    /// Returns the beacon sighting cache.
    pub fn beacons(&self) -> &BeaconCache {
        &self.beacons
    }
}
