//! Process-local suppression stores: debounce and beacon presence.
//!
//! Both stores are best-effort and tolerant of loss on restart: a missed
//! debounce risks one duplicate write, which is idempotent at the field
//! level. They are constructed into application state and injected, so
//! the pure engine functions never touch hidden process-wide lifecycle.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Suppresses duplicate writes from rapid re-triggers.
///
/// A write for the same (employee, action label) pair recorded less than
/// the window ago is suppressed. The map is bounded by active-employee
/// cardinality; [`DebounceGuard::sweep`] evicts stale entries when a
/// caller wants to reclaim memory.
#[derive(Debug)]
pub struct DebounceGuard {
    window: Duration,
    entries: Mutex<HashMap<(i64, String), Instant>>,
}

impl DebounceGuard {
    /// Creates a guard with the given suppression window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Records an action and reports whether it was a duplicate.
    ///
    /// Returns `true` when the same (employee, action) pair was recorded
    /// within the window; the caller then skips the write and reports the
    /// trigger as debounced rather than dropping it silently. A
    /// non-suppressed call records the new timestamp.
    pub fn check_and_record(&self, employee_id: i64, action_label: &str) -> bool {
        self.check_and_record_at(employee_id, action_label, Instant::now())
    }

    fn check_and_record_at(&self, employee_id: i64, action_label: &str, now: Instant) -> bool {
        let key = (employee_id, action_label.to_string());
        let mut entries = self.entries.lock().expect("debounce map poisoned");
        if let Some(last) = entries.get(&key) {
            if now.duration_since(*last) < self.window {
                return true;
            }
        }
        entries.insert(key, now);
        false
    }

    /// Evicts entries older than the suppression window.
    pub fn sweep(&self) {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("debounce map poisoned");
        entries.retain(|_, last| now.duration_since(*last) < self.window);
    }

    /// Number of live entries, for diagnostics.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("debounce map poisoned").len()
    }

    /// Whether the guard holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The last beacon sighting recorded for an employee.
#[derive(Debug, Clone)]
pub struct BeaconSighting {
    /// Hardware id of the beacon that was seen.
    pub hardware_id: String,
    seen_at: Instant,
}

/// Last-seen beacon cache backing manual triggers.
///
/// A manual check-in from the menu is only honored while a beacon
/// sighting for the employee is still fresh; otherwise the employee is
/// not physically present and the trigger is rejected upstream.
#[derive(Debug)]
pub struct BeaconCache {
    ttl: Duration,
    sightings: Mutex<HashMap<i64, BeaconSighting>>,
}

impl BeaconCache {
    /// Creates a cache with the given sighting time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sightings: Mutex::new(HashMap::new()),
        }
    }

    /// Records a sighting, replacing any previous one for the employee.
    pub fn record(&self, employee_id: i64, hardware_id: impl Into<String>) {
        let mut sightings = self.sightings.lock().expect("beacon map poisoned");
        sightings.insert(
            employee_id,
            BeaconSighting {
                hardware_id: hardware_id.into(),
                seen_at: Instant::now(),
            },
        );
    }

    /// Returns the fresh sighting for an employee, evicting it if stale.
    pub fn fresh(&self, employee_id: i64) -> Option<BeaconSighting> {
        self.fresh_at(employee_id, Instant::now())
    }

    fn fresh_at(&self, employee_id: i64, now: Instant) -> Option<BeaconSighting> {
        let mut sightings = self.sightings.lock().expect("beacon map poisoned");
        match sightings.get(&employee_id) {
            Some(sighting) if now.duration_since(sighting.seen_at) <= self.ttl => {
                Some(sighting.clone())
            }
            Some(_) => {
                sightings.remove(&employee_id);
                None
            }
            None => None,
        }
    }

    /// Whether any sighting (fresh or stale) exists for the employee.
    ///
    /// Used to detect a new presence session: a proactive prompt is only
    /// sent when the employee just walked in, not on every heartbeat.
    pub fn has_session(&self, employee_id: i64) -> bool {
        self.sightings
            .lock()
            .expect("beacon map poisoned")
            .contains_key(&employee_id)
    }
}
