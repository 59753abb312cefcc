//! Settings types for the attendance engine.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Tunable engine settings.
///
/// Every field has a compiled-in default so the engine runs without a
/// settings file; a YAML file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Seconds during which a repeated (employee, action) write is
    /// suppressed as a duplicate trigger.
    pub debounce_window_secs: u64,
    /// Minutes a beacon sighting stays fresh for manual triggers.
    pub beacon_ttl_minutes: i64,
    /// Minutes before the scheduled break start during which an early
    /// break punch is still accepted.
    pub break_early_grace_minutes: i64,
    /// Minutes past a scheduled time before the scanner flags today's
    /// slot as missing.
    pub scan_grace_minutes: i64,
    /// Queries earlier than this clock time may fall through to the
    /// previous day's midnight-crossing shift.
    pub night_shift_cutoff: NaiveTime,
    /// Length of the reconciliation scan window, in days.
    pub scan_window_days: i64,
    /// Batched report reads are attempted up to this many times on a
    /// lock conflict.
    pub read_retry_attempts: u32,
    /// Base backoff between read retries; attempt `n` waits `n` times
    /// this long.
    pub read_retry_backoff_ms: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            debounce_window_secs: 60,
            beacon_ttl_minutes: 10,
            break_early_grace_minutes: 5,
            scan_grace_minutes: 5,
            night_shift_cutoff: NaiveTime::from_hms_opt(6, 0, 0)
                .expect("valid cutoff time"),
            scan_window_days: 30,
            read_retry_attempts: 3,
            read_retry_backoff_ms: 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_rules() {
        let settings = EngineSettings::default();
        assert_eq!(settings.debounce_window_secs, 60);
        assert_eq!(settings.beacon_ttl_minutes, 10);
        assert_eq!(settings.break_early_grace_minutes, 5);
        assert_eq!(settings.scan_grace_minutes, 5);
        assert_eq!(settings.scan_window_days, 30);
        assert_eq!(settings.read_retry_attempts, 3);
        assert_eq!(
            settings.night_shift_cutoff,
            NaiveTime::from_hms_opt(6, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_partial_yaml_overrides_only_named_fields() {
        let settings: EngineSettings =
            serde_yaml::from_str("debounce_window_secs: 120\n").unwrap();
        assert_eq!(settings.debounce_window_secs, 120);
        assert_eq!(settings.beacon_ttl_minutes, 10);
    }
}
