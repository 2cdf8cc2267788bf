//! Clock abstraction
//!
//! Time-dependent logic (claim-number prefixes, cache expiry, token
//! lifetimes) reads the current instant through the `Clock` trait instead of
//! calling `Utc::now()` directly, so tests can drive time explicitly.

use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// A source of the current instant
pub trait Clock: Send + Sync {
    /// Returns the current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock whose instant is set explicitly
///
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use core_kernel::{Clock, ManualClock};
///
/// let start = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
/// let clock = ManualClock::new(start);
/// clock.advance(Duration::minutes(5));
/// assert_eq!(clock.now(), start + Duration::minutes(5));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    instant: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock frozen at the given instant
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Moves the clock forward
    pub fn advance(&self, delta: chrono::Duration) {
        let mut instant = self.instant.lock().expect("clock lock poisoned");
        *instant = *instant + delta;
    }

    /// Replaces the current instant
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.instant.lock().expect("clock lock poisoned") = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.lock().expect("clock lock poisoned")
    }
}
