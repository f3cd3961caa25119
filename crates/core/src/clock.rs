//! Clock abstraction so deadline logic is testable.

use std::sync::Mutex;
use crate::Time;

/// Source of the current time.
///
/// Every component that computes a deadline or timestamp takes a clock
/// instead of calling `Utc::now()` directly, so tests can drive time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Time;
}

/// Wall clock used in production.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Time {
        chrono::Utc::now()
    }
}

/// Manually advanced clock for tests.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Time>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: Time) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, to: Time) {
        *self.now.lock().unwrap() = to;
    }

    /// Move the clock forward.
    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Time {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let start = chrono::Utc::now();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        clock.advance(chrono::Duration::hours(3));
        assert_eq!(clock.now(), start + chrono::Duration::hours(3));
    }

    #[test]
    fn manual_clock_jumps_to_absolute_instant() {
        let start = chrono::Utc::now();
        let clock = ManualClock::new(start);
        clock.advance(chrono::Duration::hours(3));

        let target = start + chrono::Duration::days(2);
        clock.set(target);
        assert_eq!(clock.now(), target);
    }
}
