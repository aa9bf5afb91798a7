//! Clock capability
//!
//! Time-dependent rules (past-date checks, check-in gates, pending
//! expiration) read the current instant through this trait so tests
//! can simulate arbitrary instants deterministically.

use std::sync::Mutex;

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Supplies the current instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date (UTC).
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap() = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new("2025-06-01T10:00:00Z".parse().unwrap());
        assert_eq!(clock.today(), "2025-06-01".parse::<NaiveDate>().unwrap());

        clock.advance(Duration::hours(15));
        assert_eq!(clock.today(), "2025-06-02".parse::<NaiveDate>().unwrap());
    }
}
