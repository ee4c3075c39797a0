// tests/support/mocks/time.rs
use campus_core::application::ports::time::Clock;
use chrono::{DateTime, Duration, Utc};
use once_cell::sync::Lazy;
use std::sync::Mutex;

static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339("2026-02-04T09:30:00Z")
        .expect("invalid RFC3339 in tests/support/mocks/time.rs")
        .with_timezone(&Utc)
});

/// Deterministic start time for every test clock.
pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

/// Clock that only moves when a test advances it.
#[derive(Debug)]
pub struct TestClock {
    now: Mutex<DateTime<Utc>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(fixed_now()),
        }
    }

    pub fn advance(&self, seconds: i64) {
        let mut now = self.now.lock().expect("clock mutex poisoned");
        *now += Duration::seconds(seconds);
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock mutex poisoned")
    }
}
