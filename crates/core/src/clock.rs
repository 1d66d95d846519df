// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time abstraction so state transitions and invocation timing are testable
//! without sleeping in real time.

use chrono::{DateTime, Utc};

/// Abstracts wall-clock time so tests can advance it deterministically.
pub trait Clock: Clone + Send + Sync + 'static {
    /// Current time as an ISO-8601 UTC timestamp.
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current time as milliseconds since the Unix epoch.
    fn epoch_ms(&self) -> u64 {
        self.now_utc().timestamp_millis().max(0) as u64
    }
}

/// Real system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use chrono::{DateTime, Utc};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Deterministic clock for tests: starts at a fixed instant and only
    /// moves forward when explicitly told to.
    #[derive(Clone)]
    pub struct FakeClock {
        now: Arc<Mutex<DateTime<Utc>>>,
    }

    impl FakeClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                now: Arc::new(Mutex::new(start)),
            }
        }

        pub fn advance(&self, delta: chrono::Duration) {
            let mut guard = self.now.lock();
            *guard += delta;
        }

        pub fn set(&self, at: DateTime<Utc>) {
            *self.now.lock() = at;
        }
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self::new(DateTime::from_timestamp(0, 0).unwrap_or_else(Utc::now))
        }
    }

    impl Clock for FakeClock {
        fn now_utc(&self) -> DateTime<Utc> {
            *self.now.lock()
        }
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
