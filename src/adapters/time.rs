//! Monotonic clock adapter.
//!
//! Wraps `std::time::Instant` for the poll loop.  Uptime is measured from
//! the moment the adapter is created, which is also the debounce reference
//! for switches that are already held at startup.

use core::time::Duration;
use std::time::Instant;

use crate::app::ports::ClockPort;

pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for MonotonicClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
