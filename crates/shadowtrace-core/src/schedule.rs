//! Fixed-cadence tick scheduling for the animation loop.

use std::time::{Duration, Instant};

/// Deadline-based periodic schedule.
///
/// The event loop sleeps until [`TickSchedule::next_due`] and then calls
/// [`TickSchedule::poll`]. Missed periods are coalesced into a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    interval: Duration,
    next_due: Instant,
}

impl TickSchedule {
    /// First tick is due one `interval` after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// Current period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant of the next tick.
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Switches to `interval` and drops whatever was pending under the old period.
    pub fn restart(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next_due = now + interval;
    }

    /// Returns true if a tick is due at `now`, advancing the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            // Fell behind by more than one period; resync instead of bursting.
            self.next_due = now + self.interval;
        }
        true
    }
}
