//! Recurring interval timer.
//!
//! The timer only tracks deadlines; the host decides when to wake up and
//! polls it. Missed intervals collapse into a single firing, which is safe
//! because progression is computed from elapsed time rather than tick count.

use std::time::{Duration, Instant};

/// Default tick cadence, roughly one frame of a 60 Hz display.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Fires every `interval`, phase-locked to the instant it was armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval: Duration,
    next_due: Instant,
    fired: u64,
}

impl IntervalTimer {
    /// Arm a timer whose first firing is one interval after `now`.
    ///
    /// Zero intervals are raised to one millisecond.
    pub fn new(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next_due: now + interval,
            fired: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant of the next firing.
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Number of times the timer has fired.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_due
    }

    /// Fire if due, scheduling the next deadline past `now`.
    ///
    /// Returns `true` when the timer fired.
    pub fn fire(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }

        let behind = now.duration_since(self.next_due);
        let skipped = behind.as_nanos() / self.interval.as_nanos();
        let skipped = u32::try_from(skipped).unwrap_or(u32::MAX - 1);
        self.next_due += self.interval * (skipped + 1);
        self.fired += 1;
        true
    }
}
