//! Deadline-based timers for the cooperative event loop.
//!
//! Nothing here sleeps or spawns. Callers pass the current `Instant` and
//! ask whether a deadline has passed, which keeps the timers deterministic
//! under test.

use std::time::{Duration, Instant};

/// A single-slot deferred action.
///
/// At most one deadline is pending. Scheduling replaces whatever was
/// pending; firing consumes the slot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    due: Option<Instant>,
}

impl Deferred {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deadline, replacing any pending one. Returns true when a
    /// pending deadline was replaced.
    pub fn schedule(&mut self, due: Instant) -> bool {
        self.due.replace(due).is_some()
    }

    /// Drops the pending deadline. Returns true when one was pending.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    /// Returns the pending deadline.
    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    /// True while a deadline is pending.
    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Consumes the slot if its deadline is at or before `now`.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// A fixed-period ticker.
///
/// Ticks missed while nobody polled collapse into one: after a long gap
/// [`tick`](Self::tick) reports a single tick and the next deadline moves
/// to the first period boundary after `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next: Instant,
}

impl Interval {
    const MIN_PERIOD: Duration = Duration::from_millis(1);

    /// Creates a ticker whose first tick is one period after `start`.
    pub fn new(period: Duration, start: Instant) -> Self {
        let period = period.max(Self::MIN_PERIOD);
        Self {
            period,
            next: start + period,
        }
    }

    /// Returns the period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns the next tick deadline.
    pub fn next_tick(&self) -> Instant {
        self.next
    }

    /// Returns true once per elapsed period boundary.
    pub fn tick(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }

        let behind = now.duration_since(self.next).as_nanos();
        let periods = behind / self.period.as_nanos() + 1;
        let advance = self.period.as_nanos().saturating_mul(periods);
        self.next += Duration::from_nanos(u64::try_from(advance).unwrap_or(u64::MAX));
        true
    }
}
