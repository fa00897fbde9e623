//! Tick-count timeouts.
//!
//! Time-bounded commands count executes instead of reading a clock so their
//! finish predicate stays pure and deterministic under test.

use std::time::Duration;

/// Counts ticks towards a fixed limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickTimer {
    limit: u64,
    elapsed: u64,
}

impl TickTimer {
    /// Timer expiring after `limit` ticks.
    pub const fn new(limit: u64) -> Self {
        Self { limit, elapsed: 0 }
    }

    /// Timer for `duration` at the given tick period, rounded up.
    ///
    /// A zero period yields a timer that never expires.
    pub fn from_duration(duration: Duration, period: Duration) -> Self {
        let limit = if period.is_zero() {
            u64::MAX
        } else {
            duration.as_nanos().div_ceil(period.as_nanos()) as u64
        };
        Self::new(limit)
    }

    #[inline]
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Count one tick.
    #[inline]
    pub fn tick(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    #[inline]
    pub const fn expired(&self) -> bool {
        self.elapsed >= self.limit
    }

    #[inline]
    pub const fn elapsed(&self) -> u64 {
        self.elapsed
    }

    #[inline]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}
