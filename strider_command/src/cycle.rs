//! Periodic tick pacing.
//!
//! The scheduler itself never sleeps. [`CycleRunner`] is the host side: it
//! calls a body once per period, measures it, and sleeps for the rest of
//! the period. A body that takes longer than the period is an overrun; it
//! is counted and logged, and the next cycle starts immediately.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use strider_common::consts::MAX_CYCLE_PERIOD_MS;
use thiserror::Error;
use tracing::{debug, warn};

// ─── Cycle Statistics ───────────────────────────────────────────────

/// O(1) per-cycle timing statistics.
#[derive(Debug, Clone)]
pub struct CycleStats {
    /// Total cycles executed.
    pub cycle_count: u64,
    /// Last cycle duration [ns].
    pub last_cycle_ns: u64,
    /// Minimum cycle duration [ns].
    pub min_cycle_ns: u64,
    /// Maximum cycle duration [ns].
    pub max_cycle_ns: u64,
    /// Running sum for average computation.
    pub sum_cycle_ns: u128,
    /// Cycles whose body exceeded the period.
    pub overruns: u64,
}

impl CycleStats {
    pub const fn new() -> Self {
        Self {
            cycle_count: 0,
            last_cycle_ns: 0,
            min_cycle_ns: u64::MAX,
            max_cycle_ns: 0,
            sum_cycle_ns: 0,
            overruns: 0,
        }
    }

    /// Record a cycle duration.
    #[inline]
    pub fn record(&mut self, duration_ns: u64) {
        self.cycle_count += 1;
        self.last_cycle_ns = duration_ns;
        self.min_cycle_ns = self.min_cycle_ns.min(duration_ns);
        self.max_cycle_ns = self.max_cycle_ns.max(duration_ns);
        self.sum_cycle_ns += u128::from(duration_ns);
    }

    /// Average cycle time [ns] (0 if no cycles).
    #[inline]
    pub fn avg_cycle_ns(&self) -> u64 {
        if self.cycle_count == 0 {
            0
        } else {
            (self.sum_cycle_ns / u128::from(self.cycle_count)) as u64
        }
    }
}

impl Default for CycleStats {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    /// Period outside 1 ms ..= `MAX_CYCLE_PERIOD_MS`.
    #[error("cycle period {0:?} out of range (1..={max} ms)", max = MAX_CYCLE_PERIOD_MS)]
    InvalidPeriod(Duration),
}

// ─── Cycle Runner ───────────────────────────────────────────────────

/// Fixed-period loop around a tick body.
///
/// Stops when the shared running flag is cleared (e.g. from a Ctrl-C
/// handler) or after the optional cycle limit.
#[derive(Debug)]
pub struct CycleRunner {
    period: Duration,
    limit: Option<u64>,
    running: Arc<AtomicBool>,
    stats: CycleStats,
}

impl CycleRunner {
    pub fn new(period: Duration) -> Result<Self, CycleError> {
        if period < Duration::from_millis(1) || period > Duration::from_millis(MAX_CYCLE_PERIOD_MS) {
            return Err(CycleError::InvalidPeriod(period));
        }
        Ok(Self {
            period,
            limit: None,
            running: Arc::new(AtomicBool::new(true)),
            stats: CycleStats::new(),
        })
    }

    /// Stop after `cycles` iterations.
    pub fn with_limit(mut self, cycles: u64) -> Self {
        self.limit = Some(cycles);
        self
    }

    /// Flag checked before every cycle; store `false` to stop the loop.
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    #[inline]
    pub fn period(&self) -> Duration {
        self.period
    }

    #[inline]
    pub fn stats(&self) -> &CycleStats {
        &self.stats
    }

    /// Run `body` once per period until stopped. The body receives the
    /// zero-based cycle index.
    pub fn run(&mut self, mut body: impl FnMut(u64)) -> &CycleStats {
        let budget_ns = self.period.as_nanos() as u64;
        debug!(period_ms = self.period.as_millis() as u64, limit = ?self.limit, "cycle loop started");

        while self.running.load(Ordering::Acquire) {
            if self.limit.is_some_and(|limit| self.stats.cycle_count >= limit) {
                break;
            }

            let start = Instant::now();
            body(self.stats.cycle_count);
            let elapsed = start.elapsed();
            let duration_ns = elapsed.as_nanos() as u64;
            self.stats.record(duration_ns);

            if duration_ns > budget_ns {
                self.stats.overruns += 1;
                warn!(
                    cycle = self.stats.cycle_count,
                    duration_us = duration_ns / 1_000,
                    budget_us = budget_ns / 1_000,
                    "cycle overrun"
                );
                continue;
            }

            if let Some(remaining) = self.period.checked_sub(elapsed) {
                std::thread::sleep(remaining);
            }
        }

        debug!(
            cycles = self.stats.cycle_count,
            overruns = self.stats.overruns,
            avg_us = self.stats.avg_cycle_ns() / 1_000,
            "cycle loop stopped"
        );
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_track_min_max_avg() {
        let mut stats = CycleStats::new();
        assert_eq!(stats.avg_cycle_ns(), 0);
        stats.record(100);
        stats.record(300);
        stats.record(200);
        assert_eq!(stats.cycle_count, 3);
        assert_eq!(stats.min_cycle_ns, 100);
        assert_eq!(stats.max_cycle_ns, 300);
        assert_eq!(stats.last_cycle_ns, 200);
        assert_eq!(stats.avg_cycle_ns(), 200);
    }

    #[test]
    fn period_bounds() {
        assert!(CycleRunner::new(Duration::ZERO).is_err());
        assert!(CycleRunner::new(Duration::from_millis(MAX_CYCLE_PERIOD_MS + 1)).is_err());
        assert!(CycleRunner::new(Duration::from_millis(20)).is_ok());
    }

    #[test]
    fn limit_bounds_iterations() {
        let mut runner = CycleRunner::new(Duration::from_millis(1)).unwrap().with_limit(3);
        let mut seen = Vec::new();
        let stats = runner.run(|cycle| seen.push(cycle));
        assert_eq!(stats.cycle_count, 3);
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn cleared_flag_stops_loop() {
        let mut runner = CycleRunner::new(Duration::from_millis(1)).unwrap();
        let running = runner.running_flag();
        let stats = runner.run(|cycle| {
            if cycle == 4 {
                running.store(false, Ordering::Release);
            }
        });
        assert_eq!(stats.cycle_count, 5);
    }

    #[test]
    fn slow_body_counts_overrun() {
        let mut runner = CycleRunner::new(Duration::from_millis(1)).unwrap().with_limit(2);
        let stats = runner.run(|_| std::thread::sleep(Duration::from_millis(3)));
        assert_eq!(stats.overruns, 2);
    }
}
