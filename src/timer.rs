//! Monotonic timer used to measure how long each test case runs.
//!
//! Timestamps are nanoseconds elapsed since a process-wide anchor taken the
//! first time any clock is read. `Instant` is backed by the platform's
//! monotonic source (`CLOCK_MONOTONIC` on Unix, `QueryPerformanceCounter` on
//! Windows, `mach_absolute_time` on Darwin), so wall-clock adjustments never
//! show up in measurements.

use std::time::Instant;

use once_cell::sync::Lazy;

use crate::errors::EngineError;

pub const TICKS_PER_SECOND: u64 = 1_000_000_000;

static ANCHOR: Lazy<Instant> = Lazy::new(Instant::now);

/// A source of monotonic timestamps in nanoseconds.
pub trait Clock {
    fn now(&self) -> Result<u64, EngineError>;
}

/// The default clock, backed by [`Instant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Result<u64, EngineError> {
        let elapsed = ANCHOR.elapsed();
        u64::try_from(elapsed.as_nanos())
            .map_err(|_| EngineError::generic("failed to retrieve the current time"))
    }
}

/// Reads the default monotonic clock.
pub fn now() -> Result<u64, EngineError> {
    MonotonicClock.now()
}

/// Computes the elapsed nanoseconds between two readings, if both succeeded.
pub fn elapsed_between(
    begin: Result<u64, EngineError>,
    end: Result<u64, EngineError>,
) -> Option<u64> {
    match (begin, end) {
        (Ok(begin), Ok(end)) => Some(end.saturating_sub(begin)),
        _ => None,
    }
}

/// Converts nanoseconds to fractional milliseconds for reports.
pub fn nanos_to_millis(nanos: u64) -> f64 {
    nanos as f64 * (1000.0 / TICKS_PER_SECOND as f64)
}
