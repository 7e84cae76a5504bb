//! Simulation time: fixed ticks and the monotonic timestamps derived from them.

use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::time::Duration;

/// Default simulation rate (20 TPS => 50 ms per tick).
pub const DEFAULT_TICK_RATE: u32 = 20;

/// Fixed tick counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Monotonic timestamp measured from the start of the simulation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SimTime(Duration);

impl SimTime {
    /// Simulation start.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Timestamp at `elapsed` after simulation start.
    pub const fn from_duration(elapsed: Duration) -> Self {
        Self(elapsed)
    }

    /// Timestamp at `secs` seconds after simulation start.
    ///
    /// Negative or non-finite inputs clamp to [`SimTime::ZERO`].
    pub fn from_secs_f64(secs: f64) -> Self {
        if secs.is_finite() && secs > 0.0 {
            Self(Duration::from_secs_f64(secs))
        } else {
            Self::ZERO
        }
    }

    /// Time since simulation start.
    pub fn elapsed(self) -> Duration {
        self.0
    }

    /// Seconds since simulation start.
    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }

    /// Duration from `earlier` to `self`, zero if `earlier` is later.
    pub fn saturating_since(self, earlier: SimTime) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for SimTime {
    type Output = SimTime;

    fn add(self, rhs: Duration) -> Self::Output {
        SimTime(self.0.saturating_add(rhs))
    }
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Maps fixed ticks onto [`SimTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    tick: SimTick,
    tick_duration: Duration,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::with_rate(DEFAULT_TICK_RATE)
    }
}

impl SimClock {
    /// Clock with an explicit tick duration.
    pub fn new(tick_duration: Duration) -> Self {
        Self {
            tick: SimTick::ZERO,
            tick_duration,
        }
    }

    /// Clock running at `ticks_per_second` (a rate of zero is treated as one).
    pub fn with_rate(ticks_per_second: u32) -> Self {
        Self::new(Duration::from_secs(1) / ticks_per_second.max(1))
    }

    /// Current tick.
    pub fn tick(&self) -> SimTick {
        self.tick
    }

    /// Duration of a single tick.
    pub fn tick_duration(&self) -> Duration {
        self.tick_duration
    }

    /// Timestamp of the current tick.
    pub fn now(&self) -> SimTime {
        self.time_at(self.tick)
    }

    /// Timestamp of an arbitrary tick on this clock.
    ///
    /// Saturates at `Duration::MAX` instead of wrapping.
    pub fn time_at(&self, tick: SimTick) -> SimTime {
        let nanos = self
            .tick_duration
            .as_nanos()
            .saturating_mul(u128::from(tick.0));
        let secs = u64::try_from(nanos / NANOS_PER_SEC).unwrap_or(u64::MAX);
        let subsec = u32::try_from(nanos % NANOS_PER_SEC).unwrap_or(0);
        SimTime(Duration::new(secs, subsec))
    }

    /// Advance one tick and return the new timestamp.
    pub fn step(&mut self) -> SimTime {
        self.tick = self.tick.advance(1);
        self.now()
    }
}
