#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod eventlog;
pub mod ids;
pub mod time;

use rand::{rngs::StdRng, SeedableRng};

// Re-export commonly used types
pub use eventlog::{EventLogError, EventRecord, JsonlSink};
pub use ids::{InteractorId, ObjectId};
pub use time::{SimClock, SimTick, SimTime, DEFAULT_TICK_RATE};

/// Helper to derive a reproducible RNG seeded by run + salt + tick domains.
pub fn scoped_rng(seed: u64, salt: u64, tick: SimTick) -> StdRng {
    let seed = seed ^ salt.rotate_left(17) ^ tick.0;
    StdRng::seed_from_u64(seed)
}
