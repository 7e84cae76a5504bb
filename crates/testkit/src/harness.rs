//! Fixed-rate tick harness for deterministic gaze scenarios.
//!
//! Steps a small simulation on a [`SimClock`] and captures a snapshot after
//! every tick, so tests can assert on the state at exact timestamps.

use gazekit_core::{SimClock, SimTick, SimTime};
use serde::Serialize;

/// Snapshot captured after a tick ran.
#[derive(Debug, Clone, Serialize)]
pub struct TickFrame<S> {
    /// Tick number.
    pub tick: u64,
    /// Timestamp the tick ran at.
    pub time: SimTime,
    /// Snapshot payload.
    pub snapshot: S,
}

/// Step `ticks` times starting from `clock`'s current tick.
///
/// `step` runs at the tick's timestamp, `snapshot` right after it; the clock
/// advances between ticks. Returns one frame per tick.
pub fn run_ticks<State, Snapshot, StepFn, SnapFn>(
    clock: &mut SimClock,
    ticks: u64,
    state: &mut State,
    mut step: StepFn,
    mut snapshot: SnapFn,
) -> Vec<TickFrame<Snapshot>>
where
    StepFn: FnMut(SimTick, SimTime, &mut State),
    SnapFn: FnMut(SimTick, &State) -> Snapshot,
{
    let mut frames = Vec::with_capacity(usize::try_from(ticks).unwrap_or(0));
    for _ in 0..ticks {
        let tick = clock.tick();
        let now = clock.now();
        step(tick, now, state);
        frames.push(TickFrame {
            tick: tick.0,
            time: now,
            snapshot: snapshot(tick, state),
        });
        clock.step();
    }
    frames
}

/// First frame at or after `time`.
pub fn frame_at<S>(frames: &[TickFrame<S>], time: SimTime) -> Option<&TickFrame<S>> {
    frames.iter().find(|frame| frame.time >= time)
}
