//! Cancellable one-shot task driven by simulation time.
//!
//! The task never runs on its own: the owner polls it from the same tick loop
//! that drives the interactor, so completion always lands on the simulation
//! thread.

use gazekit_core::SimTime;
use std::time::Duration;

/// Identifies one scheduling of a [`DelayedTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    generation: u64,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TaskHandle,
    deadline: SimTime,
}

/// At most one outstanding deadline; scheduling again replaces the old one.
#[derive(Debug, Default, Clone)]
pub struct DelayedTask {
    generation: u64,
    pending: Option<Pending>,
}

impl DelayedTask {
    /// Create an idle task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is pending, then arm the task to fire at `now + delay`.
    pub fn schedule(&mut self, now: SimTime, delay: Duration) -> TaskHandle {
        self.cancel();
        self.generation += 1;
        let handle = TaskHandle {
            generation: self.generation,
        };
        self.pending = Some(Pending {
            handle,
            deadline: now + delay,
        });
        handle
    }

    /// Drop the pending task. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Cancel only if `handle` is the currently pending scheduling.
    pub fn cancel_handle(&mut self, handle: TaskHandle) -> bool {
        match self.pending {
            Some(pending) if pending.handle == handle => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: SimTime) -> bool {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Whether a deadline is armed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The armed deadline, if any.
    pub fn deadline(&self) -> Option<SimTime> {
        self.pending.map(|p| p.deadline)
    }
}
