#![warn(missing_docs)]
//! Deterministic testing surfaces for gaze interaction: recording sinks,
//! event journals and a fixed-rate tick harness.

mod harness;
mod journal;
mod reticle;

pub use harness::*;
pub use journal::*;
pub use reticle::*;
