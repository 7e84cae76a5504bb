//! Reticle sinks that remember every call for later assertions.

use gazekit_core::ObjectId;
use gazekit_interaction::{InteractionError, ReticleProvider, ReticleSink};
use gazekit_physics::RayHit;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;

/// One call received by a [`RecordingReticle`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ReticleCall {
    /// `set_enabled`
    Enabled(bool),
    /// `set_target`
    Target {
        /// Object under the cursor.
        object: ObjectId,
        /// Hit distance.
        distance: f32,
    },
    /// `set_progress`
    Progress(f32),
}

/// Sink whose call log is shared between clones.
///
/// Hand one clone to the interactor and keep another to inspect.
#[derive(Debug, Clone, Default)]
pub struct RecordingReticle {
    calls: Rc<RefCell<Vec<ReticleCall>>>,
}

impl RecordingReticle {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed clone sharing this recorder's log.
    pub fn boxed(&self) -> Box<dyn ReticleSink> {
        Box::new(self.clone())
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<ReticleCall> {
        self.calls.borrow().clone()
    }

    /// Only the progress values, in order.
    pub fn progress_values(&self) -> Vec<f32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                ReticleCall::Progress(value) => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Most recent progress value.
    pub fn last_progress(&self) -> Option<f32> {
        self.progress_values().last().copied()
    }

    /// Most recent visibility, if it was ever set.
    pub fn is_enabled(&self) -> Option<bool> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            ReticleCall::Enabled(enabled) => Some(*enabled),
            _ => None,
        })
    }

    /// Most recent target object.
    pub fn last_target(&self) -> Option<ObjectId> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            ReticleCall::Target { object, .. } => Some(*object),
            _ => None,
        })
    }

    /// Forget all recorded calls.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl ReticleSink for RecordingReticle {
    fn set_enabled(&mut self, enabled: bool) {
        self.calls.borrow_mut().push(ReticleCall::Enabled(enabled));
    }

    fn set_target(&mut self, hit: &RayHit) {
        self.calls.borrow_mut().push(ReticleCall::Target {
            object: hit.object,
            distance: hit.distance,
        });
    }

    fn set_progress(&mut self, progress: f32) {
        self.calls.borrow_mut().push(ReticleCall::Progress(progress));
    }
}

/// Provider that knows a fixed list of asset names and hands out recorders.
#[derive(Debug, Clone, Default)]
pub struct RecordingProvider {
    assets: Vec<String>,
    reticle: RecordingReticle,
}

impl RecordingProvider {
    /// Provider that resolves exactly `assets`.
    pub fn with_assets<I, S>(assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            assets: assets.into_iter().map(Into::into).collect(),
            reticle: RecordingReticle::new(),
        }
    }

    /// Recorder shared by every sink this provider created.
    pub fn reticle(&self) -> &RecordingReticle {
        &self.reticle
    }
}

impl ReticleProvider for RecordingProvider {
    fn create(&self, asset: &str) -> Result<Box<dyn ReticleSink>, InteractionError> {
        if self.assets.iter().any(|known| known == asset) {
            Ok(self.reticle.boxed())
        } else {
            Err(InteractionError::MissingReticleAsset {
                name: asset.to_string(),
            })
        }
    }
}
