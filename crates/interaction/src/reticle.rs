//! Contract for the gaze cursor visual. Rendering lives outside this crate.

use crate::error::InteractionError;
use gazekit_physics::RayHit;

/// Receives cursor updates from an [`crate::Interactor`].
///
/// Calls are fire-and-forget and must not block the tick.
pub trait ReticleSink {
    /// Show or hide the cursor.
    fn set_enabled(&mut self, enabled: bool);

    /// Place the cursor on the current hit.
    fn set_target(&mut self, hit: &RayHit);

    /// Dwell progress in `[0, 1]`.
    fn set_progress(&mut self, progress: f32);
}

/// Builds reticle sinks from named visual assets.
pub trait ReticleProvider {
    /// Create a sink for `asset`, failing with
    /// [`InteractionError::MissingReticleAsset`] when it does not exist.
    fn create(&self, asset: &str) -> Result<Box<dyn ReticleSink>, InteractionError>;
}

/// Sink that discards every update (headless runs).
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReticle;

impl ReticleSink for NullReticle {
    fn set_enabled(&mut self, _enabled: bool) {}

    fn set_target(&mut self, _hit: &RayHit) {}

    fn set_progress(&mut self, _progress: f32) {}
}
