//! Setup-time failures. Per-tick misses are control flow, not errors.

use gazekit_core::ObjectId;
use thiserror::Error;

/// Configuration errors raised while wiring up gaze interaction.
#[derive(Debug, Error)]
pub enum InteractionError {
    /// An interactable was attached to an object without a collider.
    #[error("{object} has no hit-test geometry; add a collider before attaching an interactable")]
    MissingHitGeometry {
        /// Object that was missing its collider.
        object: ObjectId,
    },
    /// The reticle provider could not supply the requested visual asset.
    #[error("reticle asset `{name}` is not available")]
    MissingReticleAsset {
        /// Asset name that was requested.
        name: String,
    },
    /// Interactor configuration is out of range.
    #[error("invalid interactor config: {0}")]
    InvalidConfig(String),
}
