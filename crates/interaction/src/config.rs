//! Static configuration for interactors and interactables.
//!
//! Durations are authored in seconds so the structs map directly onto TOML.

use crate::error::InteractionError;
use gazekit_physics::LayerMask;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Interactor settings, fixed for the lifetime of an [`crate::Interactor`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InteractorConfig {
    /// Rays stop after this distance.
    pub max_detection_distance: f32,
    /// Hits closer than this are ignored entirely.
    pub min_detection_distance: f32,
    /// Dwell time needed to activate a target, in seconds.
    pub time_to_activate_secs: f64,
    /// Bitmask of [`LayerMask`] layers the ray may hit.
    pub layer_filter: u32,
    /// Asset name handed to the [`crate::ReticleProvider`].
    pub reticle_asset: String,
}

impl Default for InteractorConfig {
    fn default() -> Self {
        Self {
            max_detection_distance: 100.0,
            min_detection_distance: 0.0,
            time_to_activate_secs: 1.5,
            layer_filter: LayerMask::all().difference(LayerMask::IGNORE_RAYCAST).bits(),
            reticle_asset: "reticle".to_string(),
        }
    }
}

impl InteractorConfig {
    /// Builder: set the detection range.
    pub fn with_range(mut self, min: f32, max: f32) -> Self {
        self.min_detection_distance = min;
        self.max_detection_distance = max;
        self
    }

    /// Builder: set the dwell time.
    pub fn with_time_to_activate(mut self, time: Duration) -> Self {
        self.time_to_activate_secs = time.as_secs_f64();
        self
    }

    /// Builder: set the layer filter.
    pub fn with_layer_filter(mut self, filter: LayerMask) -> Self {
        self.layer_filter = filter.bits();
        self
    }

    /// Dwell time as a [`Duration`]; out-of-range values become zero.
    pub fn time_to_activate(&self) -> Duration {
        if self.time_to_activate_secs.is_finite() && self.time_to_activate_secs > 0.0 {
            Duration::from_secs_f64(self.time_to_activate_secs)
        } else {
            Duration::ZERO
        }
    }

    /// Layer filter as a [`LayerMask`]; unknown bits are kept.
    pub fn layer_mask(&self) -> LayerMask {
        LayerMask::from_bits_retain(self.layer_filter)
    }

    /// Reject values that would make the per-tick algorithm misbehave.
    pub fn validate(&self) -> Result<(), InteractionError> {
        let min = self.min_detection_distance;
        let max = self.max_detection_distance;
        if !min.is_finite() || min < 0.0 {
            return Err(InteractionError::InvalidConfig(format!(
                "min_detection_distance must be finite and >= 0 (got {min})"
            )));
        }
        if max.is_nan() || max < min {
            return Err(InteractionError::InvalidConfig(format!(
                "max_detection_distance must be >= min_detection_distance (got {max} < {min})"
            )));
        }
        let tta = self.time_to_activate_secs;
        if !tta.is_finite() || tta < 0.0 {
            return Err(InteractionError::InvalidConfig(format!(
                "time_to_activate_secs must be finite and >= 0 (got {tta})"
            )));
        }
        Ok(())
    }
}

/// Per-object settings applied when an interactable is attached.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InteractableConfig {
    /// Whether dwelling on the object can activate it.
    pub activatable: bool,
    /// Grace period before losing the gaze counts as an exit, in seconds.
    pub exit_delay_secs: f64,
}

impl Default for InteractableConfig {
    fn default() -> Self {
        Self {
            activatable: true,
            exit_delay_secs: 0.1,
        }
    }
}

impl InteractableConfig {
    /// Builder: toggle activation.
    pub fn with_activatable(mut self, activatable: bool) -> Self {
        self.activatable = activatable;
        self
    }

    /// Builder: set the exit delay.
    pub fn with_exit_delay(mut self, delay: Duration) -> Self {
        self.exit_delay_secs = delay.as_secs_f64();
        self
    }

    /// Exit delay as a [`Duration`]; negative or non-finite values become zero.
    pub fn exit_delay(&self) -> Duration {
        if self.exit_delay_secs.is_finite() && self.exit_delay_secs > 0.0 {
            Duration::from_secs_f64(self.exit_delay_secs)
        } else {
            Duration::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(InteractorConfig::default().validate().is_ok());
        assert!(!InteractorConfig::default()
            .layer_mask()
            .contains(LayerMask::IGNORE_RAYCAST));
    }

    #[test]
    fn rejects_inverted_range() {
        let config = InteractorConfig::default().with_range(5.0, 1.0);
        assert!(matches!(
            config.validate(),
            Err(InteractionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_negative_activation_time() {
        let config = InteractorConfig {
            time_to_activate_secs: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn infinite_max_distance_is_allowed() {
        let config = InteractorConfig::default().with_range(0.5, f32::INFINITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn exit_delay_clamps_bad_values() {
        let config = InteractableConfig {
            exit_delay_secs: -2.0,
            ..Default::default()
        };
        assert_eq!(config.exit_delay(), Duration::ZERO);
        let config = InteractableConfig::default().with_exit_delay(Duration::from_millis(250));
        assert_eq!(config.exit_delay(), Duration::from_millis(250));
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config: InteractorConfig =
            toml::from_str("time_to_activate_secs = 2.0").expect("parse");
        assert_eq!(config.time_to_activate(), Duration::from_secs(2));
        assert_eq!(config.max_detection_distance, 100.0);
        assert_eq!(config.reticle_asset, "reticle");
    }
}
