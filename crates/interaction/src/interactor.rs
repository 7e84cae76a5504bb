//! Per-tick gaze raycast driver: target tracking, dwell timing, activation.

use crate::config::InteractorConfig;
use crate::error::InteractionError;
use crate::reticle::{ReticleProvider, ReticleSink};
use crate::set::InteractableSet;
use gazekit_core::{InteractorId, ObjectId, SimTime};
use gazekit_physics::{LayerMask, Ray, SceneRaycast};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

/// Branch taken by one [`Interactor::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TickOutcome {
    /// Nothing within range on the filtered layers.
    Miss,
    /// Closest hit was nearer than the minimum detection distance.
    TooClose,
    /// Hit an object with no interactable.
    NotInteractable,
    /// A new target was entered this tick.
    Entered,
    /// The current target was kept.
    Stayed,
    /// The current target completed its dwell this tick.
    Activated,
}

/// The single gaze agent of a viewer.
pub struct Interactor {
    id: InteractorId,
    config: InteractorConfig,
    time_to_activate: Duration,
    layer_filter: LayerMask,
    reticle: Box<dyn ReticleSink>,
    current_target: Option<ObjectId>,
    enter_start_time: SimTime,
    progress: f32,
}

impl fmt::Debug for Interactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interactor")
            .field("id", &self.id)
            .field("config", &self.config)
            .field("current_target", &self.current_target)
            .field("enter_start_time", &self.enter_start_time)
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl Interactor {
    /// Validate `config` and build the reticle through `provider`.
    pub fn new<P>(
        id: InteractorId,
        config: InteractorConfig,
        provider: &P,
    ) -> Result<Self, InteractionError>
    where
        P: ReticleProvider + ?Sized,
    {
        config.validate()?;
        let reticle = provider.create(&config.reticle_asset)?;
        Self::with_reticle(id, config, reticle)
    }

    /// Validate `config` and use an already-built reticle.
    pub fn with_reticle(
        id: InteractorId,
        config: InteractorConfig,
        reticle: Box<dyn ReticleSink>,
    ) -> Result<Self, InteractionError> {
        config.validate()?;
        Ok(Self {
            id,
            time_to_activate: config.time_to_activate(),
            layer_filter: config.layer_mask(),
            config,
            reticle,
            current_target: None,
            enter_start_time: SimTime::ZERO,
            progress: 0.0,
        })
    }

    /// Identity reported in gaze events.
    pub fn id(&self) -> InteractorId {
        self.id
    }

    /// Static configuration.
    pub fn config(&self) -> &InteractorConfig {
        &self.config
    }

    /// Object currently under the gaze, if it hosts an interactable.
    pub fn current_target(&self) -> Option<ObjectId> {
        self.current_target
    }

    /// When the current target was entered; meaningless without a target.
    pub fn enter_start_time(&self) -> Option<SimTime> {
        self.current_target.map(|_| self.enter_start_time)
    }

    /// Last dwell progress pushed to the reticle.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// The reticle sink, e.g. to restyle it.
    pub fn reticle_mut(&mut self) -> &mut dyn ReticleSink {
        self.reticle.as_mut()
    }

    /// Run one tick of the gaze state machine.
    pub fn tick<S>(
        &mut self,
        now: SimTime,
        ray: &Ray,
        scene: &S,
        targets: &mut InteractableSet,
    ) -> TickOutcome
    where
        S: SceneRaycast + ?Sized,
    {
        let outcome = self.step(now, ray, scene, targets);
        trace!(
            interactor = %self.id,
            ?outcome,
            target = ?self.current_target,
            progress = self.progress,
            "gaze tick"
        );
        outcome
    }

    /// Clear progress and exit the current target, if any.
    ///
    /// With no current target this only pushes zero progress to the reticle.
    pub fn reset(&mut self, now: SimTime, targets: &mut InteractableSet) {
        self.progress = 0.0;
        self.reticle.set_progress(0.0);
        if let Some(previous) = self.current_target.take() {
            debug!(interactor = %self.id, target = %previous, "gaze target lost");
            if let Some(target) = targets.lookup(previous) {
                target.gaze_exit(self.id, now);
            }
        }
    }

    fn step<S>(
        &mut self,
        now: SimTime,
        ray: &Ray,
        scene: &S,
        targets: &mut InteractableSet,
    ) -> TickOutcome
    where
        S: SceneRaycast + ?Sized,
    {
        let Some(hit) = scene.raycast(ray, self.config.max_detection_distance, self.layer_filter)
        else {
            self.reticle.set_enabled(false);
            self.reset(now, targets);
            return TickOutcome::Miss;
        };

        if hit.distance < self.config.min_detection_distance {
            self.reticle.set_enabled(false);
            self.reset(now, targets);
            return TickOutcome::TooClose;
        }

        self.reticle.set_target(&hit);
        self.reticle.set_enabled(true);

        let switching = self.current_target != Some(hit.object);
        if switching && targets.contains(hit.object) {
            // Old target exits before the new one is recorded.
            self.reset(now, targets);
            self.enter_start_time = now;
            self.current_target = Some(hit.object);
            debug!(interactor = %self.id, target = %hit.object, "gaze target acquired");
        }

        let Some(target) = targets.lookup(hit.object) else {
            self.reset(now, targets);
            return TickOutcome::NotInteractable;
        };

        let mut outcome = TickOutcome::Stayed;
        if switching {
            target.gaze_enter(self.id, hit.point);
            outcome = TickOutcome::Entered;
        }
        target.gaze_stay(self.id, hit.point);

        if target.is_activatable() && !target.is_activated() {
            let progress = self.dwell_progress(now);
            self.progress = progress;
            self.reticle.set_progress(progress);
            if progress >= 1.0 {
                self.reticle.set_enabled(false);
                target.activate();
                outcome = TickOutcome::Activated;
            }
        }

        outcome
    }

    fn dwell_progress(&self, now: SimTime) -> f32 {
        if self.time_to_activate.is_zero() {
            return 1.0;
        }
        let deadline = self.enter_start_time + self.time_to_activate;
        let remaining = deadline.saturating_since(now);
        let fraction = remaining.as_secs_f64() / self.time_to_activate.as_secs_f64();
        (1.0 - fraction).clamp(0.0, 1.0) as f32
    }
}
