//! Per-object gaze state and its notification surface.

use crate::config::InteractableConfig;
use crate::error::InteractionError;
use crate::events::{GazeEvent, InteractableEvents};
use crate::timer::DelayedTask;
use gazekit_core::{InteractorId, ObjectId, SimTime};
use gazekit_physics::HitTestGeometry;
use glam::Vec3;
use std::time::Duration;
use tracing::{debug, info};

/// Gaze target hosted by a scene object with a collider.
#[derive(Debug)]
pub struct Interactable {
    object: ObjectId,
    activatable: bool,
    activated: bool,
    active_in_hierarchy: bool,
    exit_delay: Duration,
    pending_exit: DelayedTask,
    /// Interactor reported by the deferred exit once it fires.
    exiting_interactor: Option<InteractorId>,
    events: InteractableEvents,
}

impl Interactable {
    /// Attach interaction to `object`.
    ///
    /// Fails fast when the object has no collider, since it could never be hit.
    pub fn attach<G>(
        object: ObjectId,
        config: &InteractableConfig,
        geometry: &G,
    ) -> Result<Self, InteractionError>
    where
        G: HitTestGeometry + ?Sized,
    {
        if !geometry.has_collider(object) {
            return Err(InteractionError::MissingHitGeometry { object });
        }

        Ok(Self {
            object,
            activatable: config.activatable,
            activated: false,
            active_in_hierarchy: true,
            exit_delay: config.exit_delay(),
            pending_exit: DelayedTask::new(),
            exiting_interactor: None,
            events: InteractableEvents::default(),
        })
    }

    /// Owning scene object.
    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// Whether the collider currently accepts raycast hits.
    ///
    /// Read from `geometry`, so it never disagrees with what raycasts see.
    pub fn is_enabled<G>(&self, geometry: &G) -> bool
    where
        G: HitTestGeometry + ?Sized,
    {
        geometry.collider_enabled(self.object).unwrap_or(false)
    }

    /// Whether dwell can activate this object.
    pub fn is_activatable(&self) -> bool {
        self.activatable
    }

    /// Whether a dwell activation completed and no exit has happened since.
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Whether the host object is active in the scene hierarchy.
    pub fn is_active_in_hierarchy(&self) -> bool {
        self.active_in_hierarchy
    }

    /// Configured exit grace period.
    pub fn exit_delay(&self) -> Duration {
        self.exit_delay
    }

    /// Whether a deferred exit is waiting for its deadline.
    pub fn has_pending_exit(&self) -> bool {
        self.pending_exit.is_pending()
    }

    /// Notification channels, read-only.
    pub fn events(&self) -> &InteractableEvents {
        &self.events
    }

    /// Notification channels, for subscribing.
    pub fn events_mut(&mut self) -> &mut InteractableEvents {
        &mut self.events
    }

    /// Toggle the collider's hit-test flag.
    ///
    /// Only future raycasts are affected; a current gaze is not exited here.
    pub fn enable<G>(&mut self, enabled: bool, geometry: &mut G) -> Result<(), InteractionError>
    where
        G: HitTestGeometry + ?Sized,
    {
        if !geometry.set_collider_enabled(self.object, enabled) {
            return Err(InteractionError::MissingHitGeometry {
                object: self.object,
            });
        }
        Ok(())
    }

    /// Mirror the host's hierarchy state.
    ///
    /// Going inactive with a deferred exit pending runs the exit right away,
    /// since an inactive host no longer drives its timer.
    pub fn set_active_in_hierarchy(&mut self, active: bool) {
        self.active_in_hierarchy = active;
        if !active && self.pending_exit.cancel() {
            debug!(object = %self.object, "host deactivated, flushing pending exit");
            let interactor = self.exiting_interactor.take();
            self.run_exit(interactor);
        }
    }

    /// Mark the object activated and notify subscribers.
    ///
    /// Not reentrancy-guarded: callers check [`Interactable::is_activated`].
    pub fn activate(&mut self) {
        self.activated = true;
        info!(object = %self.object, "activated");
        let event = self.event(None, None);
        self.events.activated.emit(&event);
        self.events.on_activated.emit(&());
    }

    /// Gaze landed on this object.
    pub fn gaze_enter(&mut self, interactor: InteractorId, point: Vec3) {
        if self.pending_exit.cancel() {
            debug!(object = %self.object, "re-entered during exit delay, exit cancelled");
            self.exiting_interactor = None;
        }
        debug!(object = %self.object, %interactor, "gaze enter");
        let event = self.event(Some(interactor), Some(point));
        self.events.enter.emit(&event);
        self.events.on_enter.emit(&());
        self.events.on_toggle.emit(&true);
    }

    /// Gaze remained on this object for another tick.
    pub fn gaze_stay(&mut self, interactor: InteractorId, point: Vec3) {
        let event = self.event(Some(interactor), Some(point));
        self.events.stay.emit(&event);
        self.events.on_stay.emit(&());
    }

    /// Gaze left this object.
    ///
    /// Active hosts defer the exit by the configured delay (replacing any
    /// previous pending exit); inactive hosts exit immediately.
    pub fn gaze_exit(&mut self, interactor: InteractorId, now: SimTime) {
        if self.active_in_hierarchy {
            self.exiting_interactor = Some(interactor);
            self.pending_exit.schedule(now, self.exit_delay);
            debug!(
                object = %self.object,
                %interactor,
                delay_ms = u64::try_from(self.exit_delay.as_millis()).unwrap_or(u64::MAX),
                "gaze exit deferred"
            );
        } else {
            self.pending_exit.cancel();
            self.exiting_interactor = None;
            self.run_exit(Some(interactor));
        }
    }

    /// Drive the deferred exit. Returns `true` if the exit fired on this call.
    pub fn update(&mut self, now: SimTime) -> bool {
        if !self.pending_exit.poll(now) {
            return false;
        }
        let interactor = self.exiting_interactor.take();
        self.run_exit(interactor);
        true
    }

    fn run_exit(&mut self, interactor: Option<InteractorId>) {
        debug!(object = %self.object, "gaze exit");
        let event = self.event(interactor, None);
        self.events.exit.emit(&event);
        self.events.on_exit.emit(&());
        self.events.on_toggle.emit(&false);
        self.activated = false;
    }

    fn event(&self, interactor: Option<InteractorId>, point: Option<Vec3>) -> GazeEvent {
        GazeEvent {
            object: self.object,
            interactor,
            point,
        }
    }
}
