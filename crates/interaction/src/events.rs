//! Notification surface of an interactable.

use crate::signal::Signal;
use gazekit_core::{InteractorId, ObjectId};
use glam::Vec3;
use serde::Serialize;

/// Payload of the gaze notification channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GazeEvent {
    /// Interactable that raised the event.
    pub object: ObjectId,
    /// Interactor responsible, when one applies.
    pub interactor: Option<InteractorId>,
    /// World-space hit point, for enter/stay.
    pub point: Option<Vec3>,
}

/// Channels client code subscribes to.
///
/// `enter`/`stay`/`exit`/`activated` carry a [`GazeEvent`]; the `on_*`
/// channels are payload-free hooks fired right after their counterpart, and
/// `on_toggle` reports `true` on enter and `false` on exit.
#[derive(Debug, Default)]
pub struct InteractableEvents {
    /// Gaze landed on the object.
    pub enter: Signal<GazeEvent>,
    /// Gaze remained on the object this tick.
    pub stay: Signal<GazeEvent>,
    /// Gaze left the object (after any exit delay).
    pub exit: Signal<GazeEvent>,
    /// Dwell completed.
    pub activated: Signal<GazeEvent>,
    /// Hook fired after `enter`.
    pub on_enter: Signal<()>,
    /// Hook fired after `stay`.
    pub on_stay: Signal<()>,
    /// Hook fired after `exit`.
    pub on_exit: Signal<()>,
    /// Hook fired after `activated`.
    pub on_activated: Signal<()>,
    /// Hover state toggle.
    pub on_toggle: Signal<bool>,
}
