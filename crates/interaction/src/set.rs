//! Interactables keyed by their host object.

use crate::interactable::Interactable;
use gazekit_core::{ObjectId, SimTime};
use gazekit_physics::HitTestGeometry;
use std::collections::BTreeMap;
use tracing::warn;

/// Registry the interactor resolves raycast hits against.
///
/// Owns the interactables; interactors only ever hold [`ObjectId`]s.
#[derive(Debug, Default)]
pub struct InteractableSet {
    items: BTreeMap<ObjectId, Interactable>,
}

impl InteractableSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the interactable for its host object.
    pub fn insert(&mut self, interactable: Interactable) -> Option<Interactable> {
        self.items.insert(interactable.object(), interactable)
    }

    /// Remove the interactable hosted by `object`, dropping any pending exit with it.
    pub fn remove(&mut self, object: ObjectId) -> Option<Interactable> {
        self.items.remove(&object)
    }

    /// Whether `object` hosts an interactable.
    pub fn contains(&self, object: ObjectId) -> bool {
        self.items.contains_key(&object)
    }

    /// Shared access.
    pub fn get(&self, object: ObjectId) -> Option<&Interactable> {
        self.items.get(&object)
    }

    /// Mutable access, e.g. to subscribe to events.
    pub fn get_mut(&mut self, object: ObjectId) -> Option<&mut Interactable> {
        self.items.get_mut(&object)
    }

    /// Resolve the interaction capability of a hit object, if it has one.
    pub fn lookup(&mut self, object: ObjectId) -> Option<&mut Interactable> {
        self.get_mut(object)
    }

    /// Number of interactables.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in object order.
    pub fn iter(&self) -> impl Iterator<Item = &Interactable> {
        self.items.values()
    }

    /// Drive every deferred exit. Returns how many exits fired.
    ///
    /// Call once per tick, after the interactor, on the same thread.
    pub fn update(&mut self, now: SimTime) -> usize {
        self.items
            .values_mut()
            .map(|interactable| interactable.update(now))
            .filter(|fired| *fired)
            .count()
    }

    /// Mirror a host hierarchy change onto both the collider and the interactable.
    ///
    /// Returns `false`, changing nothing, when `object` has no interactable
    /// or its collider is gone.
    pub fn set_object_active<G>(&mut self, object: ObjectId, active: bool, geometry: &mut G) -> bool
    where
        G: HitTestGeometry + ?Sized,
    {
        let Some(interactable) = self.items.get_mut(&object) else {
            return false;
        };
        if !geometry.set_collider_enabled(object, active) {
            warn!(%object, active, "host has no collider, hierarchy change ignored");
            return false;
        }
        interactable.set_active_in_hierarchy(active);
        true
    }
}
