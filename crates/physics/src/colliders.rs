//! In-memory collider set implementing the scene raycast query.

use crate::{Aabb, HitTestGeometry, LayerMask, Ray, RayHit, SceneRaycast};
use gazekit_core::ObjectId;
use std::collections::BTreeMap;

/// Hit-test geometry attached to one scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    /// World-space bounds.
    pub bounds: Aabb,
    /// Layer the collider lives on (a single bit is expected).
    pub layer: LayerMask,
    /// Whether raycasts may hit this collider.
    pub enabled: bool,
}

impl Collider {
    /// Enabled collider on the default layer.
    pub fn new(bounds: Aabb) -> Self {
        Self {
            bounds,
            layer: LayerMask::DEFAULT,
            enabled: true,
        }
    }

    /// Builder: move the collider to `layer`.
    pub fn with_layer(mut self, layer: LayerMask) -> Self {
        self.layer = layer;
        self
    }
}

/// Colliders keyed by their owning object.
///
/// Iteration is ordered by [`ObjectId`], so equidistant hits resolve to the
/// lowest id on every run.
#[derive(Debug, Default, Clone)]
pub struct ColliderSet {
    colliders: BTreeMap<ObjectId, Collider>,
}

impl ColliderSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the collider hosted by `object`.
    pub fn insert(&mut self, object: ObjectId, collider: Collider) -> Option<Collider> {
        self.colliders.insert(object, collider)
    }

    /// Remove the collider hosted by `object`.
    pub fn remove(&mut self, object: ObjectId) -> Option<Collider> {
        self.colliders.remove(&object)
    }

    /// Look up a collider.
    pub fn get(&self, object: ObjectId) -> Option<&Collider> {
        self.colliders.get(&object)
    }

    /// Look up a collider mutably (e.g. to move it).
    pub fn get_mut(&mut self, object: ObjectId) -> Option<&mut Collider> {
        self.colliders.get_mut(&object)
    }

    /// Number of colliders.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl SceneRaycast for ColliderSet {
    fn raycast(&self, ray: &Ray, max_distance: f32, filter: LayerMask) -> Option<RayHit> {
        let mut closest: Option<RayHit> = None;

        for (object, collider) in &self.colliders {
            if !collider.enabled || !filter.intersects(collider.layer) {
                continue;
            }
            let Some(distance) = collider.bounds.ray_intersection(ray) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if closest.map_or(true, |hit| distance < hit.distance) {
                closest = Some(RayHit {
                    object: *object,
                    point: ray.at(distance),
                    distance,
                });
            }
        }

        tracing::trace!(hit = ?closest.map(|h| h.object), "scene raycast");
        closest
    }
}

impl HitTestGeometry for ColliderSet {
    fn has_collider(&self, object: ObjectId) -> bool {
        self.colliders.contains_key(&object)
    }

    fn collider_enabled(&self, object: ObjectId) -> Option<bool> {
        self.colliders.get(&object).map(|c| c.enabled)
    }

    fn set_collider_enabled(&mut self, object: ObjectId, enabled: bool) -> bool {
        match self.colliders.get_mut(&object) {
            Some(collider) => {
                collider.enabled = enabled;
                true
            }
            None => false,
        }
    }
}
