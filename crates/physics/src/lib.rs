#![warn(missing_docs)]
//! Geometry queries used by gaze interaction: AABBs, rays, layer masks and
//! the scene raycast contract.

mod colliders;

pub use colliders::{Collider, ColliderSet};

use bitflags::bitflags;
use gazekit_core::ObjectId;
use glam::Vec3;

bitflags! {
    /// Collision layers a collider can live on and a raycast can filter by.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LayerMask: u32 {
        /// Default layer for scene geometry.
        const DEFAULT = 1 << 0;
        /// Layer ignored by gaze raycasts unless explicitly requested.
        const IGNORE_RAYCAST = 1 << 1;
        /// World-space UI panels.
        const UI = 1 << 2;
        /// Interactive props.
        const PROPS = 1 << 3;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::DEFAULT
    }
}

/// Axis-aligned bounding box used for hit-testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.cmple(max).all());
        Self { min, max }
    }

    /// Create an AABB from center position and full size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Tests intersection with another AABB.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Whether `point` lies inside or on the box.
    pub fn contains(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    /// Slab test against a ray with a normalized direction.
    ///
    /// Returns the distance along the ray to the first intersection. When the
    /// origin is inside the box the exit distance is returned.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = ray.direction.recip();

        let t1 = (self.min - ray.origin) * inv_dir;
        let t2 = (self.max - ray.origin) * inv_dir;

        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();

        // Entire box behind the origin
        if tmax < 0.0 || tmin > tmax {
            return None;
        }

        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

/// Half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin in world space.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction` (falls back to -Z for a zero vector).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::NEG_Z),
        }
    }

    /// Point at `distance` along the ray.
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Closest intersection returned by a [`SceneRaycast`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Object owning the collider that was hit.
    pub object: ObjectId,
    /// World-space hit point.
    pub point: Vec3,
    /// Distance from the ray origin to `point`.
    pub distance: f32,
}

/// Generic scene raycast query.
pub trait SceneRaycast {
    /// Return the closest hit within `max_distance` on a layer in `filter`.
    fn raycast(&self, ray: &Ray, max_distance: f32, filter: LayerMask) -> Option<RayHit>;
}

/// Access to the hit-test geometry hosted by scene objects.
pub trait HitTestGeometry {
    /// Whether `object` carries a collider at all.
    fn has_collider(&self, object: ObjectId) -> bool;

    /// Current hit-test flag, `None` when the object has no collider.
    fn collider_enabled(&self, object: ObjectId) -> Option<bool>;

    /// Toggle whether the collider participates in raycasts.
    ///
    /// Returns `false` when the object has no collider.
    fn set_collider_enabled(&mut self, object: ObjectId, enabled: bool) -> bool;
}
