#![warn(missing_docs)]
//! Gaze interaction for 3D scenes.
//!
//! A single [`Interactor`] casts a ray along the viewer's forward direction
//! every tick, resolves at most one [`Interactable`] target, measures how long
//! the gaze dwells on it and activates it once the configured hold time has
//! elapsed. Visual feedback is pushed to a [`ReticleSink`]; geometry queries go
//! through [`gazekit_physics::SceneRaycast`].
//!
//! # Example
//!
//! ```rust
//! use gazekit_core::{InteractorId, ObjectId, SimClock};
//! use gazekit_interaction::{
//!     Interactable, InteractableConfig, InteractableSet, Interactor, InteractorConfig,
//!     NullReticle,
//! };
//! use gazekit_physics::{Aabb, Collider, ColliderSet, Ray};
//! use glam::Vec3;
//!
//! let mut colliders = ColliderSet::new();
//! let panel = ObjectId(1);
//! colliders.insert(panel, Collider::new(Aabb::from_center_size(Vec3::new(0.0, 0.0, -3.0), Vec3::ONE)));
//!
//! let mut targets = InteractableSet::new();
//! targets.insert(Interactable::attach(panel, &InteractableConfig::default(), &colliders)?);
//!
//! let mut interactor = Interactor::with_reticle(
//!     InteractorId(0),
//!     InteractorConfig::default(),
//!     Box::new(NullReticle),
//! )?;
//!
//! let mut clock = SimClock::default();
//! let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
//! for _ in 0..40 {
//!     let now = clock.step();
//!     interactor.tick(now, &ray, &colliders, &mut targets);
//!     targets.update(now);
//! }
//! assert!(targets.get(panel).map_or(false, |t| t.is_activated()));
//! # Ok::<(), gazekit_interaction::InteractionError>(())
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod interactable;
pub mod interactor;
pub mod reticle;
pub mod set;
pub mod signal;
pub mod timer;

// Re-export commonly used types
pub use config::{InteractableConfig, InteractorConfig};
pub use error::InteractionError;
pub use events::{GazeEvent, InteractableEvents};
pub use interactable::Interactable;
pub use interactor::{Interactor, TickOutcome};
pub use reticle::{NullReticle, ReticleProvider, ReticleSink};
pub use set::InteractableSet;
pub use signal::{Signal, SubscriptionId};
pub use timer::{DelayedTask, TaskHandle};
