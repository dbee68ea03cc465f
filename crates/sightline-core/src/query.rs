//! Seams between the occlusion engine and the engine runtime it runs
//! inside. The engine only ever talks to the physics backend and the
//! render-layer store through these two traits; `sightline-scene` provides
//! the in-memory implementation used by tests and the harness.

use glam::Vec3;

use crate::layers::{LayerId, LayerMask};
use crate::types::{ColliderId, RayHit};

/// Synchronous geometric query backend.
///
/// Queries are idempotent and side-effect free. Hit ordering is not
/// guaranteed; callers sort by distance when they need entry/exit
/// semantics.
pub trait GeometricQuery {
    /// All intersections along a ray (radius 0) or swept sphere
    /// (radius > 0) from `origin` along `direction`, within
    /// `max_distance`, against colliders whose layer is in `mask`.
    /// Casts that start inside a volume report no entry hit for it.
    fn cast_all(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        radius: f32,
        mask: LayerMask,
    ) -> Vec<RayHit>;

    /// First surface crossing of a single collider along a thin ray.
    /// From inside the collider this is its exit surface, which is what
    /// the thickness probe needs. `None` when the collider is stale or
    /// the ray misses within `max_distance`.
    fn cast_collider(
        &self,
        collider: ColliderId,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit>;

    /// Whether `collider` sits under `ancestor` in the scene hierarchy.
    /// Used to keep the subject's own colliders out of its occluder set.
    /// False when either handle is stale.
    fn is_descendant_of(&self, collider: ColliderId, ancestor: ColliderId) -> bool;
}

/// Render-layer membership store. Both operations must be cheap; the
/// sampler calls them once per occluder per frame.
pub trait LayerAccess {
    /// Current layer of a collider, or `None` when the handle is stale.
    fn layer(&self, collider: ColliderId) -> Option<LayerId>;

    /// Assign a collider to a layer. Returns false (and writes nothing)
    /// when the handle is stale. Idempotent.
    fn set_layer(&mut self, collider: ColliderId, layer: LayerId) -> bool;
}
