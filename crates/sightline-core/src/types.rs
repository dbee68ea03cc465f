use glam::Vec3;

use crate::constants::SIGHT_EPSILON;

/// Generation-tagged collider handle. Treated as opaque by the engine:
/// a handle whose slot has been freed or reused no longer resolves, so
/// destroyed colliders are never written through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColliderId {
    /// Slot index in the owning arena.
    pub index: u32,
    /// Generation of the slot at the time the handle was issued.
    pub generation: u32,
}

/// A single intersection reported by a geometric query.
///
/// Ordering across hits is NOT guaranteed by the backend; callers that
/// need entry/exit semantics must sort by `distance` themselves.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    pub collider: ColliderId,
    /// World-space surface point.
    pub point: Vec3,
    /// Distance from the query origin along the ray.
    pub distance: f32,
}

/// The line segment from the camera to the subject head, recomputed every
/// frame and never persisted.
#[derive(Debug, Clone, Copy)]
pub struct SightLine {
    pub origin: Vec3,
    pub target: Vec3,
    /// Unit direction from origin to target.
    pub direction: Vec3,
    pub distance: f32,
}

impl SightLine {
    /// Build the sight line between two points. Returns `None` when the
    /// points are closer than `SIGHT_EPSILON` (normalizing would be
    /// meaningless and the frame is treated as unoccluded).
    pub fn between(origin: Vec3, target: Vec3) -> Option<Self> {
        let delta = target - origin;
        let distance = delta.length();
        if distance < SIGHT_EPSILON {
            return None;
        }
        Some(Self {
            origin,
            target,
            direction: delta / distance,
            distance,
        })
    }

    /// World-space point at `t` units from the origin along the line.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// The tracked subject for one frame: the collider that must never occlude
/// itself, plus its world position (feet/root, before the head offset).
#[derive(Debug, Clone, Copy)]
pub struct SightTarget {
    pub collider: ColliderId,
    pub position: Vec3,
}
