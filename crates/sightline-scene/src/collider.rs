use glam::Vec3;
use sightline_core::layers::LayerId;
use sightline_core::types::ColliderId;

use crate::overlap::Aabb;

/// Collider geometry. Centers are world-space; there is no transform
/// hierarchy, the parent link exists only for ownership queries (a subject
/// must never be occluded by its own child colliders).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
}

#[derive(Debug, Clone)]
pub struct Collider {
    pub center: Vec3,
    pub shape: ColliderShape,
    pub layer: LayerId,
    pub parent: Option<ColliderId>,
}

impl Collider {
    /// World-space bounds, used by overlap queries and the stencil block.
    pub fn bounds(&self) -> Aabb {
        match self.shape {
            ColliderShape::Sphere { radius } => {
                Aabb::from_center_half_extents(self.center, Vec3::splat(radius))
            }
            ColliderShape::Box { half_extents } => {
                Aabb::from_center_half_extents(self.center, half_extents)
            }
        }
    }
}
