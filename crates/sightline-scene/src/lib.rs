pub mod arena;
pub mod collider;
pub mod overlap;
pub mod raycast;

use glam::Vec3;
use sightline_core::layers::{LayerId, LayerMask};
use sightline_core::query::{GeometricQuery, LayerAccess};
use sightline_core::types::{ColliderId, RayHit};

use arena::Arena;
use collider::{Collider, ColliderShape};
use overlap::Aabb;
use raycast::collider_span;

/// In-memory scene of primitive colliders. Stands in for the engine-side
/// physics world and render-layer store: it implements `GeometricQuery`
/// and `LayerAccess`, which is all the occlusion engine ever sees.
#[derive(Debug, Default)]
pub struct Scene {
    colliders: Arena,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32, layer: LayerId) -> ColliderId {
        self.colliders.insert(Collider {
            center,
            shape: ColliderShape::Sphere { radius },
            layer,
            parent: None,
        })
    }

    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3, layer: LayerId) -> ColliderId {
        self.colliders.insert(Collider {
            center,
            shape: ColliderShape::Box { half_extents },
            layer,
            parent: None,
        })
    }

    /// Attach `child` under `parent`. Refused (returning false) when either
    /// handle is stale or the link would create a cycle.
    pub fn set_parent(&mut self, child: ColliderId, parent: ColliderId) -> bool {
        if child == parent || !self.colliders.contains(child) || !self.colliders.contains(parent) {
            return false;
        }
        if self.is_descendant_of(parent, child) {
            log::warn!(
                "refusing parent link {parent:?} -> {child:?}: would create a cycle"
            );
            return false;
        }
        if let Some(c) = self.colliders.get_mut(child) {
            c.parent = Some(parent);
            return true;
        }
        false
    }

    /// Destroy a collider. Handles held elsewhere go stale; children keep
    /// their (now stale) parent link, which simply resolves to nothing.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        self.colliders.remove(id).is_some()
    }

    pub fn contains(&self, id: ColliderId) -> bool {
        self.colliders.contains(id)
    }

    pub fn set_center(&mut self, id: ColliderId, center: Vec3) -> bool {
        if let Some(c) = self.colliders.get_mut(id) {
            c.center = center;
            return true;
        }
        false
    }

    pub fn center_of(&self, id: ColliderId) -> Option<Vec3> {
        self.colliders.get(id).map(|c| c.center)
    }

    pub fn bounds_of(&self, id: ColliderId) -> Option<Aabb> {
        self.colliders.get(id).map(Collider::bounds)
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Ids of mask-matching colliders whose bounds intersect `aabb`.
    pub fn overlap_aabb(&self, aabb: &Aabb, mask: LayerMask) -> Vec<ColliderId> {
        self.colliders
            .iter()
            .filter(|(_, c)| mask.contains(c.layer) && c.bounds().intersects(aabb))
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether any mask-matching collider intersects `aabb`.
    pub fn check_aabb(&self, aabb: &Aabb, mask: LayerMask) -> bool {
        self.colliders
            .iter()
            .any(|(_, c)| mask.contains(c.layer) && c.bounds().intersects(aabb))
    }
}

impl GeometricQuery for Scene {
    fn cast_all(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        radius: f32,
        mask: LayerMask,
    ) -> Vec<RayHit> {
        // Hits come back in arena slot order, NOT sorted by distance.
        let mut hits = Vec::new();
        for (id, collider) in self.colliders.iter() {
            if !mask.contains(collider.layer) {
                continue;
            }
            if let Some((t_enter, _)) = collider_span(collider, origin, direction, radius) {
                if t_enter > 0.0 && t_enter <= max_distance {
                    hits.push(RayHit {
                        collider: id,
                        point: origin + direction * t_enter,
                        distance: t_enter,
                    });
                }
            }
        }
        hits
    }

    fn cast_collider(
        &self,
        collider: ColliderId,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit> {
        let c = self.colliders.get(collider)?;
        let (t_enter, t_exit) = collider_span(c, origin, direction, 0.0)?;
        // First positive crossing: entry from outside, exit from inside.
        let t = if t_enter > 0.0 {
            t_enter
        } else if t_exit > 0.0 {
            t_exit
        } else {
            return None;
        };
        if t > max_distance {
            return None;
        }
        Some(RayHit {
            collider,
            point: origin + direction * t,
            distance: t,
        })
    }

    fn is_descendant_of(&self, collider: ColliderId, ancestor: ColliderId) -> bool {
        let mut current = match self.colliders.get(collider) {
            Some(c) => c.parent,
            None => return false,
        };
        // Parent chains are acyclic (set_parent refuses cycles); the hop
        // cap only guards against stale-handle weirdness.
        let mut hops = self.colliders.len();
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = match self.colliders.get(id) {
                Some(c) => c.parent,
                None => return false,
            };
            if hops == 0 {
                return false;
            }
            hops -= 1;
        }
        false
    }
}

impl LayerAccess for Scene {
    fn layer(&self, collider: ColliderId) -> Option<LayerId> {
        self.colliders.get(collider).map(|c| c.layer)
    }

    fn set_layer(&mut self, collider: ColliderId, layer: LayerId) -> bool {
        if let Some(c) = self.colliders.get_mut(collider) {
            c.layer = layer;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: LayerId = LayerId(0);
    const WALLS: LayerId = LayerId(1);

    #[test]
    fn test_cast_all_unsorted_but_complete() {
        let mut scene = Scene::new();
        // Inserted far-first so arena order differs from distance order.
        let far = scene.add_box(Vec3::new(0.0, 0.0, 8.0), Vec3::ONE, DEFAULT);
        let near = scene.add_sphere(Vec3::new(0.0, 0.0, 3.0), 1.0, DEFAULT);

        let hits = scene.cast_all(Vec3::ZERO, Vec3::Z, 20.0, 0.0, LayerMask::ALL);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].collider, far);
        assert_eq!(hits[1].collider, near);
        assert!((hits[1].distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_cast_all_respects_mask_and_range() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::new(0.0, 0.0, 3.0), 1.0, DEFAULT);
        scene.add_sphere(Vec3::new(0.0, 0.0, 6.0), 1.0, WALLS);

        let walls_only = LayerMask::NONE.with(WALLS);
        let hits = scene.cast_all(Vec3::ZERO, Vec3::Z, 20.0, 0.0, walls_only);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 5.0).abs() < 1e-5);

        // Out of range.
        let hits = scene.cast_all(Vec3::ZERO, Vec3::Z, 4.0, 0.0, LayerMask::ALL);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_cast_from_inside_reports_no_entry() {
        let mut scene = Scene::new();
        scene.add_sphere(Vec3::ZERO, 2.0, DEFAULT);
        let hits = scene.cast_all(Vec3::ZERO, Vec3::Z, 10.0, 0.0, LayerMask::ALL);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_cast_collider_exit_from_inside() {
        let mut scene = Scene::new();
        let id = scene.add_box(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE, DEFAULT);
        // Probe from inside the box: first crossing is the exit at z = 6.
        let hit = scene
            .cast_collider(id, Vec3::new(0.0, 0.0, 5.1), Vec3::Z, 10.0)
            .unwrap();
        assert!((hit.distance - 0.9).abs() < 1e-5);
        assert!((hit.point.z - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_cast_collider_stale_handle() {
        let mut scene = Scene::new();
        let id = scene.add_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0, DEFAULT);
        scene.remove(id);
        assert!(scene.cast_collider(id, Vec3::ZERO, Vec3::Z, 10.0).is_none());
    }

    #[test]
    fn test_layer_access_stale_safe() {
        let mut scene = Scene::new();
        let id = scene.add_sphere(Vec3::ZERO, 1.0, DEFAULT);
        assert_eq!(scene.layer(id), Some(DEFAULT));
        assert!(scene.set_layer(id, WALLS));
        assert_eq!(scene.layer(id), Some(WALLS));

        scene.remove(id);
        assert_eq!(scene.layer(id), None);
        assert!(!scene.set_layer(id, DEFAULT));
    }

    #[test]
    fn test_descendant_chain() {
        let mut scene = Scene::new();
        let root = scene.add_sphere(Vec3::ZERO, 1.0, DEFAULT);
        let torso = scene.add_sphere(Vec3::Y, 0.5, DEFAULT);
        let head = scene.add_sphere(Vec3::Y * 2.0, 0.3, DEFAULT);
        assert!(scene.set_parent(torso, root));
        assert!(scene.set_parent(head, torso));

        assert!(scene.is_descendant_of(head, root));
        assert!(scene.is_descendant_of(torso, root));
        assert!(!scene.is_descendant_of(root, head));
        // Strict: a collider is not its own descendant.
        assert!(!scene.is_descendant_of(root, root));
        // Cycles are refused.
        assert!(!scene.set_parent(root, head));
    }

    #[test]
    fn test_overlap_queries() {
        let mut scene = Scene::new();
        let inside = scene.add_sphere(Vec3::new(0.5, 0.0, 0.0), 0.4, DEFAULT);
        scene.add_sphere(Vec3::new(10.0, 0.0, 0.0), 0.4, DEFAULT);

        let probe = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let found = scene.overlap_aabb(&probe, LayerMask::ALL);
        assert_eq!(found, vec![inside]);
        assert!(scene.check_aabb(&probe, LayerMask::ALL));
        assert!(!scene.check_aabb(&probe, LayerMask::NONE.with(WALLS)));
    }
}
