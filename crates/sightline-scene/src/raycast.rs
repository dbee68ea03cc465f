//! Ray/shape intersection spans. All functions return the unclamped
//! parametric interval `(t_enter, t_exit)` of the ray against the shape,
//! leaving range and sidedness policy to the caller: the scene's
//! `cast_all` accepts only entries with `t_enter > 0` (one-sided surfaces,
//! a cast starting inside a volume reports no entry), while the
//! single-collider probe takes the first positive crossing, which from
//! inside a volume is the exit surface.

use glam::Vec3;

use crate::collider::{Collider, ColliderShape};

const PARALLEL_EPSILON: f32 = 1e-8;

/// Intersection span of a ray with a sphere. `None` on a clean miss.
pub fn ray_sphere_span(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<(f32, f32)> {
    let oc = origin - center;
    let b = oc.dot(direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    Some((-b - sq, -b + sq))
}

/// Intersection span of a ray with an AABB (slab method). `None` on a miss,
/// including rays parallel to a slab that lie outside it.
pub fn ray_aabb_span(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<(f32, f32)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < PARALLEL_EPSILON {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let mut t0 = (min[axis] - o) * inv;
        let mut t1 = (max[axis] - o) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_enter = t_enter.max(t0);
        t_exit = t_exit.min(t1);
        if t_enter > t_exit {
            return None;
        }
    }
    Some((t_enter, t_exit))
}

/// Intersection span of a ray with a collider, optionally inflated by a
/// probe radius for swept-volume casts. Spheres inflate exactly; boxes
/// inflate per axis (Minkowski approximation without rounded corners).
pub fn collider_span(
    collider: &Collider,
    origin: Vec3,
    direction: Vec3,
    inflate: f32,
) -> Option<(f32, f32)> {
    match collider.shape {
        ColliderShape::Sphere { radius } => {
            ray_sphere_span(origin, direction, collider.center, radius + inflate)
        }
        ColliderShape::Box { half_extents } => {
            let he = half_extents + Vec3::splat(inflate);
            ray_aabb_span(origin, direction, collider.center - he, collider.center + he)
        }
    }
}
