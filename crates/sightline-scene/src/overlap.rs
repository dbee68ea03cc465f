use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let he = half_extents.abs();
        Self {
            min: center - he,
            max: center + he,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Grow (positive) or shrink (negative) by `amount` on every side.
    /// Shrinking never inverts the box.
    pub fn inflate(&self, amount: f32) -> Self {
        let he = (self.half_extents() + Vec3::splat(amount)).max(Vec3::ZERO);
        Self::from_center_half_extents(self.center(), he)
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Closest point inside the box to `p`.
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min, self.max)
    }
}

/// Sphere vs AABB overlap test (closest-point distance).
pub fn sphere_intersects_aabb(center: Vec3, radius: f32, aabb: &Aabb) -> bool {
    aabb.closest_point(center).distance_squared(center) <= radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_center_half_extents(Vec3::new(1.5, 0.0, 0.0), Vec3::ONE);
        let c = Aabb::from_center_half_extents(Vec3::new(5.0, 0.0, 0.0), Vec3::ONE);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        // Touching faces count as overlap.
        let d = Aabb::from_center_half_extents(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE);
        assert!(a.intersects(&d));
    }

    #[test]
    fn test_inflate_and_shrink() {
        let a = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let grown = a.inflate(0.5);
        assert_eq!(grown.half_extents(), Vec3::splat(1.5));
        // Shrinking past zero clamps instead of inverting min/max.
        let collapsed = a.inflate(-2.0);
        assert_eq!(collapsed.half_extents(), Vec3::ZERO);
    }

    #[test]
    fn test_sphere_vs_aabb() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        assert!(sphere_intersects_aabb(Vec3::new(1.5, 0.0, 0.0), 0.6, &aabb));
        assert!(!sphere_intersects_aabb(Vec3::new(1.5, 0.0, 0.0), 0.4, &aabb));
        // Sphere center inside the box.
        assert!(sphere_intersects_aabb(Vec3::ZERO, 0.1, &aabb));
    }
}
