use glam::Vec3;

use sightline_core::constants::MAX_STENCIL_BOUNDS;

/// Fixed-capacity parameter block for the stencil cutout material: a
/// count plus two parallel arrays of world-space centers and half-extents
/// of the bounding volumes intersecting the probe region. Mirrors the
/// array uniforms the material side binds, so capacity is hard.
#[derive(Debug, Clone)]
pub struct StencilBounds {
    count: usize,
    centers: [Vec3; MAX_STENCIL_BOUNDS],
    half_extents: [Vec3; MAX_STENCIL_BOUNDS],
}

impl Default for StencilBounds {
    fn default() -> Self {
        Self {
            count: 0,
            centers: [Vec3::ZERO; MAX_STENCIL_BOUNDS],
            half_extents: [Vec3::ZERO; MAX_STENCIL_BOUNDS],
        }
    }
}

impl StencilBounds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refill the block from this frame's intersecting bounds. Entries
    /// past capacity are dropped, with one log line per rebuild.
    pub fn rebuild<I>(&mut self, bounds: I)
    where
        I: IntoIterator<Item = (Vec3, Vec3)>,
    {
        self.count = 0;
        let mut dropped = 0usize;
        for (center, half_extents) in bounds {
            if self.count < MAX_STENCIL_BOUNDS {
                self.centers[self.count] = center;
                self.half_extents[self.count] = half_extents;
                self.count += 1;
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            log::warn!(
                "stencil bounds block full: dropped {dropped} of {} volumes",
                self.count + dropped
            );
        }
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Centers of the active entries.
    pub fn centers(&self) -> &[Vec3] {
        &self.centers[..self.count]
    }

    /// Half-extents of the active entries.
    pub fn half_extents(&self) -> &[Vec3] {
        &self.half_extents[..self.count]
    }
}

/// Parameters for the sphere-stencil edge material: the indicator sphere
/// in world space plus the extra rim thickness drawn around its edge.
#[derive(Debug, Clone, Copy)]
pub struct SphereStencilParams {
    pub center: Vec3,
    /// World-space radius, scale already applied.
    pub radius: f32,
    pub edge_thickness: f32,
}

impl SphereStencilParams {
    /// Build from a local-space sphere under a (possibly non-uniform)
    /// world scale. The largest scale axis wins, matching how the
    /// collider itself scales.
    pub fn from_sphere(center: Vec3, local_radius: f32, world_scale: Vec3, edge_thickness: f32) -> Self {
        Self {
            center,
            radius: local_radius * world_scale.abs().max_element(),
            edge_thickness,
        }
    }
}
