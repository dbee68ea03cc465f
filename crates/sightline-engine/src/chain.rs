use sightline_core::math::{lerp, smoothing_factor};

/// Smoothed visibility boundary for an ordered chain of geometry segments.
///
/// Index 0 is the segment nearest the camera; the last index is nearest
/// the subject. Per tick the boundary moves exponentially toward the last
/// occluded segment (or the end of the chain when nothing is occluded),
/// and visibility is always a contiguous prefix `{0..=k}` — segments are
/// never toggled individually, so a continuous chain can't develop
/// see-through gaps while the boundary travels.
#[derive(Debug, Clone)]
pub struct ChainSmoother {
    /// Continuous boundary index; a segment is visible iff its index is
    /// at or below this value.
    smoothed: f32,
    len: usize,
    rate: f32,
}

impl ChainSmoother {
    /// A new chain starts fully visible.
    pub fn new(len: usize, rate: f32) -> Self {
        Self {
            smoothed: len.saturating_sub(1) as f32,
            len,
            rate,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current continuous boundary index.
    pub fn boundary(&self) -> f32 {
        self.smoothed
    }

    /// Advance one tick. `flags[i]` reports whether segment `i` is
    /// currently intersected by occluding geometry. A zero-length slice
    /// is a no-op; a changed length re-clamps the boundary.
    pub fn tick(&mut self, flags: &[bool], dt: f32) {
        self.len = flags.len();
        if self.len == 0 {
            return;
        }
        let full = (self.len - 1) as f32;
        let target = match flags.iter().rposition(|&occluded| occluded) {
            Some(last) => last as f32,
            None => full,
        };
        let factor = smoothing_factor(self.rate, dt);
        self.smoothed = lerp(self.smoothed, target, factor).clamp(0.0, full);
    }

    /// Whether segment `index` should be shown this frame.
    pub fn is_visible(&self, index: usize) -> bool {
        index < self.len && (index as f32) <= self.smoothed
    }

    /// Write the per-segment show/hide decisions into `out` (sized by the
    /// caller to the chain length).
    pub fn apply(&self, out: &mut [bool]) {
        for (i, shown) in out.iter_mut().enumerate() {
            *shown = self.is_visible(i);
        }
    }
}
