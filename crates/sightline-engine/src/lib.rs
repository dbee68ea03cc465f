pub mod animator;
pub mod chain;
pub mod indicator;
pub mod ledger;
pub mod sampler;
pub mod stencil;
pub mod thickness;


use glam::Vec3;

use sightline_core::config::ResolvedSettings;
use sightline_core::query::{GeometricQuery, LayerAccess};
use sightline_core::types::SightTarget;

use indicator::{Indicator, IndicatorPose};
use sampler::{OcclusionSampler, OcclusionStatus};
use thickness::ThicknessProfile;

/// Everything one frame produced: the occlusion classification and, when
/// occluded, the span the indicator was sized from.
#[derive(Debug)]
pub struct FrameOutcome {
    pub status: OcclusionStatus,
    pub profile: Option<ThicknessProfile>,
}

/// Primary public struct for the sightline-engine crate: wires the
/// sampler, thickness estimation, and indicator into a single per-tick
/// call. Chain smoothing stays separate — chains are per-instance state
/// owned by whoever owns the segments.
///
/// Must run late in the tick, after the frame's camera and subject
/// transforms are final and before the render side reads layer
/// membership for culling.
#[derive(Debug)]
pub struct OcclusionSystem {
    sampler: OcclusionSampler,
    indicator: Indicator,
    min_thickness: f32,
}

impl OcclusionSystem {
    pub fn new(settings: ResolvedSettings) -> Self {
        let indicator = Indicator::new(&settings);
        let min_thickness = settings.min_thickness;
        Self {
            sampler: OcclusionSampler::new(settings),
            indicator,
            min_thickness,
        }
    }

    pub fn sampler(&self) -> &OcclusionSampler {
        &self.sampler
    }

    pub fn indicator_pose(&self) -> &IndicatorPose {
        self.indicator.pose()
    }

    /// Run one frame: classify, reconcile layers, size and ease the
    /// indicator.
    pub fn tick<S: GeometricQuery + LayerAccess>(
        &mut self,
        scene: &mut S,
        camera: Option<Vec3>,
        target: Option<SightTarget>,
        dt: f32,
    ) -> FrameOutcome {
        let status = self.sampler.sample(scene, camera, target);

        let (profile, direction) = match &status {
            OcclusionStatus::Occluded(occ) => (
                thickness::estimate(scene, &occ.sight, &occ.hits, self.min_thickness),
                occ.sight.direction,
            ),
            OcclusionStatus::Visible => (None, Vec3::Z),
        };

        self.indicator
            .update(profile.as_ref().map(|p| (p, direction)), dt);

        FrameOutcome { status, profile }
    }

    /// Teardown: restore every override and hide the indicator.
    pub fn shutdown<S: LayerAccess>(&mut self, scene: &mut S) {
        self.sampler.clear(scene);
        self.indicator.update(None, 0.0);
    }
}
