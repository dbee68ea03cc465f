use std::collections::HashSet;

use glam::Vec3;

use sightline_core::config::ResolvedSettings;
use sightline_core::query::{GeometricQuery, LayerAccess};
use sightline_core::types::{ColliderId, RayHit, SightLine, SightTarget};

use crate::ledger::LayerLedger;

/// Classification of one frame.
#[derive(Debug, Clone)]
pub enum OcclusionStatus {
    /// Nothing between camera and subject head (or the sampler was
    /// disabled for this frame).
    Visible,
    /// At least one occluder between the endpoints.
    Occluded(OcclusionHits),
}

impl OcclusionStatus {
    pub fn is_occluded(&self) -> bool {
        matches!(self, OcclusionStatus::Occluded(_))
    }
}

/// The frame's occluder set, sorted ascending by distance. Ties keep the
/// backend's order; which of two exactly-coincident surfaces sorts first
/// is unspecified.
#[derive(Debug, Clone)]
pub struct OcclusionHits {
    pub sight: SightLine,
    /// Nearest hit (where the sight line enters occluding geometry).
    pub entry: RayHit,
    /// Farthest hit (where it leaves the last occluder).
    pub exit: RayHit,
    /// Every interior hit, sorted ascending by distance. Never empty.
    pub hits: Vec<RayHit>,
}

/// Per-frame occlusion classification and layer reassignment.
///
/// Owns the `LayerLedger` exclusively. Runs once per tick, after the
/// frame's transforms are final and before anything reads layer
/// membership for culling. The only side effects are layer writes through
/// `LayerAccess`.
#[derive(Debug)]
pub struct OcclusionSampler {
    settings: ResolvedSettings,
    ledger: LayerLedger,
    warned_disabled: bool,
}

impl OcclusionSampler {
    pub fn new(settings: ResolvedSettings) -> Self {
        Self {
            settings,
            ledger: LayerLedger::new(),
            warned_disabled: false,
        }
    }

    pub fn settings(&self) -> &ResolvedSettings {
        &self.settings
    }

    pub fn ledger(&self) -> &LayerLedger {
        &self.ledger
    }

    /// Classify one frame and reconcile the ledger.
    ///
    /// A missing camera, subject, or occludable layer disables the frame:
    /// reported visible, no layer writes, warned once per sampler.
    pub fn sample<S: GeometricQuery + LayerAccess>(
        &mut self,
        scene: &mut S,
        camera: Option<Vec3>,
        target: Option<SightTarget>,
    ) -> OcclusionStatus {
        let (Some(camera), Some(target), Some(occludable)) =
            (camera, target, self.settings.occludable_layer)
        else {
            if !self.warned_disabled {
                log::warn!(
                    "occlusion sampler disabled: camera, subject, or occludable layer unset"
                );
                self.warned_disabled = true;
            }
            return OcclusionStatus::Visible;
        };

        // Destroyed colliders drop out before any restore pass writes.
        self.ledger.purge_invalid(scene);

        let head = target.position + Vec3::Y * self.settings.head_height;
        let Some(sight) = SightLine::between(camera, head) else {
            // Camera inside the subject: nothing can be between them.
            self.ledger.restore_all(scene);
            return OcclusionStatus::Visible;
        };

        let mut hits = scene.cast_all(
            sight.origin,
            sight.direction,
            sight.distance,
            self.settings.probe_radius,
            self.settings.blocking_mask,
        );

        // The subject never occludes itself, and a hit exactly at either
        // endpoint is not an occlusion.
        hits.retain(|h| {
            h.collider != target.collider
                && !scene.is_descendant_of(h.collider, target.collider)
                && h.distance > 0.0
                && h.distance < sight.distance
        });

        if hits.is_empty() {
            self.ledger.restore_all(scene);
            return OcclusionStatus::Visible;
        }

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));

        let keep: HashSet<ColliderId> = hits.iter().map(|h| h.collider).collect();
        for hit in &hits {
            self.ledger.override_layer(scene, hit.collider, occludable);
        }
        self.ledger.restore_all_except(scene, &keep);

        let entry = hits[0];
        let exit = hits[hits.len() - 1];
        OcclusionStatus::Occluded(OcclusionHits {
            sight,
            entry,
            exit,
            hits,
        })
    }

    /// Restore every override and empty the ledger (shutdown or teardown
    /// path; also what a degenerate frame does internally).
    pub fn clear<S: LayerAccess>(&mut self, scene: &mut S) {
        self.ledger.purge_invalid(scene);
        self.ledger.restore_all(scene);
    }
}
