use glam::Vec3;

use sightline_core::constants::SKIN_EPSILON;
use sightline_core::query::GeometricQuery;
use sightline_core::types::{RayHit, SightLine};

/// Entry/exit pair and scalar thickness of the occluding span, used to
/// size the indicator volume.
#[derive(Debug, Clone, Copy)]
pub struct ThicknessProfile {
    pub entry: Vec3,
    pub exit: Vec3,
    pub midpoint: Vec3,
    /// Always >= the configured minimum.
    pub thickness: f32,
}

/// Derive the occluding span from a sorted hit set.
///
/// With two or more hits the entry and exit are the nearest and farthest
/// points. With exactly one hit the exit is probed by a secondary cast
/// through the same collider, fired from just past the entry so it finds
/// the far surface instead of re-hitting the near one; if the probe finds
/// nothing (degenerate geometry, exit beyond the subject) the exit falls
/// back to entry + direction * min_thickness.
///
/// Returns `None` only for an empty hit set.
pub fn estimate<S: GeometricQuery>(
    scene: &S,
    sight: &SightLine,
    hits: &[RayHit],
    min_thickness: f32,
) -> Option<ThicknessProfile> {
    let first = hits.first()?;

    let exit = if hits.len() >= 2 {
        hits[hits.len() - 1].point
    } else {
        let probe_origin = first.point + sight.direction * SKIN_EPSILON;
        let remaining = (sight.distance - first.distance - SKIN_EPSILON).max(0.0);
        match scene.cast_collider(first.collider, probe_origin, sight.direction, remaining) {
            Some(hit) => hit.point,
            None => first.point + sight.direction * min_thickness,
        }
    };

    let thickness = first.point.distance(exit).max(min_thickness);
    Some(ThicknessProfile {
        entry: first.point,
        exit,
        midpoint: (first.point + exit) * 0.5,
        thickness,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::layers::{LayerId, LayerMask};
    use sightline_scene::Scene;

    const MIN: f32 = 0.1;

    fn sight_10() -> SightLine {
        SightLine::between(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0)).unwrap()
    }

    fn sorted_hits(scene: &Scene, sight: &SightLine) -> Vec<RayHit> {
        let mut hits = scene.cast_all(sight.origin, sight.direction, sight.distance, 0.0, LayerMask::ALL);
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    #[test]
    fn test_two_hits_span() {
        let mut scene = Scene::new();
        scene.add_box(Vec3::new(0.0, 0.0, 3.0), Vec3::new(1.0, 1.0, 0.5), LayerId(0));
        scene.add_box(Vec3::new(0.0, 0.0, 7.0), Vec3::new(1.0, 1.0, 0.5), LayerId(0));
        let sight = sight_10();
        let hits = sorted_hits(&scene, &sight);
        assert_eq!(hits.len(), 2);

        let profile = estimate(&scene, &sight, &hits, MIN).unwrap();
        assert!((profile.entry.z - 2.5).abs() < 1e-4);
        assert!((profile.exit.z - 6.5).abs() < 1e-4);
        assert!((profile.thickness - 4.0).abs() < 1e-4);
        assert!((profile.midpoint.z - 4.5).abs() < 1e-4);
    }

    #[test]
    fn test_single_hit_probes_exit_through_collider() {
        let mut scene = Scene::new();
        // One wall from z=3.5 to z=4.5: entry 3.5, probed exit 4.5.
        scene.add_box(Vec3::new(0.0, 0.0, 4.0), Vec3::new(1.0, 1.0, 0.5), LayerId(0));
        let sight = sight_10();
        let hits = sorted_hits(&scene, &sight);
        assert_eq!(hits.len(), 1);

        let profile = estimate(&scene, &sight, &hits, MIN).unwrap();
        assert!((profile.entry.z - 3.5).abs() < 1e-4);
        assert!((profile.exit.z - 4.5).abs() < 1e-3);
        assert!((profile.thickness - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_single_hit_fallback_minimum() {
        let mut scene = Scene::new();
        // Wall whose far face lies beyond the subject: the probe range
        // ends at the sight distance, so no exit is discoverable.
        scene.add_box(Vec3::new(0.0, 0.0, 9.0), Vec3::new(1.0, 1.0, 5.0), LayerId(0));
        let sight = sight_10();
        let hits = sorted_hits(&scene, &sight);
        assert_eq!(hits.len(), 1);

        let profile = estimate(&scene, &sight, &hits, MIN).unwrap();
        assert!((profile.entry.z - 4.0).abs() < 1e-4);
        assert!((profile.thickness - MIN).abs() < 1e-4);
        assert!((profile.exit.z - (4.0 + MIN)).abs() < 1e-3);
    }

    #[test]
    fn test_thickness_floor() {
        let mut scene = Scene::new();
        // Paper-thin wall: actual span is far below the floor.
        scene.add_box(Vec3::new(0.0, 0.0, 4.0), Vec3::new(1.0, 1.0, 0.001), LayerId(0));
        let sight = sight_10();
        let hits = sorted_hits(&scene, &sight);

        let profile = estimate(&scene, &sight, &hits, MIN).unwrap();
        assert!(profile.thickness >= MIN);
    }

    #[test]
    fn test_empty_hits() {
        let scene = Scene::new();
        let sight = sight_10();
        assert!(estimate(&scene, &sight, &[], MIN).is_none());
    }
}
