use glam::Vec3;

use sightline_core::layers::{LayerId, LayerTable};
use sightline_core::types::{ColliderId, SightTarget};
use sightline_scene::overlap::Aabb;
use sightline_scene::Scene;

/// Layer setup every harness scene runs under.
pub struct SceneLayers {
    pub table: LayerTable,
    pub default: LayerId,
    pub walls: LayerId,
    pub occludable: LayerId,
}

/// Register the standard layer set. Panics only on programmer error
/// (duplicate registration), which is fine in the harness binary.
pub fn standard_layers() -> SceneLayers {
    let mut table = LayerTable::new();
    let default = table.register("Default").expect("layer table");
    let walls = table.register("Walls").expect("layer table");
    let occludable = table.register("Occludable").expect("layer table");
    SceneLayers {
        table,
        default,
        walls,
        occludable,
    }
}

/// A constructed scene plus everything the runner needs to drive and
/// audit it.
pub struct BuiltScene {
    pub scene: Scene,
    pub target: SightTarget,
    /// Obstacles and their authored layers, for the end-of-run leak audit.
    pub tracked: Vec<(ColliderId, LayerId)>,
    /// Chain segment bounds, nearest-camera first. Empty = no chain.
    pub segments: Vec<Aabb>,
}

/// Names of the standard scene suite.
pub fn standard_scenes() -> Vec<&'static str> {
    vec!["wall", "pillars", "pipe_chain"]
}

/// Build a scene by name. The subject stands 10 units down +Z with a
/// child head collider, so every scene also exercises self-exclusion.
pub fn build(name: &str, layers: &SceneLayers) -> Option<BuiltScene> {
    let mut scene = Scene::new();
    let subject_pos = Vec3::new(0.0, 0.0, 10.0);
    let body = scene.add_sphere(subject_pos + Vec3::Y, 0.5, layers.default);
    let head = scene.add_sphere(subject_pos + Vec3::Y * 1.8, 0.3, layers.default);
    scene.set_parent(head, body);
    let target = SightTarget {
        collider: body,
        position: subject_pos,
    };

    let mut tracked = Vec::new();
    let mut segments = Vec::new();

    match name {
        "wall" => {
            let wall = scene.add_box(
                Vec3::new(0.0, 1.0, 5.0),
                Vec3::new(4.0, 3.0, 0.3),
                layers.walls,
            );
            tracked.push((wall, layers.walls));
        }
        "pillars" => {
            // A ring of pillars around the subject; the orbiting camera
            // sweeps the sight line through them.
            for i in 0..8 {
                let angle = i as f32 * std::f32::consts::TAU / 8.0;
                let layer = if i % 2 == 0 { layers.walls } else { layers.default };
                let pillar = scene.add_box(
                    subject_pos + Vec3::new(angle.cos() * 6.0, 1.5, angle.sin() * 6.0),
                    Vec3::new(0.4, 2.0, 0.4),
                    layer,
                );
                tracked.push((pillar, layer));
            }
        }
        "pipe_chain" => {
            let wall = scene.add_box(
                Vec3::new(0.0, 1.0, 5.0),
                Vec3::new(0.4, 2.0, 0.4),
                layers.walls,
            );
            tracked.push((wall, layers.walls));
            // Five pipe segments running camera -> subject.
            for i in 0..5 {
                segments.push(Aabb::from_center_half_extents(
                    Vec3::new(0.0, 1.0, 2.0 * i as f32 + 1.0),
                    Vec3::new(0.5, 0.5, 1.0),
                ));
            }
        }
        _ => return None,
    }

    Some(BuiltScene {
        scene,
        target,
        tracked,
        segments,
    })
}
