use glam::Vec3;

use sightline_config::defaults::load_default_settings;
use sightline_config::validator;
use sightline_core::layers::LayerMask;
use sightline_core::query::LayerAccess;
use sightline_engine::chain::ChainSmoother;
use sightline_engine::stencil::StencilBounds;
use sightline_engine::OcclusionSystem;
use sightline_scene::overlap::Aabb;

use crate::scenes;

/// How long and how fast to drive each scene.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub frames: u32,
    pub dt: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            dt: 1.0 / 60.0,
        }
    }
}

/// Deterministic per-scene statistics. The orbit is scripted, so two runs
/// of the same build must produce identical numbers; the report compares
/// them against a saved baseline.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RunResult {
    pub scene_name: String,
    pub frames: u32,
    pub occluded_frames: u32,
    pub max_ledger_entries: usize,
    pub max_stencil_volumes: usize,
    /// Lowest smoothed chain boundary seen (chain scenes only).
    pub min_chain_boundary: f32,
    /// Overrides still applied after shutdown. Always 0 on a healthy run.
    pub leaked_overrides: u32,
}

/// Drive one scene for `config.frames` ticks of a scripted camera orbit.
///
/// Tick order mirrors the integration contract: sample (late, after
/// transforms), then everything that reads layer membership — chain
/// flags, chain smoothing, stencil rebuild.
pub fn run_scene(name: &str, config: RunConfig) -> Option<RunResult> {
    let layers = scenes::standard_layers();
    let mut built = scenes::build(name, &layers)?;

    let settings = load_default_settings().expect("builtin settings parse");
    let validated = validator::resolve(&settings, &layers.table);
    for warning in &validated.warnings {
        log::warn!("{name}: {warning}");
    }

    let chain_rate = validated.settings.chain_rate;
    let mut system = OcclusionSystem::new(validated.settings);
    let mut smoother = ChainSmoother::new(built.segments.len(), chain_rate);
    let mut stencil = StencilBounds::new();
    let occludable_mask = LayerMask::NONE.with(layers.occludable);

    let mut occluded_frames = 0u32;
    let mut max_ledger = 0usize;
    let mut max_stencil = 0usize;
    let mut min_boundary = smoother.boundary();
    let mut flags = vec![false; built.segments.len()];

    for frame in 0..config.frames {
        let angle = frame as f32 * 0.02;
        let camera =
            built.target.position + Vec3::new(angle.sin() * 10.0, 1.0, -angle.cos() * 10.0);

        let outcome = system.tick(
            &mut built.scene,
            Some(camera),
            Some(built.target),
            config.dt,
        );
        if outcome.status.is_occluded() {
            occluded_frames += 1;
        }
        max_ledger = max_ledger.max(system.sampler().ledger().len());

        // Chain flags read the occludable layer the sampler just wrote.
        for (i, bounds) in built.segments.iter().enumerate() {
            flags[i] = built.scene.check_aabb(bounds, occludable_mask);
        }
        smoother.tick(&flags, config.dt);
        if !smoother.is_empty() {
            min_boundary = min_boundary.min(smoother.boundary());
        }

        // Stencil block tracks occludable volumes around the indicator.
        let pose = system.indicator_pose();
        if pose.active {
            let probe = Aabb::from_center_half_extents(pose.position, Vec3::splat(1.5));
            let ids = built.scene.overlap_aabb(&probe, occludable_mask);
            stencil.rebuild(ids.iter().filter_map(|&id| {
                built
                    .scene
                    .bounds_of(id)
                    .map(|b| (b.center(), b.half_extents()))
            }));
        } else {
            stencil.clear();
        }
        max_stencil = max_stencil.max(stencil.count());
    }

    // Teardown must leave no trace in the scene's layer state.
    system.shutdown(&mut built.scene);
    let leaked = built
        .tracked
        .iter()
        .filter(|(id, original)| built.scene.layer(*id) != Some(*original))
        .count() as u32;

    Some(RunResult {
        scene_name: name.to_string(),
        frames: config.frames,
        occluded_frames,
        max_ledger_entries: max_ledger,
        max_stencil_volumes: max_stencil,
        min_chain_boundary: min_boundary,
        leaked_overrides: leaked,
    })
}
