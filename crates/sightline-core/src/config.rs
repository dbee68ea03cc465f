use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHAIN_RATE, DEFAULT_HEAD_HEIGHT, DEFAULT_INDICATOR_RADIUS, DEFAULT_MIN_THICKNESS,
    DEFAULT_MOVE_SMOOTHING, DEFAULT_OCCLUDABLE_LAYER, DEFAULT_PROBE_RADIUS,
    DEFAULT_TRANSITION_DURATION,
};
use crate::layers::{LayerId, LayerMask};

/// Occlusion settings as authored in RON. Layer references are by name and
/// must be resolved against the layer table before the engine can run
/// (see sightline-config).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcclusionSettings {
    /// Vertical offset from the subject origin to its head.
    #[serde(default = "default_head_height")]
    pub head_height: f32,
    /// Query radius. 0 = thin ray, > 0 = swept volume.
    #[serde(default)]
    pub probe_radius: f32,
    /// Names of layers that may occlude. Empty = every layer.
    #[serde(default)]
    pub blocking_layers: Vec<String>,
    /// Name of the layer occluders are reassigned to.
    #[serde(default = "default_occludable_layer")]
    pub occludable_layer: String,
    /// Base radius of the indicator volume.
    #[serde(default = "default_indicator_radius")]
    pub indicator_radius: f32,
    /// Rate for the indicator midpoint lerp (per second).
    #[serde(default = "default_move_smoothing")]
    pub move_smoothing: f32,
    /// Duration of the indicator pop-in transition, in seconds.
    #[serde(default = "default_transition_duration")]
    pub transition_duration: f32,
    /// Exponential rate for the chain boundary index (per second).
    #[serde(default = "default_chain_rate")]
    pub chain_rate: f32,
    /// Minimum occluder thickness reported by the estimator.
    #[serde(default = "default_min_thickness")]
    pub min_thickness: f32,
}

fn default_head_height() -> f32 {
    DEFAULT_HEAD_HEIGHT
}

fn default_occludable_layer() -> String {
    DEFAULT_OCCLUDABLE_LAYER.to_string()
}

fn default_indicator_radius() -> f32 {
    DEFAULT_INDICATOR_RADIUS
}

fn default_move_smoothing() -> f32 {
    DEFAULT_MOVE_SMOOTHING
}

fn default_transition_duration() -> f32 {
    DEFAULT_TRANSITION_DURATION
}

fn default_chain_rate() -> f32 {
    DEFAULT_CHAIN_RATE
}

fn default_min_thickness() -> f32 {
    DEFAULT_MIN_THICKNESS
}

impl Default for OcclusionSettings {
    fn default() -> Self {
        Self {
            head_height: DEFAULT_HEAD_HEIGHT,
            probe_radius: DEFAULT_PROBE_RADIUS,
            blocking_layers: Vec::new(),
            occludable_layer: default_occludable_layer(),
            indicator_radius: DEFAULT_INDICATOR_RADIUS,
            move_smoothing: DEFAULT_MOVE_SMOOTHING,
            transition_duration: DEFAULT_TRANSITION_DURATION,
            chain_rate: DEFAULT_CHAIN_RATE,
            min_thickness: DEFAULT_MIN_THICKNESS,
        }
    }
}

/// Settings after layer-name resolution. This is what the engine consumes.
///
/// `occludable_layer` is `None` when the configured name did not resolve;
/// the sampler then runs with layer reassignment disabled rather than
/// failing (the warning is logged once at validation time).
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub head_height: f32,
    pub probe_radius: f32,
    pub blocking_mask: LayerMask,
    pub occludable_layer: Option<LayerId>,
    pub indicator_radius: f32,
    pub move_smoothing: f32,
    pub transition_duration: f32,
    pub chain_rate: f32,
    pub min_thickness: f32,
}

impl ResolvedSettings {
    /// Resolved form of the default settings, for tests and in-code setup
    /// where the layer ids are already known.
    pub fn with_layers(blocking_mask: LayerMask, occludable_layer: LayerId) -> Self {
        let defaults = OcclusionSettings::default();
        Self {
            head_height: defaults.head_height,
            probe_radius: defaults.probe_radius,
            blocking_mask,
            occludable_layer: Some(occludable_layer),
            indicator_radius: defaults.indicator_radius,
            move_smoothing: defaults.move_smoothing,
            transition_duration: defaults.transition_duration,
            chain_rate: defaults.chain_rate,
            min_thickness: defaults.min_thickness,
        }
    }
}
