//! Single source of truth for shared constants. These values are used by
//! the engine, the scene backend, and the settings defaults.

/// Maximum number of render layers (mask bits in a u32).
pub const MAX_LAYERS: usize = 32;

/// Sight lines shorter than this are degenerate: the camera is effectively
/// inside the subject and the frame is treated as unoccluded.
pub const SIGHT_EPSILON: f32 = 0.01;

/// Offset applied along the ray when probing for the exit surface of a
/// single-hit occluder, so the probe does not re-hit the entry surface.
pub const SKIN_EPSILON: f32 = 1e-3;

/// Scale floor used when a transition starts from a fully inactive
/// indicator. Starting at exactly zero stalls the eased midpoint lerp.
pub const NEAR_ZERO_SCALE: f32 = 0.01;

/// Capacity of the stencil bounds parameter block (count + two parallel
/// vector arrays). Matches the fixed array size the material side binds.
pub const MAX_STENCIL_BOUNDS: usize = 16;

/// Default vertical offset from the subject origin to its head.
pub const DEFAULT_HEAD_HEIGHT: f32 = 1.0;

/// Default query radius. 0 = thin ray.
pub const DEFAULT_PROBE_RADIUS: f32 = 0.0;

/// Default base radius of the occlusion indicator volume.
pub const DEFAULT_INDICATOR_RADIUS: f32 = 1.0;

/// Default rate for the indicator midpoint lerp (per second).
pub const DEFAULT_MOVE_SMOOTHING: f32 = 10.0;

/// Default duration of the indicator pop-in transition, in seconds.
pub const DEFAULT_TRANSITION_DURATION: f32 = 0.25;

/// Default exponential rate for the chain boundary index (per second).
pub const DEFAULT_CHAIN_RATE: f32 = 12.0;

/// Default minimum occluder thickness. The estimator never reports less.
pub const DEFAULT_MIN_THICKNESS: f32 = 0.1;

/// Default name of the layer occluders are reassigned to.
pub const DEFAULT_OCCLUDABLE_LAYER: &str = "Occludable";
