use sightline_core::config::{OcclusionSettings, ResolvedSettings};
use sightline_core::constants::{
    DEFAULT_CHAIN_RATE, DEFAULT_HEAD_HEIGHT, DEFAULT_INDICATOR_RADIUS, DEFAULT_MIN_THICKNESS,
    DEFAULT_MOVE_SMOOTHING, DEFAULT_TRANSITION_DURATION,
};
use sightline_core::layers::{LayerMask, LayerTable};

/// Resolution output: the engine-ready settings plus every warning the
/// document produced. Warnings are advisory; resolution always succeeds,
/// degrading to safe fallbacks (the tick loop must never be blocked by a
/// bad settings file).
#[derive(Debug)]
pub struct ValidatedSettings {
    pub settings: ResolvedSettings,
    pub warnings: Vec<String>,
}

/// Resolve layer names against the table and clamp scalars into range.
///
/// An unresolved occludable layer disables layer reassignment for the
/// sampler instance and is logged here, once, at startup.
pub fn resolve(settings: &OcclusionSettings, layers: &LayerTable) -> ValidatedSettings {
    let mut warnings = Vec::new();

    let blocking_mask = if settings.blocking_layers.is_empty() {
        // Empty list = everything may occlude.
        LayerMask::ALL
    } else {
        let mut mask = LayerMask::NONE;
        for name in &settings.blocking_layers {
            match layers.id_of(name) {
                Some(id) => mask = mask.with(id),
                None => warnings.push(format!("unknown blocking layer '{name}', skipped")),
            }
        }
        if mask == LayerMask::NONE {
            warnings.push("no blocking layer resolved; nothing can occlude".to_string());
        }
        mask
    };

    let occludable_layer = match layers.id_of(&settings.occludable_layer) {
        Some(id) => Some(id),
        None => {
            let msg = format!(
                "occludable layer '{}' not found; layer reassignment disabled",
                settings.occludable_layer
            );
            log::warn!("{msg}");
            warnings.push(msg);
            None
        }
    };

    let resolved = ResolvedSettings {
        head_height: finite_or(
            "head_height",
            settings.head_height,
            DEFAULT_HEAD_HEIGHT,
            &mut warnings,
        ),
        probe_radius: non_negative(
            "probe_radius",
            settings.probe_radius,
            0.0,
            &mut warnings,
        ),
        blocking_mask,
        occludable_layer,
        indicator_radius: positive(
            "indicator_radius",
            settings.indicator_radius,
            DEFAULT_INDICATOR_RADIUS,
            &mut warnings,
        ),
        move_smoothing: non_negative(
            "move_smoothing",
            settings.move_smoothing,
            DEFAULT_MOVE_SMOOTHING,
            &mut warnings,
        ),
        transition_duration: non_negative(
            "transition_duration",
            settings.transition_duration,
            DEFAULT_TRANSITION_DURATION,
            &mut warnings,
        ),
        chain_rate: positive("chain_rate", settings.chain_rate, DEFAULT_CHAIN_RATE, &mut warnings),
        min_thickness: positive(
            "min_thickness",
            settings.min_thickness,
            DEFAULT_MIN_THICKNESS,
            &mut warnings,
        ),
    };

    ValidatedSettings {
        settings: resolved,
        warnings,
    }
}

fn finite_or(name: &str, value: f32, fallback: f32, warnings: &mut Vec<String>) -> f32 {
    if value.is_finite() {
        value
    } else {
        warnings.push(format!("{name} is not finite, using {fallback}"));
        fallback
    }
}

fn non_negative(name: &str, value: f32, fallback: f32, warnings: &mut Vec<String>) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warnings.push(format!("{name} must be >= 0, using {fallback}"));
        fallback
    }
}

fn positive(name: &str, value: f32, fallback: f32, warnings: &mut Vec<String>) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        warnings.push(format!("{name} must be > 0, using {fallback}"));
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::layers::LayerId;

    fn table() -> LayerTable {
        let mut t = LayerTable::new();
        t.register("Default").unwrap();
        t.register("Walls").unwrap();
        t.register("Occludable").unwrap();
        t
    }

    #[test]
    fn test_resolves_clean_document() {
        let mut settings = OcclusionSettings::default();
        settings.blocking_layers = vec!["Default".into(), "Walls".into()];
        let validated = resolve(&settings, &table());
        assert!(validated.warnings.is_empty());
        let r = &validated.settings;
        assert_eq!(r.occludable_layer, Some(LayerId(2)));
        assert_eq!(
            r.blocking_mask,
            LayerMask::of(&[LayerId(0), LayerId(1)])
        );
    }

    #[test]
    fn test_empty_blocking_list_means_all() {
        let validated = resolve(&OcclusionSettings::default(), &table());
        assert_eq!(validated.settings.blocking_mask, LayerMask::ALL);
    }

    #[test]
    fn test_unknown_blocking_layer_skipped_with_warning() {
        let mut settings = OcclusionSettings::default();
        settings.blocking_layers = vec!["Walls".into(), "Nope".into()];
        let validated = resolve(&settings, &table());
        assert_eq!(validated.warnings.len(), 1);
        assert_eq!(
            validated.settings.blocking_mask,
            LayerMask::of(&[LayerId(1)])
        );
    }

    #[test]
    fn test_unknown_occludable_layer_disables_reassignment() {
        let mut settings = OcclusionSettings::default();
        settings.occludable_layer = "Ghost".into();
        let validated = resolve(&settings, &table());
        assert_eq!(validated.settings.occludable_layer, None);
        assert!(validated
            .warnings
            .iter()
            .any(|w| w.contains("reassignment disabled")));
    }

    #[test]
    fn test_scalar_clamps() {
        let mut settings = OcclusionSettings::default();
        settings.min_thickness = 0.0;
        settings.probe_radius = -1.0;
        settings.chain_rate = f32::NAN;
        let validated = resolve(&settings, &table());
        let r = &validated.settings;
        assert_eq!(r.min_thickness, DEFAULT_MIN_THICKNESS);
        assert_eq!(r.probe_radius, 0.0);
        assert_eq!(r.chain_rate, DEFAULT_CHAIN_RATE);
        assert_eq!(validated.warnings.len(), 3);
    }
}
