//! Built-in settings document. Integrations that ship no settings file
//! load this instead, so the RON source below must stay in sync with the
//! `Default` impl on `OcclusionSettings`.

use sightline_core::config::OcclusionSettings;

use crate::loader::{load_settings_from_str, SettingsError};

pub const DEFAULT_SETTINGS_RON: &str = r#"(
    head_height: 1.0,
    probe_radius: 0.0,
    blocking_layers: [],
    occludable_layer: "Occludable",
    indicator_radius: 1.0,
    move_smoothing: 10.0,
    transition_duration: 0.25,
    chain_rate: 12.0,
    min_thickness: 0.1,
)"#;

/// Parse the built-in document.
pub fn load_default_settings() -> Result<OcclusionSettings, SettingsError> {
    load_settings_from_str(DEFAULT_SETTINGS_RON)
}
