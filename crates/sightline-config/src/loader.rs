use sightline_core::config::OcclusionSettings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to parse settings RON: {0}")]
    ParseError(String),
}

/// Parse an occlusion settings RON string. Missing fields take their
/// defaults; layer references stay unresolved names until validation.
pub fn load_settings_from_str(ron_str: &str) -> Result<OcclusionSettings, SettingsError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| SettingsError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_document() {
        let src = r#"(
            head_height: 1.5,
            probe_radius: 0.5,
            blocking_layers: ["Default", "Walls"],
            occludable_layer: "Occludable",
            indicator_radius: 0.8,
            move_smoothing: 8.0,
            transition_duration: 0.3,
            chain_rate: 10.0,
            min_thickness: 0.2,
        )"#;
        let settings = load_settings_from_str(src).unwrap();
        assert_eq!(settings.head_height, 1.5);
        assert_eq!(settings.probe_radius, 0.5);
        assert_eq!(settings.blocking_layers, vec!["Default", "Walls"]);
        assert_eq!(settings.min_thickness, 0.2);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let settings = load_settings_from_str(r#"(head_height: 2.0)"#).unwrap();
        assert_eq!(settings.head_height, 2.0);
        assert_eq!(settings.occludable_layer, "Occludable");
        assert!(settings.blocking_layers.is_empty());
    }

    #[test]
    fn test_parse_error_reported() {
        let err = load_settings_from_str("(head_height: )").unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));
    }
}
