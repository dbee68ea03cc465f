use std::path::Path;

use crate::runner::RunResult;

/// A complete baseline containing results from all scenes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Baseline {
    pub timestamp: String,
    pub results: Vec<RunResult>,
}

/// Load a baseline from a JSON file. Returns None if the file doesn't
/// exist or fails to parse.
pub fn load_baseline(path: &Path) -> Option<Baseline> {
    let contents = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a baseline to a JSON file.
pub fn save_baseline(path: &Path, baseline: &Baseline) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(baseline).map_err(std::io::Error::other)?;
    std::fs::write(path, json)
}

/// Compare current results against a baseline. The runs are scripted and
/// deterministic, so any drift in the occlusion counts is a behavior
/// change, not noise. Returns human-readable mismatch descriptions.
pub fn compare(current: &[RunResult], baseline: &Baseline) -> Vec<String> {
    let mut mismatches = Vec::new();

    for result in current {
        let Some(base) = baseline
            .results
            .iter()
            .find(|b| b.scene_name == result.scene_name)
        else {
            mismatches.push(format!("{}: missing from baseline", result.scene_name));
            continue;
        };
        if result.occluded_frames != base.occluded_frames {
            mismatches.push(format!(
                "{}: occluded frames {} != baseline {}",
                result.scene_name, result.occluded_frames, base.occluded_frames
            ));
        }
        if result.max_ledger_entries != base.max_ledger_entries {
            mismatches.push(format!(
                "{}: max ledger entries {} != baseline {}",
                result.scene_name, result.max_ledger_entries, base.max_ledger_entries
            ));
        }
    }

    mismatches
}

/// Format results as a markdown summary table.
pub fn format_markdown(results: &[RunResult]) -> String {
    let mut out = String::new();
    out.push_str(
        "| Scene | Frames | Occluded | Max ledger | Max stencil | Min boundary | Leaks |\n",
    );
    out.push_str(
        "|-------|--------|----------|------------|-------------|--------------|-------|\n",
    );

    for r in results {
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {:.2} | {} |\n",
            r.scene_name,
            r.frames,
            r.occluded_frames,
            r.max_ledger_entries,
            r.max_stencil_volumes,
            r.min_chain_boundary,
            r.leaked_overrides,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, occluded: u32) -> RunResult {
        RunResult {
            scene_name: name.to_string(),
            frames: 600,
            occluded_frames: occluded,
            max_ledger_entries: 1,
            max_stencil_volumes: 1,
            min_chain_boundary: 2.0,
            leaked_overrides: 0,
        }
    }

    #[test]
    fn test_compare_flags_drift() {
        let baseline = Baseline {
            timestamp: "0".to_string(),
            results: vec![result("wall", 100)],
        };
        assert!(compare(&[result("wall", 100)], &baseline).is_empty());

        let drifted = compare(&[result("wall", 90)], &baseline);
        assert_eq!(drifted.len(), 1);
        assert!(drifted[0].contains("wall"));

        let unknown = compare(&[result("pillars", 5)], &baseline);
        assert_eq!(unknown.len(), 1);
        assert!(unknown[0].contains("missing from baseline"));
    }

    #[test]
    fn test_markdown_has_one_row_per_result() {
        let md = format_markdown(&[result("wall", 100), result("pillars", 50)]);
        assert_eq!(md.lines().count(), 4);
        assert!(md.contains("| wall |"));
        assert!(md.contains("| pillars |"));
    }

    #[test]
    fn test_baseline_json_round_trip() {
        let baseline = Baseline {
            timestamp: "1700000000".to_string(),
            results: vec![result("wall", 100)],
        };
        let json = serde_json::to_string(&baseline).unwrap();
        let back: Baseline = serde_json::from_str(&json).unwrap();
        assert_eq!(back.results[0].occluded_frames, 100);
        assert_eq!(back.timestamp, baseline.timestamp);
    }
}
