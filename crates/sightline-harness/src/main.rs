use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use sightline_harness::report;
use sightline_harness::runner::{self, RunConfig};
use sightline_harness::scenes;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    let mut baseline_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut scene_filter: Option<String> = None;
    let mut config = RunConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--baseline" => {
                i += 1;
                baseline_path = Some(PathBuf::from(&args[i]));
            }
            "--output" => {
                i += 1;
                output_path = Some(PathBuf::from(&args[i]));
            }
            "--scene" => {
                i += 1;
                scene_filter = Some(args[i].clone());
            }
            "--frames" => {
                i += 1;
                config.frames = args[i].parse().expect("invalid --frames value");
            }
            "--dt" => {
                i += 1;
                config.dt = args[i].parse().expect("invalid --dt value");
            }
            "--help" | "-h" => {
                eprintln!("Usage: occlusion-harness [OPTIONS]");
                eprintln!("  --baseline <path>   Load baseline JSON for comparison");
                eprintln!("  --output <path>     Save current results as JSON baseline");
                eprintln!("  --scene <name>      Run a single scene (wall, pillars, pipe_chain)");
                eprintln!("  --frames <n>        Frames per scene (default: 600)");
                eprintln!("  --dt <seconds>      Fixed tick length (default: 1/60)");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let scene_names: Vec<&str> = match &scene_filter {
        Some(name) => vec![name.as_str()],
        None => scenes::standard_scenes(),
    };

    let mut results = Vec::new();
    for name in &scene_names {
        log::info!("Running scene '{}' for {} frames...", name, config.frames);
        match runner::run_scene(name, config) {
            Some(result) => results.push(result),
            None => {
                eprintln!("Unknown scene: {}", name);
                process::exit(1);
            }
        }
    }

    println!("\n## Occlusion Harness Results\n");
    println!("{}", report::format_markdown(&results));

    let mut failed = false;

    for result in &results {
        if result.leaked_overrides > 0 {
            eprintln!(
                "LEAK: scene '{}' left {} layer overrides applied after shutdown",
                result.scene_name, result.leaked_overrides
            );
            failed = true;
        }
    }

    if let Some(ref path) = output_path {
        let baseline = report::Baseline {
            timestamp: unix_timestamp(),
            results: results.clone(),
        };
        report::save_baseline(path, &baseline).expect("failed to save baseline");
        log::info!("Saved baseline to {}", path.display());
    }

    if let Some(ref path) = baseline_path {
        match report::load_baseline(path) {
            Some(baseline) => {
                let mismatches = report::compare(&results, &baseline);
                for m in &mismatches {
                    eprintln!("DRIFT: {}", m);
                }
                if !mismatches.is_empty() {
                    failed = true;
                }
            }
            None => {
                eprintln!("Could not load baseline from {}", path.display());
                failed = true;
            }
        }
    }

    if failed {
        process::exit(1);
    }
}

fn unix_timestamp() -> String {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "0".to_string())
}
