//! `validate-distribution <athlete-id>` — re-runs the §4.7 algorithm
//! against an already-generated package without re-running the pipeline:
//! reads the methodology selection document and every file already sitting
//! in the athlete's workouts directory.

use anyhow::{Context, Result};
use colored::Colorize;
use planforge_core::model::methodology::MethodologySelection;
use planforge_core::model::load_document;
use planforge_core::validator::{measure_distribution_from_files, validate_distribution};

use crate::config::Config;

use super::{EXIT_FATAL, EXIT_OK, EXIT_VALIDATION_FAILURE};

pub async fn run_validate_distribution(athlete_id: &str) -> Result<i32> {
    let config = Config::load()?;
    let pipeline_config = config.pipeline_config();
    let athlete_dir = pipeline_config.athlete_dir(athlete_id);
    let workouts_dir = pipeline_config.workouts_dir(athlete_id);

    let methodology: MethodologySelection =
        match load_document(&athlete_dir.join("methodology_selection.yaml"), "validate-distribution") {
            Ok(m) => m,
            Err(e) => {
                eprintln!("{} could not load methodology selection: {e}", "✗".red());
                return Ok(EXIT_FATAL);
            }
        };

    let entries = std::fs::read_dir(&workouts_dir)
        .with_context(|| format!("could not read workouts directory {}", workouts_dir.display()))?;

    let mut filenames = Vec::new();
    let mut contents = Vec::new();
    for entry in entries {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let xml = std::fs::read_to_string(entry.path()).unwrap_or_default();
        filenames.push(name);
        contents.push(xml);
    }
    let pairs: Vec<(&str, &str)> = filenames.iter().map(String::as_str).zip(contents.iter().map(String::as_str)).collect();

    let (actual, total_files, unknown) = measure_distribution_from_files(pairs);
    let result = validate_distribution(actual, methodology.target_zones);

    println!("Distribution report for {athlete_id}");
    println!("────────────────────────────────");
    println!("  total files scanned: {total_files}");
    println!("  scored workouts:     {}", actual.scored_workouts);
    println!(
        "  actual  Z1-Z2/Z3/Z4-Z5: {:.1}% / {:.1}% / {:.1}%",
        actual.z1_z2 * 100.0,
        actual.z3 * 100.0,
        actual.z4_z5 * 100.0
    );
    println!(
        "  target  Z1-Z2/Z3/Z4-Z5: {:.1}% / {:.1}% / {:.1}%",
        methodology.target_zones.z1_z2 * 100.0,
        methodology.target_zones.z3 * 100.0,
        methodology.target_zones.z4_z5 * 100.0
    );
    if !unknown.is_empty() {
        println!("  {} unknown workout type(s):", "!".yellow());
        for name in &unknown {
            println!("    {name}");
        }
    }

    for warning in result.warnings() {
        println!("  {} {}: {}", "!".yellow(), warning.field, warning.message);
    }
    for error in result.errors() {
        println!("  {} {}: {}", "✗".red(), error.field, error.message);
    }

    if result.is_valid() {
        println!("{} distribution within tolerance", "✓".green());
        Ok(EXIT_OK)
    } else {
        println!("{} distribution outside tolerance", "✗".red());
        Ok(EXIT_VALIDATION_FAILURE)
    }
}
