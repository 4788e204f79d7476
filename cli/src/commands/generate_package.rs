//! `generate-package <athlete-id>` — runs the full ten-stage pipeline,
//! following the orchestrator contract in `planforge_core::pipeline`:
//! fatal stage errors map to exit code 1, a clean run to 0.

use anyhow::Result;
use colored::Colorize;
use planforge_core::collaborators::MinimalGuideRenderer;
use planforge_core::PipelineRunner;

use crate::config::Config;

use super::{EXIT_FATAL, EXIT_OK};

pub async fn run_generate_package(athlete_id: &str) -> Result<i32> {
    let config = Config::load()?;
    let renderer = MinimalGuideRenderer;
    let runner = PipelineRunner::new(config.pipeline_config(), &renderer);

    println!("Generating training package for {}...", athlete_id.bold());

    match runner.run(athlete_id) {
        Ok(report) => {
            println!("{} pipeline completed", "✓".green());
            for (stage, duration) in &report.stage_durations {
                println!("  {} {stage} ({:.0}ms)", "✓".green(), duration.as_secs_f64() * 1000.0);
            }
            println!("  {} workout files written", report.workout_files.len());
            if let Some(guide) = &report.guide_path {
                println!("  guide: {}", guide.display());
            }
            if !report.warnings.is_empty() {
                println!("{} {} warning(s):", "!".yellow(), report.warnings.len());
                for warning in &report.warnings {
                    println!("  {} {warning}", "!".yellow());
                }
            }
            Ok(EXIT_OK)
        }
        Err(e) => {
            eprintln!("{} pipeline stopped at stage '{}': {}", "✗".red(), e.stage, e.source);
            Ok(EXIT_FATAL)
        }
    }
}
