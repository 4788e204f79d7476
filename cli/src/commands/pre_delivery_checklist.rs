//! `pre-delivery-checklist <athlete-id>` — a human-readable summary of the
//! pass/fail gates an operator checks before manually releasing a package
//! that was held back (e.g. after a distribution-error override review).
//! Read-only: it never re-runs or mutates pipeline stages, only inspects
//! what is already on disk.

use anyhow::Result;
use colored::Colorize;

use planforge_core::archetypes::catalog::verify_registry_shape;
use planforge_core::model::methodology::MethodologySelection;
use planforge_core::model::plan_dates::PlanDates;
use planforge_core::model::profile::{validate_profile, Profile};
use planforge_core::model::load_document;
use planforge_core::validator::{measure_distribution_from_files, validate_distribution};

use crate::config::Config;

use super::{EXIT_OK, EXIT_VALIDATION_FAILURE};

struct Gate {
    name: &'static str,
    passed: bool,
    detail: String,
}

pub async fn run_pre_delivery_checklist(athlete_id: &str) -> Result<i32> {
    let config = Config::load()?;
    let pipeline_config = config.pipeline_config();
    let athlete_dir = pipeline_config.athlete_dir(athlete_id);
    let workouts_dir = pipeline_config.workouts_dir(athlete_id);

    let mut gates = Vec::new();

    match verify_registry_shape() {
        Ok(()) => gates.push(Gate { name: "archetype catalog shape", passed: true, detail: "95/22/570".to_string() }),
        Err(detail) => gates.push(Gate { name: "archetype catalog shape", passed: false, detail }),
    }

    let profile: Option<Profile> = load_document(&athlete_dir.join("profile.yaml"), "checklist").ok();
    match &profile {
        Some(p) => {
            let result = validate_profile(p, chrono::Utc::now().date_naive());
            gates.push(Gate {
                name: "profile validation",
                passed: result.is_valid(),
                detail: if result.is_valid() {
                    "no errors".to_string()
                } else {
                    result.errors().map(|e| e.message.clone()).collect::<Vec<_>>().join("; ")
                },
            });
        }
        None => gates.push(Gate { name: "profile validation", passed: false, detail: "profile.yaml missing or unreadable".to_string() }),
    }

    let plan_dates: Option<PlanDates> = load_document(&athlete_dir.join("plan_dates.yaml"), "checklist").ok();
    match &plan_dates {
        Some(plan) => {
            let detail = plan_dates_continuity_issue(plan, profile.as_ref());
            gates.push(Gate { name: "plan-dates continuity", passed: detail.is_none(), detail: detail.unwrap_or_else(|| format!("{} weeks, contiguous", plan.weeks.len())) });
        }
        None => gates.push(Gate { name: "plan-dates continuity", passed: false, detail: "plan_dates.yaml missing or unreadable".to_string() }),
    }

    let methodology: Option<MethodologySelection> =
        load_document(&athlete_dir.join("methodology_selection.yaml"), "checklist").ok();

    match (&methodology, std::fs::read_dir(&workouts_dir)) {
        (Some(m), Ok(entries)) => {
            let mut filenames = Vec::new();
            let mut contents = Vec::new();
            for entry in entries.flatten() {
                if let Some(name) = entry.file_name().to_str().map(str::to_string) {
                    let xml = std::fs::read_to_string(entry.path()).unwrap_or_default();
                    filenames.push(name);
                    contents.push(xml);
                }
            }
            let pairs: Vec<(&str, &str)> =
                filenames.iter().map(String::as_str).zip(contents.iter().map(String::as_str)).collect();
            let (actual, total_files, unknown) = measure_distribution_from_files(pairs);
            let result = validate_distribution(actual, m.target_zones);
            gates.push(Gate {
                name: "distribution validation",
                passed: result.is_valid(),
                detail: format!(
                    "{total_files} files, {:.0}% unknown-free, Z1-Z2 {:.1}% / Z3 {:.1}% / Z4-Z5 {:.1}%",
                    100.0 * (total_files.saturating_sub(unknown.len() as u32)) as f32 / total_files.max(1) as f32,
                    actual.z1_z2 * 100.0,
                    actual.z3 * 100.0,
                    actual.z4_z5 * 100.0
                ),
            });
        }
        _ => gates.push(Gate {
            name: "distribution validation",
            passed: false,
            detail: "methodology selection or workouts directory missing".to_string(),
        }),
    }

    println!("Pre-delivery checklist for {athlete_id}");
    println!("────────────────────────────────");
    let mut all_passed = true;
    for gate in &gates {
        all_passed &= gate.passed;
        let mark = if gate.passed { "✓".green() } else { "✗".red() };
        println!("  {mark} {:<28} {}", gate.name, gate.detail);
    }

    if all_passed {
        println!("{} all gates passed", "✓".green());
        Ok(EXIT_OK)
    } else {
        println!("{} one or more gates failed; do not deliver", "✗".red());
        Ok(EXIT_VALIDATION_FAILURE)
    }
}

/// Checks the quantified plan-dates invariants from the testable-properties
/// section directly against a persisted `PlanDates` document: sequential
/// week numbers, no gaps between consecutive weeks, and the race date
/// landing inside the final week with exactly one `is_race_day` entry.
fn plan_dates_continuity_issue(plan: &PlanDates, profile: Option<&Profile>) -> Option<String> {
    for (i, week) in plan.weeks.iter().enumerate() {
        if week.week_number != (i as u32) + 1 {
            return Some(format!("week numbers not sequential at index {i}"));
        }
    }
    for pair in plan.weeks.windows(2) {
        let gap = (pair[1].monday - pair[0].sunday).num_days();
        if gap != 1 {
            return Some(format!(
                "week {} to week {} is not contiguous ({gap} day gap)",
                pair[0].week_number, pair[1].week_number
            ));
        }
    }
    let Some(final_week) = plan.weeks.last() else {
        return Some("plan has no weeks".to_string());
    };
    if !final_week.is_race_week {
        return Some("final week not flagged as race week".to_string());
    }
    let race_day_count = final_week.days.iter().filter(|d| d.is_race_day).count();
    if race_day_count != 1 {
        return Some(format!("race week has {race_day_count} race day(s), expected exactly 1"));
    }
    if let Some(profile) = profile {
        if profile.race_target.date < final_week.monday || profile.race_target.date > final_week.sunday {
            return Some("race date falls outside the final week's date range".to_string());
        }
    }
    None
}
