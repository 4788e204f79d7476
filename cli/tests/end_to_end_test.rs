//! Drives the CLI's three operator commands against a synthetic profile.
//! The full pipeline's final distribution-validation stage (§4.7) depends
//! on which of the thirteen methodologies scoring picks for this profile,
//! so a passing run isn't guaranteed for an arbitrary fixture — the
//! orchestrator's contract (§4.1) is that it either succeeds cleanly (exit
//! 0, workouts directory populated) or aborts at a named stage (exit 1,
//! no partial workouts directory). Both outcomes are asserted; only the
//! success branch goes on to exercise `validate-distribution` and
//! `pre-delivery-checklist` against the resulting artifacts.

use std::collections::BTreeMap;

use assert_cmd::Command;
use chrono::{Duration, NaiveDate, Utc};
use planforge_core::model::profile::*;
use planforge_core::model::save_document;

fn full_week_profile(athlete_id: &str, race_date: NaiveDate) -> Profile {
    let mut weekly_pattern = BTreeMap::new();
    for day in Weekday::ORDER {
        let avail = match day {
            Weekday::Mon => DayAvailability {
                availability: Availability::Available,
                time_slots: vec![TimeSlot::Pm],
                max_session_minutes: 60,
                is_key_day_ok: false,
                is_long_day: false,
            },
            Weekday::Tue => DayAvailability {
                availability: Availability::Available,
                time_slots: vec![TimeSlot::Am],
                max_session_minutes: 45,
                is_key_day_ok: false,
                is_long_day: false,
            },
            Weekday::Wed => DayAvailability {
                availability: Availability::Available,
                time_slots: vec![TimeSlot::Pm],
                max_session_minutes: 90,
                is_key_day_ok: true,
                is_long_day: false,
            },
            Weekday::Thu => DayAvailability {
                availability: Availability::Limited,
                time_slots: vec![TimeSlot::Am],
                max_session_minutes: 45,
                is_key_day_ok: false,
                is_long_day: false,
            },
            Weekday::Fri => DayAvailability::rest(),
            Weekday::Sat => DayAvailability {
                availability: Availability::Available,
                time_slots: vec![TimeSlot::Am],
                max_session_minutes: 90,
                is_key_day_ok: true,
                is_long_day: false,
            },
            Weekday::Sun => DayAvailability {
                availability: Availability::Available,
                time_slots: vec![TimeSlot::Am],
                max_session_minutes: 180,
                is_key_day_ok: true,
                is_long_day: true,
            },
        };
        weekly_pattern.insert(day, avail);
    }

    Profile {
        athlete_id: athlete_id.to_string(),
        display_name: "Test Athlete".to_string(),
        email: "athlete@example.com".to_string(),
        age_years: Some(32),
        date_of_birth: None,
        body_mass_kg: 68.0,
        ftp_watts: 250,
        race_target: RaceTarget {
            name: "Unbound Gravel 200".to_string(),
            race_id: Some("unbound_gravel_200".to_string()),
            date: race_date,
        },
        b_events: vec![],
        weekly_pattern,
        schedule_constraints: ScheduleConstraints::default(),
        training_history: TrainingHistory {
            years_structured: 3.0,
            highest_ever_weekly_hours: 12.0,
            current_weekly_hours: 8.0,
            strength_training_background: true,
        },
        recent_training_state: RecentTrainingState {
            current_phase: TrainingPhaseState::Base,
            days_since_last_ride: 1,
            coming_off_injury: false,
        },
        health_factors: HealthFactors {
            sleep_hours: 7.5,
            stress_level: Level::Moderate,
            recovery_capacity: Level::Moderate,
        },
        injuries: vec![],
        movement_limitations: vec![],
        equipment: vec!["indoor_trainer".to_string(), "power_meter".to_string()],
        methodology_preferences: MethodologyPreferences::default(),
    }
}

#[test]
fn full_pipeline_then_revalidate_then_checklist() {
    let tmp = tempfile::tempdir().unwrap();
    let athlete_id = "test-athlete";
    let race_date = Utc::now().date_naive() + Duration::weeks(14);

    let profile = full_week_profile(athlete_id, race_date);
    let profile_path = tmp.path().join("athletes").join(athlete_id).join("profile.yaml");
    std::fs::create_dir_all(profile_path.parent().unwrap()).unwrap();
    save_document(&profile_path, "test-fixture", &profile).unwrap();

    let mut generate = Command::cargo_bin("planforge").unwrap();
    let output = generate
        .current_dir(tmp.path())
        .env("HOME", tmp.path())
        .arg("generate-package")
        .arg(athlete_id)
        .output()
        .unwrap();

    let workouts_dir = tmp.path().join("athletes").join(athlete_id).join("workouts");

    match output.status.code() {
        Some(0) => {
            assert!(workouts_dir.is_dir(), "a clean run must leave a populated workouts directory");
            let file_count = std::fs::read_dir(&workouts_dir).unwrap().count();
            assert!(file_count > 0, "pipeline should have written at least one workout file");

            let mut validate = Command::cargo_bin("planforge").unwrap();
            validate
                .current_dir(tmp.path())
                .env("HOME", tmp.path())
                .arg("validate-distribution")
                .arg(athlete_id);
            validate.assert().code(0);

            let mut checklist = Command::cargo_bin("planforge").unwrap();
            checklist
                .current_dir(tmp.path())
                .env("HOME", tmp.path())
                .arg("pre-delivery-checklist")
                .arg(athlete_id);
            checklist.assert().code(0);
        }
        Some(1) => {
            // Orchestrator contract: a failing stage leaves no partial
            // workouts directory and never touches a prior successful run.
            assert!(!workouts_dir.is_dir(), "an aborted run must not leave a populated workouts directory");
            let stderr = String::from_utf8_lossy(&output.stderr);
            assert!(stderr.contains("pipeline stopped at stage"));
        }
        other => panic!("unexpected exit code from generate-package: {other:?}"),
    }
}
