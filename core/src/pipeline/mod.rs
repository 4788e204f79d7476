//! Pipeline orchestrator: runs the ten ordered stages for one athlete,
//! persisting each stage's output atomically before the next begins.

pub mod plan_dates_calc;
pub mod weekly_structure_builder;
pub mod workout_renderer;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration as StdDuration;

use tracing::{info, instrument, warn};

use crate::archetypes::catalog::verify_registry_shape;
use crate::atomic::{replace_dir_atomic, write_atomic_str};
use crate::collaborators::GuideRenderer;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, StageError, StageResult, ValidationResult};
use crate::methodology_registry::select_methodology;
use crate::model::derived::{derive_classification, DerivedClassification};
use crate::model::fueling::{calculate_fueling, FuelingPlan};
use crate::model::methodology::MethodologySelection;
use crate::model::plan_dates::PlanDates;
use crate::model::profile::Profile;
use crate::model::weekly_structure::{SlotRole, WeeklyStructure};
use crate::model::workout::WorkoutTemplate;
use crate::model::{load_document, save_document};
use crate::validator::{measure_distribution, validate_distribution};

use plan_dates_calc::{calculate_plan_dates, PlanDateInputs};
use weekly_structure_builder::build_weekly_structure;
use workout_renderer::render_day_workout;

/// Per-stage timing and warnings, plus the final artifact manifest, handed
/// back to the caller on a successful run.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub stage_durations: Vec<(&'static str, StdDuration)>,
    pub warnings: Vec<String>,
    pub workout_files: Vec<String>,
    pub guide_path: Option<PathBuf>,
    pub package_path: Option<PathBuf>,
}

pub struct PipelineRunner<'a> {
    pub config: PipelineConfig,
    pub guide_renderer: &'a dyn GuideRenderer,
}

impl<'a> PipelineRunner<'a> {
    pub fn new(config: PipelineConfig, guide_renderer: &'a dyn GuideRenderer) -> Self {
        Self { config, guide_renderer }
    }

    #[instrument(skip(self), fields(athlete_id))]
    pub fn run(&self, athlete_id: &str) -> Result<PipelineReport, PipelineError> {
        verify_registry_shape().map_err(|detail| PipelineError {
            stage: "startup",
            source: StageError::Integrity { stage: "startup", detail },
        })?;

        let mut report = PipelineReport::default();
        let athlete_dir = self.config.athlete_dir(athlete_id);

        let profile: Profile = self
            .run_stage("validate-profile", &mut report, || self.stage_validate_profile(&athlete_dir))?;

        let derived = self.run_stage("derive-classification", &mut report, || {
            Ok(derive_classification(&profile, today()))
        })?;
        save_document(&athlete_dir.join("derived_classification.yaml"), "derive-classification", &derived)
            .map_err(|e| stage_err("derive-classification", e))?;

        let methodology = self.run_stage("select-methodology", &mut report, || {
            Ok(select_methodology(&profile, &derived))
        })?;
        save_document(&athlete_dir.join("methodology_selection.yaml"), "select-methodology", &methodology)
            .map_err(|e| stage_err("select-methodology", e))?;

        let fueling: FuelingPlan = self.run_stage("calculate-fueling", &mut report, || {
            Ok(calculate_fueling(
                profile.body_mass_kg,
                profile.ftp_watts,
                estimate_race_distance_miles(&profile),
                derived.tier == crate::model::derived::Tier::Podium,
            ))
        })?;
        save_document(&athlete_dir.join("fueling_plan.yaml"), "calculate-fueling", &fueling)
            .map_err(|e| stage_err("calculate-fueling", e))?;

        let plan_dates = self.run_stage("calculate-plan-dates", &mut report, || {
            self.stage_calculate_plan_dates(&profile, &derived)
        })?;
        save_document(&athlete_dir.join("plan_dates.yaml"), "calculate-plan-dates", &plan_dates)
            .map_err(|e| stage_err("calculate-plan-dates", e))?;

        let weekly_structure = self.run_stage("build-weekly-structure", &mut report, || {
            Ok(build_weekly_structure(&profile, &derived))
        })?;
        save_document(&athlete_dir.join("weekly_structure.yaml"), "build-weekly-structure", &weekly_structure)
            .map_err(|e| stage_err("build-weekly-structure", e))?;

        let staged_workouts_dir = athlete_dir.join(format!("{}.staging", self.config.workouts_dir_name));
        let workout_files = self.run_stage("render-workouts", &mut report, || {
            self.stage_render_workouts(&profile, &derived, &plan_dates, &weekly_structure, &staged_workouts_dir)
        })?;
        report.workout_files = workout_files.iter().map(|(name, _)| name.clone()).collect();

        self.run_stage("validate-distribution", &mut report, || {
            self.stage_validate_distribution(&workout_files, &methodology)
        })?;

        let workouts_dir = self.config.workouts_dir(athlete_id);
        replace_dir_atomic(&workouts_dir, &staged_workouts_dir).map_err(|source| PipelineError {
            stage: "render-workouts",
            source: StageError::Io { stage: "render-workouts", source },
        })?;

        let guide_path = athlete_dir.join("guide.html");
        self.run_stage("render-guide", &mut report, || {
            let html = self
                .guide_renderer
                .render(&profile.display_name, &plan_dates)
                .map_err(|e| StageError::Contract { detail: e.to_string() })?;
            write_atomic_str(&guide_path, &html).map_err(|source| StageError::Io { stage: "render-guide", source })?;
            Ok(())
        })?;
        report.guide_path = Some(guide_path);

        let package_path = athlete_dir.join("package_manifest.yaml");
        self.run_stage("package", &mut report, || {
            save_document(&package_path, "package", &report.workout_files)
        })?;
        report.package_path = Some(package_path);

        Ok(report)
    }

    fn run_stage<T>(
        &self,
        name: &'static str,
        report: &mut PipelineReport,
        f: impl FnOnce() -> StageResult<T>,
    ) -> Result<T, PipelineError> {
        let start = std::time::Instant::now();
        info!(stage = name, "running stage");
        let result = f().map_err(|source| {
            warn!(stage = name, error = %source, "stage failed");
            PipelineError { stage: name, source }
        })?;
        report.stage_durations.push((name, start.elapsed()));
        Ok(result)
    }

    fn stage_validate_profile(&self, athlete_dir: &std::path::Path) -> StageResult<Profile> {
        let profile: Profile = load_document(&athlete_dir.join("profile.yaml"), "validate-profile")?;
        let result = crate::model::profile::validate_profile(&profile, today());
        if !result.is_valid() {
            let detail = result
                .errors()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(StageError::Validation { stage: "validate-profile", detail });
        }
        Ok(profile)
    }

    fn stage_calculate_plan_dates(&self, profile: &Profile, derived: &DerivedClassification) -> StageResult<PlanDates> {
        let inputs = PlanDateInputs {
            race_date: profile.race_target.date,
            plan_weeks: derived.plan_weeks,
            heavy_training_end: profile.schedule_constraints.heavy_training_end,
            preferred_start: None,
            b_events: &profile.b_events,
            today: today(),
        };
        let (plan, validation) = calculate_plan_dates(&inputs)?;
        if !validation.is_valid() {
            let detail = validation
                .errors()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(StageError::Contract { detail });
        }
        Ok(plan)
    }

    fn stage_render_workouts(
        &self,
        profile: &Profile,
        derived: &DerivedClassification,
        plan_dates: &PlanDates,
        weekly_structure: &WeeklyStructure,
        staged_dir: &std::path::Path,
    ) -> StageResult<Vec<(String, WorkoutTemplate)>> {
        std::fs::create_dir_all(staged_dir).map_err(|source| StageError::Io { stage: "render-workouts", source })?;

        let max_minutes_by_weekday: BTreeMap<_, _> = profile
            .weekly_pattern
            .iter()
            .map(|(day, avail)| (*day, avail.max_session_minutes))
            .collect();

        let mut files = Vec::new();
        let mut ftp_tests_done = 0;
        let base_phase_weeks: Vec<_> = plan_dates
            .weeks
            .iter()
            .filter(|w| w.phase == crate::model::plan_dates::Phase::Base)
            .collect();

        for week in &plan_dates.weeks {
            let level = level_for_week(week.week_number, plan_dates.weeks.len() as u32);
            let mut previous_was_hard = false;

            let ftp_test_day = if self.config.ftp_test_injection_enabled {
                if week.week_number == 1 {
                    workout_renderer::pick_ftp_test_day(&week.days, &weekly_structure.days[0], &derived.key_day_candidates, &max_minutes_by_weekday)
                        .map(|d| d.date)
                } else if base_phase_weeks.len() >= 3 && base_phase_weeks.last().map(|w| w.week_number) == Some(week.week_number) {
                    workout_renderer::pick_ftp_test_day(&week.days, &weekly_structure.days[0], &derived.key_day_candidates, &max_minutes_by_weekday)
                        .map(|d| d.date)
                } else {
                    None
                }
            } else {
                None
            };

            for (day_idx, day) in week.days.iter().enumerate() {
                let schedule = &weekly_structure.days[day_idx];
                let role = schedule.slots.values().next().copied().unwrap_or(SlotRole::Rest);
                let max_minutes = max_minutes_by_weekday.get(&day.weekday).copied().unwrap_or(0);
                let is_ftp_test_today = ftp_test_day == Some(day.date);

                let rendered = render_day_workout(
                    day,
                    role,
                    week.phase,
                    level,
                    max_minutes,
                    previous_was_hard,
                    week.week_number,
                    is_ftp_test_today,
                );

                if is_ftp_test_today {
                    ftp_tests_done += 1;
                }
                previous_was_hard = rendered.workout_type.is_hard();

                if !matches!(role, SlotRole::Rest) {
                    let path = staged_dir.join(&rendered.filename);
                    write_atomic_str(&path, &rendered.xml)
                        .map_err(|source| StageError::Io { stage: "render-workouts", source })?;
                    files.push((
                        rendered.filename,
                        WorkoutTemplate {
                            workout_type: rendered.workout_type,
                            description: rendered.description,
                            duration_minutes: rendered.duration_minutes,
                            avg_power_fraction: rendered.avg_power_fraction,
                        },
                    ));
                }
            }
        }

        info!(ftp_tests_injected = ftp_tests_done, "render-workouts complete");
        Ok(files)
    }

    fn stage_validate_distribution(
        &self,
        workout_files: &[(String, WorkoutTemplate)],
        methodology: &MethodologySelection,
    ) -> StageResult<()> {
        let templates: Vec<_> = workout_files.iter().map(|(_, t)| t.clone()).collect();
        let actual = measure_distribution(&templates);
        let result: ValidationResult = validate_distribution(actual, methodology.target_zones);
        if !result.is_valid() {
            let detail = result
                .errors()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(StageError::Distribution { detail });
        }
        Ok(())
    }
}

fn stage_err(stage: &'static str, e: StageError) -> PipelineError {
    PipelineError { stage, source: e }
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

fn level_for_week(week_number: u32, total_weeks: u32) -> u8 {
    let progress = week_number as f32 / total_weeks.max(1) as f32;
    (1.0 + progress * 5.0).round().clamp(1.0, 6.0) as u8
}

fn estimate_race_distance_miles(profile: &Profile) -> f32 {
    crate::known_races::find_race(&profile.race_target.name)
        .map(|r| r.distance_miles)
        .unwrap_or(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_for_week_ranges_from_1_to_6() {
        assert_eq!(level_for_week(1, 16), 1);
        assert_eq!(level_for_week(16, 16), 6);
        let mid = level_for_week(8, 16);
        assert!((1..=6).contains(&mid));
    }
}
