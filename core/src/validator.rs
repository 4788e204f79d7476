//! Distribution validator: checks a week's rendered workouts against the
//! chosen methodology's target training-zone distribution before packaging.
//!
//! Workouts are bucketed into zones by their type, via the fixed table in
//! [`classify`], and counted one per workout — not weighted by duration.
//! Bucket counts are summed across the week and compared, as a fraction of
//! total scored workouts, against the methodology's `ZoneTargets`. Only
//! assessments, the actual race day, and strength sessions have no
//! meaningful zone and are excluded from the denominator entirely.

use crate::error::ValidationResult;
use crate::model::methodology::ZoneTargets;
use crate::model::workout::{parse_workout_filename, WorkoutTemplate, WorkoutType};
use crate::xml_reader::total_duration_minutes;

const ERROR_DEVIATION: f32 = 0.05;
const WARNING_DEVIATION_LOW: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoneBucket {
    Z1Z2,
    Z3,
    Z4Z5,
}

fn excluded(workout_type: WorkoutType) -> bool {
    matches!(workout_type, WorkoutType::FtpTest | WorkoutType::Strength)
}

/// The fixed type-to-bucket table from the component design: classification
/// is driven by the workout's type alone (as parsed from its filename), not
/// by a power threshold, so a CLI re-validation pass that only has the
/// filenames on disk can reproduce the same buckets the pipeline measured.
fn classify(workout_type: WorkoutType) -> ZoneBucket {
    match workout_type {
        WorkoutType::Recovery
        | WorkoutType::Easy
        | WorkoutType::Endurance
        | WorkoutType::LongRide
        | WorkoutType::Rest => ZoneBucket::Z1Z2,
        WorkoutType::Tempo | WorkoutType::SweetSpot => ZoneBucket::Z3,
        WorkoutType::Threshold
        | WorkoutType::Vo2Max
        | WorkoutType::OverUnder
        | WorkoutType::Anaerobic
        | WorkoutType::Sprints
        | WorkoutType::Openers
        | WorkoutType::RaceSim => ZoneBucket::Z4Z5,
        WorkoutType::FtpTest | WorkoutType::Strength => {
            unreachable!("excluded types never reach classify")
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ActualDistribution {
    pub z1_z2: f32,
    pub z3: f32,
    pub z4_z5: f32,
    pub scored_workouts: u32,
}

/// Counts one per workout, not weighted by duration — the proof in §7 of
/// the component design (e.g. polarized 80/20) is calibrated against workout
/// counts, matching the ground-truth `zone_counts[zone] += 1` tally.
pub fn measure_distribution(week_templates: &[WorkoutTemplate]) -> ActualDistribution {
    let mut z1_z2_count = 0u32;
    let mut z3_count = 0u32;
    let mut z4_z5_count = 0u32;

    for template in week_templates {
        if excluded(template.workout_type) {
            continue;
        }
        match classify(template.workout_type) {
            ZoneBucket::Z1Z2 => z1_z2_count += 1,
            ZoneBucket::Z3 => z3_count += 1,
            ZoneBucket::Z4Z5 => z4_z5_count += 1,
        }
    }

    let total = (z1_z2_count + z3_count + z4_z5_count).max(1) as f32;
    ActualDistribution {
        z1_z2: z1_z2_count as f32 / total,
        z3: z3_count as f32 / total,
        z4_z5: z4_z5_count as f32 / total,
        scored_workouts: z1_z2_count + z3_count + z4_z5_count,
    }
}

/// Re-derives an [`ActualDistribution`] purely from files already on disk:
/// parses each workout's filename for its type (per step 1 of the
/// algorithm) and its XML body for total minutes, so the CLI's
/// `validate-distribution` command can re-run the check against an
/// already-generated package without re-running the pipeline. Filenames
/// that don't parse (or don't carry a zone-scoreable type) are skipped and
/// returned separately as unknown, per the report's "unknown workout
/// types" field.
pub fn measure_distribution_from_files<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> (ActualDistribution, u32, Vec<String>) {
    let mut templates = Vec::new();
    let mut unknown = Vec::new();
    let mut total_files = 0u32;

    for (filename, xml) in entries {
        total_files += 1;
        match parse_workout_filename(filename) {
            Some(parsed) => templates.push(WorkoutTemplate {
                workout_type: parsed.workout_type,
                description: String::new(),
                duration_minutes: total_duration_minutes(xml),
                avg_power_fraction: 0.0,
            }),
            None => unknown.push(filename.to_string()),
        }
    }

    (measure_distribution(&templates), total_files, unknown)
}

fn check_bucket(
    result: &mut ValidationResult,
    field: &str,
    actual: f32,
    target: f32,
) {
    let deviation = (actual - target).abs();
    if deviation > ERROR_DEVIATION {
        result.push_error(
            field,
            &format!(
                "actual share {:.1}% deviates from target {:.1}% by more than {:.0} points",
                actual * 100.0,
                target * 100.0,
                ERROR_DEVIATION * 100.0
            ),
        );
    } else if deviation > WARNING_DEVIATION_LOW {
        result.push_warning(
            field,
            &format!(
                "actual share {:.1}% deviates from target {:.1}% by {:.1} points",
                actual * 100.0,
                target * 100.0,
                deviation * 100.0
            ),
        );
    }
}

/// Validates one week's actual zone distribution against the methodology's
/// targets. Packaging is gated on `result.is_valid()` across every week.
pub fn validate_distribution(actual: ActualDistribution, target: ZoneTargets) -> ValidationResult {
    let mut result = ValidationResult::new();
    if actual.scored_workouts == 0 {
        result.push_warning("scored_workouts", "no zone-scoreable workouts in this week");
        return result;
    }
    check_bucket(&mut result, "z1_z2", actual.z1_z2, target.z1_z2);
    check_bucket(&mut result, "z3", actual.z3, target.z3);
    check_bucket(&mut result, "z4_z5", actual.z4_z5, target.z4_z5);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(workout_type: WorkoutType, minutes: u32, power: f32) -> WorkoutTemplate {
        WorkoutTemplate {
            workout_type,
            description: "test".to_string(),
            duration_minutes: minutes,
            avg_power_fraction: power,
        }
    }

    #[test]
    fn excluded_types_do_not_affect_distribution() {
        let week = vec![
            template(WorkoutType::Endurance, 60, 0.65),
            template(WorkoutType::FtpTest, 30, 1.0),
            template(WorkoutType::Strength, 45, 0.0),
        ];
        let actual = measure_distribution(&week);
        assert_eq!(actual.scored_workouts, 1);
        assert!((actual.z1_z2 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rest_and_race_sim_are_counted_not_excluded() {
        let week = vec![
            template(WorkoutType::Rest, 0, 0.0),
            template(WorkoutType::RaceSim, 120, 1.0),
        ];
        let actual = measure_distribution(&week);
        assert_eq!(actual.scored_workouts, 2);
        assert!((actual.z1_z2 - 0.5).abs() < 1e-6, "Rest counts toward z1_z2");
        assert!((actual.z4_z5 - 0.5).abs() < 1e-6, "Race_Sim counts toward z4_z5");
    }

    #[test]
    fn distribution_is_weighted_by_workout_count_not_duration() {
        // A single 10-hour endurance ride against nine short VO2max intervals
        // still lands at 1-in-10 z1_z2 by count, not ~87% by duration.
        let mut week = vec![template(WorkoutType::Endurance, 600, 0.65)];
        week.extend((0..9).map(|_| template(WorkoutType::Vo2Max, 10, 1.15)));
        let actual = measure_distribution(&week);
        assert_eq!(actual.scored_workouts, 10);
        assert!((actual.z1_z2 - 0.1).abs() < 1e-6);
        assert!((actual.z4_z5 - 0.9).abs() < 1e-6);
    }

    #[test]
    fn within_target_passes_clean() {
        let mut week = (0..7).map(|_| template(WorkoutType::Endurance, 60, 0.65)).collect::<Vec<_>>();
        week.extend((0..2).map(|_| template(WorkoutType::Tempo, 60, 0.90)));
        week.push(template(WorkoutType::Vo2Max, 60, 1.10));
        let actual = measure_distribution(&week);
        let target = ZoneTargets { z1_z2: 0.70, z3: 0.20, z4_z5: 0.10 };
        let result = validate_distribution(actual, target);
        assert!(result.is_valid());
    }

    #[test]
    fn far_off_target_fails() {
        let week = vec![template(WorkoutType::Vo2Max, 500, 1.15)];
        let actual = measure_distribution(&week);
        let target = ZoneTargets { z1_z2: 0.80, z3: 0.0, z4_z5: 0.20 };
        let result = validate_distribution(actual, target);
        assert!(!result.is_valid());
    }

    #[test]
    fn measure_from_files_parses_filenames_and_xml() {
        use crate::archetypes::block::Block;
        use crate::xml_writer::write_workout_xml;

        let endurance_xml = write_workout_xml(
            "Endurance",
            "desc",
            "planforge",
            "bike",
            &[Block::Steady { duration_seconds: 3600, power: 0.65 }],
        );
        let entries = vec![
            ("W01_Mon_Apr06_Endurance.xml", endurance_xml.as_str()),
            ("not_a_workout.txt", ""),
        ];
        let (actual, total_files, unknown) = measure_distribution_from_files(entries);
        assert_eq!(total_files, 2);
        assert_eq!(unknown, vec!["not_a_workout.txt".to_string()]);
        assert_eq!(actual.scored_workouts, 1);
    }

    #[test]
    fn no_scoreable_workouts_warns_instead_of_failing() {
        let week = vec![template(WorkoutType::FtpTest, 20, 1.0)];
        let actual = measure_distribution(&week);
        let target = ZoneTargets { z1_z2: 0.70, z3: 0.20, z4_z5: 0.10 };
        let result = validate_distribution(actual, target);
        assert!(result.is_valid());
        assert_eq!(result.warnings().count(), 1);
    }
}
