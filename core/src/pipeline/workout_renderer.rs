//! Per-day workout rendering: resolves each planned day's semantic role to
//! a concrete scaled, blocked, named workout file.

use crate::archetypes::block::Block;
use crate::archetypes::catalog::REGISTRY;
use crate::archetypes::render::render as render_archetype;
use crate::model::archetype::ArchetypeCategory;
use crate::model::plan_dates::{DayEntry, Phase};
use crate::model::profile::Weekday;
use crate::model::weekly_structure::{DaySchedule, SlotRole};
use crate::model::workout::{WorkoutTemplate, WorkoutType};
use crate::scaler::scale_duration;
use crate::xml_writer::write_workout_xml;

pub struct RenderedWorkout {
    pub filename: String,
    pub workout_type: WorkoutType,
    pub description: String,
    pub duration_minutes: u32,
    pub avg_power_fraction: f32,
    pub xml: String,
}

fn interval_category(workout_type: WorkoutType) -> Option<ArchetypeCategory> {
    match workout_type {
        WorkoutType::Vo2Max => Some(ArchetypeCategory::Vo2MaxIntervals),
        WorkoutType::Threshold => Some(ArchetypeCategory::ThresholdIntervals),
        WorkoutType::Anaerobic => Some(ArchetypeCategory::AnaerobicCapacity),
        WorkoutType::Sprints => Some(ArchetypeCategory::SprintPower),
        WorkoutType::OverUnder => Some(ArchetypeCategory::OverUnder),
        _ => None,
    }
}

/// Maps a resolved semantic role to a workout type, given the current
/// training phase. Key-cardio intensity escalates with phase; every other
/// role maps to a fixed type.
fn role_to_workout_type(role: SlotRole, phase: Phase, key_day_rotation: u32) -> WorkoutType {
    match role {
        SlotRole::KeyCardio => match phase {
            Phase::Base => {
                if key_day_rotation % 2 == 0 {
                    WorkoutType::SweetSpot
                } else {
                    WorkoutType::Tempo
                }
            }
            Phase::Build => WorkoutType::Threshold,
            Phase::Peak => WorkoutType::Vo2Max,
            Phase::Maintenance => WorkoutType::Tempo,
            Phase::Taper => WorkoutType::SweetSpot,
            Phase::Race => WorkoutType::RaceSim,
        },
        SlotRole::LongRide => WorkoutType::LongRide,
        SlotRole::EasyRide => WorkoutType::Endurance,
        SlotRole::Strength => WorkoutType::Strength,
        SlotRole::Recovery => WorkoutType::Recovery,
        SlotRole::Rest => WorkoutType::Rest,
    }
}

fn default_template(workout_type: WorkoutType) -> WorkoutTemplate {
    let (duration_minutes, avg_power_fraction) = match workout_type {
        WorkoutType::Recovery => (30, 0.50),
        WorkoutType::Easy => (45, 0.60),
        WorkoutType::Endurance => (60, 0.65),
        WorkoutType::Tempo => (60, 0.80),
        WorkoutType::SweetSpot => (60, 0.91),
        WorkoutType::Threshold => (60, 0.98),
        WorkoutType::Vo2Max => (60, 1.10),
        WorkoutType::Anaerobic => (45, 1.00),
        WorkoutType::Sprints => (40, 1.00),
        WorkoutType::Openers => (30, 0.70),
        WorkoutType::FtpTest => (60, 0.95),
        WorkoutType::LongRide => (150, 0.68),
        WorkoutType::RaceSim => (120, 0.75),
        WorkoutType::OverUnder => (60, 1.00),
        WorkoutType::Strength => (45, 0.0),
        WorkoutType::Rest => (0, 0.0),
    };
    WorkoutTemplate {
        workout_type,
        description: format!("{workout_type} session"),
        duration_minutes,
        avg_power_fraction,
    }
}

/// Hard/easy tracker: if the previous rendered day was hard, a hard day
/// today is forced down to an easy alternative even though its resolved
/// role called for more.
fn enforce_hard_easy_alternation(workout_type: WorkoutType, previous_was_hard: bool) -> WorkoutType {
    if previous_was_hard && workout_type.is_hard() {
        WorkoutType::Recovery
    } else {
        workout_type
    }
}

fn compose_inline_blocks(workout_type: WorkoutType, duration_minutes: u32, avg_power_fraction: f32) -> Vec<Block> {
    let total_seconds = duration_minutes * 60;
    match workout_type {
        WorkoutType::FtpTest => {
            vec![
                Block::Warmup { duration_seconds: 600, power_low: 0.5, power_high: 0.85 },
                Block::Steady { duration_seconds: total_seconds.saturating_sub(1200).max(1200), power: avg_power_fraction },
                Block::Cooldown { duration_seconds: 600, power_low: 0.5, power_high: 0.3 },
            ]
        }
        WorkoutType::Openers => {
            let warmup = (total_seconds as f32 * 0.35) as u32;
            let cooldown = total_seconds.saturating_sub(warmup).saturating_sub(4 * (30 + 270));
            vec![
                Block::Warmup { duration_seconds: warmup, power_low: 0.5, power_high: 0.75 },
                Block::Intervals {
                    repeats: 4,
                    on_duration_seconds: 30,
                    on_power: 1.20,
                    off_duration_seconds: 270,
                    off_power: 0.50,
                    text_events: vec![],
                },
                Block::Cooldown { duration_seconds: cooldown.max(300), power_low: 0.5, power_high: 0.3 },
            ]
        }
        WorkoutType::RaceSim => {
            let warmup = 600;
            let cooldown = 300;
            vec![
                Block::Warmup { duration_seconds: warmup, power_low: 0.5, power_high: 0.85 },
                Block::FreeRide { duration_seconds: total_seconds.saturating_sub(warmup + cooldown), text_events: vec![] },
                Block::Cooldown { duration_seconds: cooldown, power_low: 0.5, power_high: 0.3 },
            ]
        }
        _ => {
            let warmup = ((total_seconds as f32) * 0.12).max(300.0) as u32;
            let cooldown = 300u32.max((total_seconds as f32 * 0.10) as u32);
            let steady = total_seconds.saturating_sub(warmup + cooldown).max(60);
            vec![
                Block::Warmup { duration_seconds: warmup, power_low: 0.5, power_high: avg_power_fraction.min(0.75) },
                Block::Steady { duration_seconds: steady, power: avg_power_fraction },
                Block::Cooldown { duration_seconds: cooldown, power_low: avg_power_fraction.min(0.6), power_high: 0.3 },
            ]
        }
    }
}

/// Renders one day's workout given its resolved role, available minutes,
/// phase, and a rotation counter used to vary key-cardio selection and
/// archetype variation week to week.
pub fn render_day_workout(
    day: &DayEntry,
    role: SlotRole,
    phase: Phase,
    level: u8,
    max_session_minutes: u32,
    previous_was_hard: bool,
    rotation_index: u32,
    ftp_test_today: bool,
) -> RenderedWorkout {
    let workout_type = if ftp_test_today {
        WorkoutType::FtpTest
    } else if day.is_race_day {
        WorkoutType::RaceSim
    } else {
        let resolved = role_to_workout_type(role, phase, rotation_index);
        enforce_hard_easy_alternation(resolved, previous_was_hard)
    };

    let template = default_template(workout_type);
    let scaled = if matches!(workout_type, WorkoutType::Strength | WorkoutType::Rest) {
        template
    } else {
        scale_duration(&template, max_session_minutes.max(template.duration_minutes), phase)
    };

    let blocks = if let Some(category) = interval_category(workout_type) {
        let archetype = REGISTRY
            .select(category, level, rotation_index, 0)
            .expect("every interval category has at least one archetype");
        render_archetype(&archetype, scaled.duration_minutes * 60)
    } else {
        compose_inline_blocks(workout_type, scaled.duration_minutes, scaled.avg_power_fraction)
    };

    let xml = write_workout_xml(
        &format!("{} {}", day.short_label, workout_type),
        &scaled.description,
        "planforge",
        "bike",
        &blocks,
    );

    RenderedWorkout {
        filename: format!("{}_{}.xml", day.filename_prefix, workout_type.file_token()),
        workout_type,
        description: scaled.description,
        duration_minutes: scaled.duration_minutes,
        avg_power_fraction: scaled.avg_power_fraction,
        xml,
    }
}

/// Picks the best FTP-test candidate day in a week: any key-OK day,
/// preferred by descending available session length (typically Sun > Sat
/// > Thu), so the assessment lands on a day with room for a real effort.
pub fn pick_ftp_test_day<'a>(
    days: &'a [DayEntry],
    schedule: &DaySchedule,
    key_day_candidates: &std::collections::BTreeSet<Weekday>,
    max_minutes_by_weekday: &std::collections::BTreeMap<Weekday, u32>,
) -> Option<&'a DayEntry> {
    let _ = schedule;
    days.iter()
        .filter(|d| key_day_candidates.contains(&d.weekday))
        .max_by_key(|d| max_minutes_by_weekday.get(&d.weekday).copied().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(weekday: Weekday) -> DayEntry {
        DayEntry {
            weekday,
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            short_label: "Mon Mar 02".to_string(),
            filename_prefix: "W01_Mon_Mar2".to_string(),
            is_race_day: false,
            is_b_race_day: false,
            is_b_race_opener: false,
            is_b_race_easy: false,
        }
    }

    #[test]
    fn hard_day_after_hard_day_is_forced_to_recovery() {
        let rendered = render_day_workout(&day(Weekday::Wed), SlotRole::KeyCardio, Phase::Peak, 3, 90, true, 0, false);
        assert_eq!(rendered.workout_type, WorkoutType::Recovery);
    }

    #[test]
    fn ftp_test_flag_overrides_role_resolution() {
        let rendered = render_day_workout(&day(Weekday::Sun), SlotRole::LongRide, Phase::Base, 1, 120, false, 0, true);
        assert_eq!(rendered.workout_type, WorkoutType::FtpTest);
        assert_eq!(rendered.duration_minutes, 60);
    }

    #[test]
    fn race_day_always_renders_race_sim() {
        let mut d = day(Weekday::Sat);
        d.is_race_day = true;
        let rendered = render_day_workout(&d, SlotRole::KeyCardio, Phase::Race, 6, 300, false, 0, false);
        assert_eq!(rendered.workout_type, WorkoutType::RaceSim);
    }

    #[test]
    fn filenames_follow_the_w_day_date_type_convention() {
        let rendered = render_day_workout(&day(Weekday::Mon), SlotRole::EasyRide, Phase::Base, 2, 60, false, 0, false);
        assert_eq!(rendered.filename, "W01_Mon_Mar2_Endurance.xml");
    }
}
