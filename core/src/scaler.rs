//! Duration scaler — adapts a workout template to an available slot while
//! preserving prescription integrity.

use crate::model::plan_dates::Phase;
use crate::model::workout::{WorkoutTemplate, WorkoutType};

/// Type-specific utilization ratio governing how much of the available
/// slot an endurance/tempo-style workout should occupy, by phase.
fn utilization_ratio(phase: Phase) -> f32 {
    match phase {
        Phase::Base => 0.70,
        Phase::Build => 0.75,
        Phase::Peak => 0.80,
        Phase::Maintenance => 0.70,
        Phase::Taper => 0.50,
        Phase::Race => 0.40,
    }
}

const INTERVAL_RATIO: f32 = 0.90;
const INTERVAL_HARD_CAP_MINUTES: u32 = 120;

fn round_to_10(minutes: u32) -> u32 {
    if minutes == 0 {
        return 0;
    }
    let rounded = ((minutes as f32 / 10.0).round() as u32) * 10;
    rounded.max(10)
}

/// Scales `template` to fit within `slot_minutes` for the given `phase`.
/// `FTP_Test`, `Openers`, `Rest`, and `Race_Sim` pass through unscaled.
pub fn scale_duration(template: &WorkoutTemplate, slot_minutes: u32, phase: Phase) -> WorkoutTemplate {
    if template.workout_type.is_never_scaled() {
        return WorkoutTemplate {
            duration_minutes: template.duration_minutes,
            ..clone_template(template)
        };
    }

    let scaled_minutes = if template.workout_type.is_interval_based() {
        let target = (slot_minutes as f32 * INTERVAL_RATIO) as u32;
        target.min(INTERVAL_HARD_CAP_MINUTES)
    } else {
        let target = (slot_minutes as f32 * utilization_ratio(phase)) as u32;
        target.max(template.duration_minutes).min(slot_minutes)
    };

    let rounded = if matches!(template.workout_type, WorkoutType::Sprints) {
        scaled_minutes.max(1)
    } else {
        round_to_10(scaled_minutes)
    };

    WorkoutTemplate {
        duration_minutes: rounded,
        ..clone_template(template)
    }
}

fn clone_template(t: &WorkoutTemplate) -> WorkoutTemplate {
    WorkoutTemplate {
        workout_type: t.workout_type,
        description: t.description.clone(),
        duration_minutes: t.duration_minutes,
        avg_power_fraction: t.avg_power_fraction,
    }
}

/// Given extra time beyond an interval archetype's native duration, returns
/// (warmup_extra_seconds, cooldown_extra_seconds) split 55/45 — preserves a
/// fixed interval set while filling a longer slot.
pub fn split_extra_duration(extra_seconds: u32) -> (u32, u32) {
    let warmup = (extra_seconds as f32 * 0.55) as u32;
    let cooldown = extra_seconds - warmup;
    (warmup, cooldown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(workout_type: WorkoutType, minutes: u32) -> WorkoutTemplate {
        WorkoutTemplate {
            workout_type,
            description: "test".to_string(),
            duration_minutes: minutes,
            avg_power_fraction: 0.7,
        }
    }

    #[test]
    fn ftp_test_never_scaled() {
        let t = template(WorkoutType::FtpTest, 60);
        let scaled = scale_duration(&t, 120, Phase::Base);
        assert_eq!(scaled.duration_minutes, 60);
    }

    #[test]
    fn endurance_scales_by_phase_ratio_and_rounds_to_10() {
        let t = template(WorkoutType::Endurance, 30);
        let scaled = scale_duration(&t, 100, Phase::Base);
        assert_eq!(scaled.duration_minutes % 10, 0);
        assert!(scaled.duration_minutes <= 100);
    }

    #[test]
    fn interval_workout_hard_capped_at_120() {
        let t = template(WorkoutType::Vo2Max, 60);
        let scaled = scale_duration(&t, 300, Phase::Build);
        assert!(scaled.duration_minutes <= INTERVAL_HARD_CAP_MINUTES);
    }

    #[test]
    fn extra_duration_splits_55_45() {
        let (warmup, cooldown) = split_extra_duration(1000);
        assert_eq!(warmup, 550);
        assert_eq!(cooldown, 450);
    }
}
