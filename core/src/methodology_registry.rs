//! Methodology registry and scoring engine: thirteen named training
//! systems, each scored against an athlete's profile and derived
//! classification along weighted dimensions (weekly hours, experience,
//! stress tolerance, schedule flexibility, goal type, past preferences,
//! and special conditions like injury return).

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::model::derived::{DerivedClassification, RiskFactor, Tier};
use crate::model::methodology::{
    ConfidenceTier, MethodologyId, MethodologySelection, ScoredCandidate, ZoneTargets,
};
use crate::model::profile::{Level, Profile};

#[derive(Debug, Clone, Copy)]
pub struct HoursBand {
    pub min: f32,
    pub max: f32,
    pub ideal_min: f32,
    pub ideal_max: f32,
}

pub struct MethodologyDefinition {
    pub id: MethodologyId,
    pub hours: HoursBand,
    pub min_years_structured: f32,
    pub max_stress: Level,
    pub min_schedule_flexibility: Level,
    pub target_zones: ZoneTargets,
    pub strength_integration: &'static str,
    pub key_workout_categories: &'static [&'static str],
    pub progression_style: &'static str,
    pub favors_podium: bool,
    pub favors_injury_return: bool,
}

static DEFINITIONS: Lazy<Vec<MethodologyDefinition>> = Lazy::new(|| {
    vec![
        MethodologyDefinition {
            id: MethodologyId::TraditionalPyramidal,
            hours: HoursBand { min: 5.0, max: 16.0, ideal_min: 7.0, ideal_max: 12.0 },
            min_years_structured: 0.0,
            max_stress: Level::High,
            min_schedule_flexibility: Level::Low,
            target_zones: ZoneTargets { z1_z2: 0.70, z3: 0.20, z4_z5: 0.10 },
            strength_integration: "two sessions per week in base/build",
            key_workout_categories: &["tempo_steady", "sweet_spot_intervals", "threshold_intervals"],
            progression_style: "linear volume-then-intensity",
            favors_podium: false,
            favors_injury_return: false,
        },
        MethodologyDefinition {
            id: MethodologyId::Polarized8020,
            hours: HoursBand { min: 8.0, max: 20.0, ideal_min: 10.0, ideal_max: 16.0 },
            min_years_structured: 1.0,
            max_stress: Level::Moderate,
            min_schedule_flexibility: Level::Moderate,
            target_zones: ZoneTargets { z1_z2: 0.80, z3: 0.00, z4_z5: 0.20 },
            strength_integration: "one session per week, low volume",
            key_workout_categories: &["vo2_max_intervals", "endurance_base", "long_ride_steady"],
            progression_style: "volume-first, intensity held constant",
            favors_podium: true,
            favors_injury_return: false,
        },
        MethodologyDefinition {
            id: MethodologyId::SweetSpotThreshold,
            hours: HoursBand { min: 5.0, max: 12.0, ideal_min: 6.0, ideal_max: 9.0 },
            min_years_structured: 0.5,
            max_stress: Level::High,
            min_schedule_flexibility: Level::Low,
            target_zones: ZoneTargets { z1_z2: 0.55, z3: 0.35, z4_z5: 0.10 },
            strength_integration: "two sessions per week, time-efficient",
            key_workout_categories: &["sweet_spot_intervals", "threshold_intervals"],
            progression_style: "time-crunched progressive overload",
            favors_podium: false,
            favors_injury_return: false,
        },
        MethodologyDefinition {
            id: MethodologyId::HiitFocused,
            hours: HoursBand { min: 4.0, max: 9.0, ideal_min: 5.0, ideal_max: 7.0 },
            min_years_structured: 1.0,
            max_stress: Level::Moderate,
            min_schedule_flexibility: Level::Low,
            target_zones: ZoneTargets { z1_z2: 0.60, z3: 0.05, z4_z5: 0.35 },
            strength_integration: "one session per week, power-focused",
            key_workout_categories: &["vo2_max_intervals", "anaerobic_capacity", "sprint_power"],
            progression_style: "intensity-first, minimal volume",
            favors_podium: false,
            favors_injury_return: false,
        },
        MethodologyDefinition {
            id: MethodologyId::BlockPeriodization,
            hours: HoursBand { min: 8.0, max: 18.0, ideal_min: 10.0, ideal_max: 15.0 },
            min_years_structured: 2.0,
            max_stress: Level::Moderate,
            min_schedule_flexibility: Level::High,
            target_zones: ZoneTargets { z1_z2: 0.65, z3: 0.15, z4_z5: 0.20 },
            strength_integration: "concentrated in general-prep blocks only",
            key_workout_categories: &["vo2_max_intervals", "climbing_repeats", "pyramid_intervals"],
            progression_style: "concentrated-load blocks with planned overreach",
            favors_podium: true,
            favors_injury_return: false,
        },
        MethodologyDefinition {
            id: MethodologyId::ReversePeriodization,
            hours: HoursBand { min: 6.0, max: 14.0, ideal_min: 7.0, ideal_max: 11.0 },
            min_years_structured: 1.0,
            max_stress: Level::Moderate,
            min_schedule_flexibility: Level::Moderate,
            target_zones: ZoneTargets { z1_z2: 0.60, z3: 0.20, z4_z5: 0.20 },
            strength_integration: "two sessions per week, tapering in peak",
            key_workout_categories: &["threshold_intervals", "over_under", "race_simulation"],
            progression_style: "intensity-first, volume builds late",
            favors_podium: false,
            favors_injury_return: false,
        },
        MethodologyDefinition {
            id: MethodologyId::AutoregulatedHrv,
            hours: HoursBand { min: 5.0, max: 14.0, ideal_min: 6.0, ideal_max: 10.0 },
            min_years_structured: 0.0,
            max_stress: Level::VeryHigh,
            min_schedule_flexibility: Level::High,
            target_zones: ZoneTargets { z1_z2: 0.70, z3: 0.15, z4_z5: 0.15 },
            strength_integration: "flexible, scaled to daily readiness",
            key_workout_categories: &["tempo_steady", "endurance_base", "blended_zone"],
            progression_style: "readiness-gated, no fixed weekly template",
            favors_podium: false,
            favors_injury_return: true,
        },
        MethodologyDefinition {
            id: MethodologyId::MafLowHr,
            hours: HoursBand { min: 4.0, max: 14.0, ideal_min: 5.0, ideal_max: 9.0 },
            min_years_structured: 0.0,
            max_stress: Level::VeryHigh,
            min_schedule_flexibility: Level::Low,
            target_zones: ZoneTargets { z1_z2: 0.95, z3: 0.05, z4_z5: 0.00 },
            strength_integration: "one session per week, mobility-focused",
            key_workout_categories: &["endurance_base", "recovery", "long_ride_steady"],
            progression_style: "strict aerobic-threshold ceiling, volume-only progression",
            favors_podium: false,
            favors_injury_return: true,
        },
        MethodologyDefinition {
            id: MethodologyId::GoatComposite,
            hours: HoursBand { min: 10.0, max: 24.0, ideal_min: 12.0, ideal_max: 20.0 },
            min_years_structured: 3.0,
            max_stress: Level::Low,
            min_schedule_flexibility: Level::High,
            target_zones: ZoneTargets { z1_z2: 0.75, z3: 0.10, z4_z5: 0.15 },
            strength_integration: "three sessions per week, full periodized program",
            key_workout_categories: &["pyramid_intervals", "climbing_repeats", "race_simulation", "tired_vo2"],
            progression_style: "fully individualized, composite of block and polarized methods",
            favors_podium: true,
            favors_injury_return: false,
        },
        MethodologyDefinition {
            id: MethodologyId::CriticalPowerWPrime,
            hours: HoursBand { min: 8.0, max: 14.0, ideal_min: 9.0, ideal_max: 12.0 },
            min_years_structured: 2.0,
            max_stress: Level::Moderate,
            min_schedule_flexibility: Level::Moderate,
            target_zones: ZoneTargets { z1_z2: 0.55, z3: 0.20, z4_z5: 0.25 },
            strength_integration: "two sessions per week, posterior-chain focus",
            key_workout_categories: &["vo2_max_intervals", "over_under", "surge_intervals"],
            progression_style: "CP/W' test-driven, anaerobic-work-capacity pacing",
            favors_podium: true,
            favors_injury_return: false,
        },
        MethodologyDefinition {
            id: MethodologyId::InscydMetabolicProfiling,
            hours: HoursBand { min: 6.0, max: 12.0, ideal_min: 7.0, ideal_max: 10.0 },
            min_years_structured: 1.0,
            max_stress: Level::High,
            min_schedule_flexibility: Level::Moderate,
            target_zones: ZoneTargets { z1_z2: 0.60, z3: 0.20, z4_z5: 0.20 },
            strength_integration: "two sessions per week, metabolic-economy focus",
            key_workout_categories: &["tempo_steady", "sweet_spot_intervals", "criscross_intervals"],
            progression_style: "metabolic-profile-driven (VLamax/VO2max balance)",
            favors_podium: false,
            favors_injury_return: false,
        },
        MethodologyDefinition {
            id: MethodologyId::DoubleThresholdNorwegian,
            hours: HoursBand { min: 12.0, max: 20.0, ideal_min: 14.0, ideal_max: 18.0 },
            min_years_structured: 3.0,
            max_stress: Level::Low,
            min_schedule_flexibility: Level::High,
            target_zones: ZoneTargets { z1_z2: 0.75, z3: 0.20, z4_z5: 0.05 },
            strength_integration: "two sessions per week, strictly separated from double days",
            key_workout_categories: &["threshold_intervals", "sweet_spot_intervals"],
            progression_style: "two threshold sessions per key day, very high structure",
            favors_podium: true,
            favors_injury_return: false,
        },
        MethodologyDefinition {
            id: MethodologyId::HvliLsdCentric,
            hours: HoursBand { min: 10.0, max: 18.0, ideal_min: 12.0, ideal_max: 16.0 },
            min_years_structured: 0.0,
            max_stress: Level::VeryHigh,
            min_schedule_flexibility: Level::Low,
            target_zones: ZoneTargets { z1_z2: 0.90, z3: 0.05, z4_z5: 0.05 },
            strength_integration: "one session per week, joint-health focused",
            key_workout_categories: &["long_ride_steady", "endurance_base"],
            progression_style: "high-volume low-intensity, long-slow-distance-centric",
            favors_podium: true,
            favors_injury_return: true,
        },
    ]
});

pub fn all_definitions() -> &'static [MethodologyDefinition] {
    &DEFINITIONS
}

fn level_rank(level: Level) -> i32 {
    match level {
        Level::Low => 0,
        Level::Moderate => 1,
        Level::High => 2,
        Level::VeryHigh => 3,
        Level::Unknown => 1,
    }
}

fn score_hours(def: &MethodologyDefinition, hours: f32) -> (i32, Option<&'static str>) {
    if hours < def.hours.min || hours > def.hours.max {
        (-30, Some("weekly hours fall outside this methodology's supported band"))
    } else if hours >= def.hours.ideal_min && hours <= def.hours.ideal_max {
        (30, None)
    } else {
        (10, None)
    }
}

fn score_experience(def: &MethodologyDefinition, years_structured: f32) -> i32 {
    if years_structured >= def.min_years_structured {
        15
    } else if def.min_years_structured - years_structured <= 1.0 {
        -5
    } else {
        -15
    }
}

fn score_stress(def: &MethodologyDefinition, stress: Level) -> i32 {
    if level_rank(stress) <= level_rank(def.max_stress) {
        15
    } else {
        -15
    }
}

fn score_schedule_flexibility(def: &MethodologyDefinition, flexibility: Level) -> i32 {
    if level_rank(flexibility) >= level_rank(def.min_schedule_flexibility) {
        10
    } else {
        -10
    }
}

fn score_goal_type(def: &MethodologyDefinition, tier: Tier) -> i32 {
    match (def.favors_podium, tier) {
        (true, Tier::Podium) => 10,
        (true, Tier::Compete) => 5,
        (false, Tier::Ayahuasca) | (false, Tier::Finisher) => 10,
        _ => 0,
    }
}

fn score_past_preferences(def: &MethodologyDefinition, profile: &Profile) -> (i32, Vec<String>) {
    let mut reasons = Vec::new();
    let mut score = 0;
    let id_str = format!("{:?}", def.id).to_lowercase();
    for success in &profile.methodology_preferences.past_successes {
        if success.to_lowercase().contains(&id_str) {
            score += 10;
            reasons.push(format!("athlete previously succeeded with {id_str}"));
        }
    }
    for failure in &profile.methodology_preferences.past_failures {
        if failure.to_lowercase().contains(&id_str) {
            score -= 10;
            reasons.push(format!("athlete previously struggled with {id_str}"));
        }
    }
    (score, reasons)
}

fn score_special_conditions(def: &MethodologyDefinition, derived: &DerivedClassification) -> (i32, Vec<String>) {
    let mut reasons = Vec::new();
    let mut score = 0;
    if derived.risk_factors.contains(&RiskFactor::ReturningFromInjury) {
        if def.favors_injury_return {
            score += 15;
            reasons.push("well suited to athletes returning from injury".to_string());
        } else {
            score -= 10;
        }
    }
    (score, reasons)
}

pub fn score_methodology(
    def: &MethodologyDefinition,
    profile: &Profile,
    derived: &DerivedClassification,
) -> ScoredCandidate {
    let mut score: i32 = 50;
    let mut reasons = Vec::new();
    let mut warnings = Vec::new();

    let (hours_score, hours_warning) = score_hours(def, profile.training_history.current_weekly_hours);
    score += hours_score;
    if let Some(w) = hours_warning {
        warnings.push(w.to_string());
    } else if hours_score == 30 {
        reasons.push("weekly hours fall in the ideal sub-band".to_string());
    }

    score += score_experience(def, profile.training_history.years_structured);
    score += score_stress(def, profile.health_factors.stress_level);
    // schedule flexibility is not an explicit profile field in this design;
    // approximate it from recovery capacity, which the intake collects as
    // the closest available signal.
    score += score_schedule_flexibility(def, profile.health_factors.recovery_capacity);
    score += score_goal_type(def, derived.tier);

    let (past_score, past_reasons) = score_past_preferences(def, profile);
    score += past_score;
    reasons.extend(past_reasons);

    let (special_score, special_reasons) = score_special_conditions(def, derived);
    score += special_score;
    reasons.extend(special_reasons);

    ScoredCandidate {
        methodology: def.id,
        score: score.clamp(0, 100),
        reasons,
        warnings,
    }
}

fn confidence_tier(score: i32) -> ConfidenceTier {
    if score >= 75 {
        ConfidenceTier::High
    } else if score >= 60 {
        ConfidenceTier::Moderate
    } else {
        ConfidenceTier::Low
    }
}

pub fn select_methodology(profile: &Profile, derived: &DerivedClassification) -> MethodologySelection {
    let mut scored: Vec<ScoredCandidate> = DEFINITIONS
        .iter()
        .map(|def| score_methodology(def, profile, derived))
        .collect();
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    let winner = scored[0].clone();
    let alternatives = scored.into_iter().skip(1).take(3).collect();

    let def = DEFINITIONS.iter().find(|d| d.id == winner.methodology).unwrap();

    MethodologySelection {
        chosen: winner.methodology,
        score: winner.score,
        confidence: confidence_tier(winner.score),
        target_zones: def.target_zones,
        strength_integration: def.strength_integration.to_string(),
        key_workout_categories: def.key_workout_categories.iter().map(|s| s.to_string()).collect(),
        progression_style: def.progression_style.to_string(),
        alternatives,
    }
}

/// Lookup map from methodology id to its zone targets, used by the
/// distribution validator.
pub fn target_zones_by_id() -> HashMap<MethodologyId, ZoneTargets> {
    DEFINITIONS.iter().map(|d| (d.id, d.target_zones)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::derived::{derive_classification, Tier};
    use crate::model::profile::{Availability, DayAvailability, RaceTarget, RecentTrainingState, ScheduleConstraints, TrainingHistory, TrainingPhaseState, Weekday, HealthFactors};
    use std::collections::BTreeMap;

    fn profile_with_hours(hours: f32) -> Profile {
        let mut weekly_pattern = BTreeMap::new();
        for day in Weekday::ORDER {
            let mut avail = DayAvailability::rest();
            if day == Weekday::Sat {
                avail.availability = Availability::Available;
                avail.is_key_day_ok = true;
                avail.max_session_minutes = 180;
            }
            weekly_pattern.insert(day, avail);
        }
        Profile {
            athlete_id: "test".into(),
            display_name: "Test".into(),
            email: "t@example.com".into(),
            age_years: Some(30),
            date_of_birth: None,
            body_mass_kg: 70.0,
            ftp_watts: 250,
            race_target: RaceTarget {
                name: "Test Race".into(),
                race_id: None,
                date: chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            },
            b_events: vec![],
            weekly_pattern,
            schedule_constraints: ScheduleConstraints::default(),
            training_history: TrainingHistory {
                years_structured: 3.0,
                highest_ever_weekly_hours: hours,
                current_weekly_hours: hours,
                strength_training_background: true,
            },
            recent_training_state: RecentTrainingState {
                current_phase: TrainingPhaseState::Base,
                days_since_last_ride: 1,
                coming_off_injury: false,
            },
            health_factors: HealthFactors {
                sleep_hours: 7.5,
                stress_level: Level::Low,
                recovery_capacity: Level::High,
            },
            injuries: vec![],
            movement_limitations: vec![],
            equipment: vec![],
            methodology_preferences: Default::default(),
        }
    }

    #[test]
    fn polarized_favored_for_high_volume_low_stress_podium_athlete() {
        let profile = profile_with_hours(14.0);
        let today = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let derived = derive_classification(&profile, today);
        let selection = select_methodology(&profile, &derived);
        assert!(selection.score >= 50);
        assert_eq!(selection.alternatives.len(), 3);
    }

    #[test]
    fn every_methodology_is_scored() {
        let profile = profile_with_hours(8.0);
        let today = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let derived = derive_classification(&profile, today);
        let scored: Vec<_> = DEFINITIONS.iter().map(|d| score_methodology(d, &profile, &derived)).collect();
        assert_eq!(scored.len(), 13);
    }

    #[test]
    fn confidence_tiers_match_thresholds() {
        assert_eq!(confidence_tier(80), ConfidenceTier::High);
        assert_eq!(confidence_tier(65), ConfidenceTier::Moderate);
        assert_eq!(confidence_tier(40), ConfidenceTier::Low);
    }
}
