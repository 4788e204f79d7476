//! Derived classification — the classifier stage's output document: tier
//! derivation from weekly hours with history modifiers, plan-weeks
//! calculation, equipment tier, exercise exclusions, and risk-factor
//! detection.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::profile::{Level, Profile, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Ayahuasca,
    Finisher,
    Compete,
    Podium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentTier {
    Minimal,
    Moderate,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    LowSleep,
    HighStress,
    ReturningFromInjury,
    NewToStructuredTraining,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedClassification {
    pub tier: Tier,
    pub plan_weeks: u32,
    pub starting_phase: String,
    pub weekly_strength_sessions: u8,
    pub equipment_tier: EquipmentTier,
    pub exercise_exclusions: BTreeSet<String>,
    pub key_day_candidates: BTreeSet<Weekday>,
    pub strength_day_candidates: BTreeSet<Weekday>,
    pub risk_factors: BTreeSet<RiskFactor>,
}

/// Minimum/maximum plan length in weeks.
pub const PLAN_WEEKS_MIN: u32 = 6;
pub const PLAN_WEEKS_MAX: u32 = 24;

fn tier_from_hours(current_weekly_hours: f32, highest_ever_weekly_hours: f32) -> Tier {
    // History modifier: an athlete who has previously sustained a higher
    // load than their current hours gets credit for one tier step, capped
    // at Podium, reflecting retained fitness/training literacy.
    let base_tier = if current_weekly_hours < 6.0 {
        Tier::Ayahuasca
    } else if current_weekly_hours < 10.0 {
        Tier::Finisher
    } else if current_weekly_hours < 14.0 {
        Tier::Compete
    } else {
        Tier::Podium
    };

    if highest_ever_weekly_hours >= current_weekly_hours + 4.0 {
        bump_tier(base_tier)
    } else {
        base_tier
    }
}

fn bump_tier(tier: Tier) -> Tier {
    match tier {
        Tier::Ayahuasca => Tier::Finisher,
        Tier::Finisher => Tier::Compete,
        Tier::Compete => Tier::Podium,
        Tier::Podium => Tier::Podium,
    }
}

fn plan_weeks_from_race_date(today: chrono::NaiveDate, race_date: chrono::NaiveDate) -> u32 {
    let days_until = (race_date - today).num_days().max(0);
    let weeks = (days_until / 7) as u32;
    weeks.clamp(PLAN_WEEKS_MIN, PLAN_WEEKS_MAX)
}

fn equipment_tier(equipment: &[String]) -> EquipmentTier {
    let has_power_meter = equipment.iter().any(|e| e == "power_meter");
    let has_smart_trainer = equipment.iter().any(|e| e == "smart_trainer");
    let has_strength_gear = equipment
        .iter()
        .any(|e| e == "barbell" || e == "full_gym" || e == "squat_rack");

    if has_power_meter && has_smart_trainer && has_strength_gear {
        EquipmentTier::Full
    } else if has_power_meter || has_smart_trainer {
        EquipmentTier::Moderate
    } else {
        EquipmentTier::Minimal
    }
}

fn weekly_strength_sessions(tier: Tier, has_strength_background: bool, risk: &BTreeSet<RiskFactor>) -> u8 {
    if risk.contains(&RiskFactor::ReturningFromInjury) {
        return 1;
    }
    let base = match tier {
        Tier::Ayahuasca => 1,
        Tier::Finisher => 2,
        Tier::Compete => 2,
        Tier::Podium => 3,
    };
    if has_strength_background {
        base
    } else {
        base.min(2)
    }
}

/// Derives the classifier's output from a validated profile. The caller is
/// responsible for having already run `validate_profile` and rejected
/// critical errors.
pub fn derive_classification(profile: &Profile, today: chrono::NaiveDate) -> DerivedClassification {
    let tier = tier_from_hours(
        profile.training_history.current_weekly_hours,
        profile.training_history.highest_ever_weekly_hours,
    );
    let plan_weeks = plan_weeks_from_race_date(today, profile.race_target.date);

    let mut risk_factors = BTreeSet::new();
    if profile.health_factors.sleep_hours < 6.5 {
        risk_factors.insert(RiskFactor::LowSleep);
    }
    if matches!(profile.health_factors.stress_level, Level::High | Level::VeryHigh) {
        risk_factors.insert(RiskFactor::HighStress);
    }
    if profile.recent_training_state.coming_off_injury || profile.injuries.iter().any(|i| i.affects_cycling) {
        risk_factors.insert(RiskFactor::ReturningFromInjury);
    }
    if profile.training_history.years_structured < 1.0 {
        risk_factors.insert(RiskFactor::NewToStructuredTraining);
    }

    let equipment_tier = equipment_tier(&profile.equipment);

    let mut exercise_exclusions = BTreeSet::new();
    for injury in &profile.injuries {
        if injury.affects_strength {
            exercise_exclusions.extend(injury.exercises_to_avoid.iter().cloned());
        }
    }

    let mut key_day_candidates = BTreeSet::new();
    let mut strength_day_candidates = BTreeSet::new();
    for (day, avail) in &profile.weekly_pattern {
        if avail.is_key_day_ok {
            key_day_candidates.insert(*day);
        }
        if profile
            .schedule_constraints
            .strength_only_days
            .contains(day)
            || (avail.availability == crate::model::profile::Availability::Limited
                && avail.max_session_minutes >= 30)
        {
            strength_day_candidates.insert(*day);
        }
    }

    let weekly_strength_sessions = weekly_strength_sessions(
        tier,
        profile.training_history.strength_training_background,
        &risk_factors,
    );

    let starting_phase = match profile.recent_training_state.current_phase {
        crate::model::profile::TrainingPhaseState::OffSeason => "base",
        crate::model::profile::TrainingPhaseState::Base => "base",
        crate::model::profile::TrainingPhaseState::Build => "build",
        crate::model::profile::TrainingPhaseState::Unknown => "base",
    }
    .to_string();

    DerivedClassification {
        tier,
        plan_weeks,
        starting_phase,
        weekly_strength_sessions,
        equipment_tier,
        exercise_exclusions,
        key_day_candidates,
        strength_day_candidates,
        risk_factors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_escalates_with_history_modifier() {
        assert_eq!(tier_from_hours(4.0, 4.0), Tier::Ayahuasca);
        assert_eq!(tier_from_hours(4.0, 9.0), Tier::Finisher);
        assert_eq!(tier_from_hours(15.0, 15.0), Tier::Podium);
    }

    #[test]
    fn plan_weeks_clamped_to_bounds() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let far_race = chrono::NaiveDate::from_ymd_opt(2027, 6, 1).unwrap();
        assert_eq!(plan_weeks_from_race_date(today, far_race), PLAN_WEEKS_MAX);

        let near_race = chrono::NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        assert_eq!(plan_weeks_from_race_date(today, near_race), PLAN_WEEKS_MIN);
    }

    #[test]
    fn returning_from_injury_caps_strength_at_one_session() {
        let mut risk = BTreeSet::new();
        risk.insert(RiskFactor::ReturningFromInjury);
        assert_eq!(weekly_strength_sessions(Tier::Podium, true, &risk), 1);
    }
}
