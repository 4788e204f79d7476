//! Builds the weekly day-role structure (key cardio day, long ride, strength
//! rotation, easy/recovery fill) from a profile's availability pattern and
//! the classifier's derived strength-session count.

use std::collections::BTreeMap;

use crate::model::derived::DerivedClassification;
use crate::model::profile::{Availability, Profile, Weekday};
use crate::model::weekly_structure::{DaySchedule, DaySlotKey, SlotRole, WeeklyStructure};

fn weekday_index(day: Weekday) -> usize {
    Weekday::ORDER.iter().position(|d| *d == day).unwrap()
}

/// Days strictly before `key_day` within the trailing 48 hours, i.e. the
/// one or two days immediately preceding it in the Mon-Sun week.
fn is_within_48h_before(day: Weekday, key_day: Weekday) -> bool {
    let day_idx = weekday_index(day) as i32;
    let key_idx = weekday_index(key_day) as i32;
    let delta = key_idx - day_idx;
    delta == 1 || delta == 2
}

pub fn build_weekly_structure(profile: &Profile, derived: &DerivedClassification) -> WeeklyStructure {
    let key_day = derived
        .key_day_candidates
        .iter()
        .copied()
        .max_by_key(|d| {
            profile
                .weekly_pattern
                .get(d)
                .map(|a| a.max_session_minutes)
                .unwrap_or(0)
        });

    let long_ride_day = Weekday::ORDER
        .iter()
        .copied()
        .filter(|d| Some(*d) != key_day)
        .filter(|d| profile.weekly_pattern.get(d).map(|a| a.is_long_day).unwrap_or(false))
        .max_by_key(|d| profile.weekly_pattern.get(d).map(|a| a.max_session_minutes).unwrap_or(0))
        .or_else(|| {
            Weekday::ORDER
                .iter()
                .copied()
                .filter(|d| Some(*d) != key_day)
                .filter(|d| {
                    profile
                        .weekly_pattern
                        .get(d)
                        .map(|a| a.availability == Availability::Available)
                        .unwrap_or(false)
                })
                .max_by_key(|d| profile.weekly_pattern.get(d).map(|a| a.max_session_minutes).unwrap_or(0))
        });

    let mut strength_days = Vec::new();
    for day in &derived.strength_day_candidates {
        if strength_days.len() >= derived.weekly_strength_sessions as usize {
            break;
        }
        if Some(*day) == key_day || Some(*day) == long_ride_day {
            continue;
        }
        if let Some(kd) = key_day {
            if is_within_48h_before(*day, kd) {
                continue;
            }
        }
        strength_days.push(*day);
    }
    // If exclusions left us short of the target session count, allow the
    // day-of-key-day exception (morning strength ahead of an evening key
    // session) rather than silently under-delivering strength volume.
    if strength_days.len() < derived.weekly_strength_sessions as usize {
        if let Some(kd) = key_day {
            if !strength_days.contains(&kd) {
                strength_days.push(kd);
            }
        }
    }

    let mut days = Vec::with_capacity(7);
    for weekday in Weekday::ORDER {
        let mut slots: BTreeMap<DaySlotKey, SlotRole> = BTreeMap::new();
        let avail = profile.weekly_pattern.get(&weekday);

        let is_rest = avail.map(|a| a.availability == Availability::Rest).unwrap_or(true);
        let is_strength_day = strength_days.contains(&weekday);
        let shares_key_and_strength = Some(weekday) == key_day && is_strength_day;

        if is_rest {
            slots.insert(DaySlotKey::Morning, SlotRole::Rest);
        } else if shares_key_and_strength {
            slots.insert(DaySlotKey::Morning, SlotRole::Strength);
            slots.insert(DaySlotKey::Evening, SlotRole::KeyCardio);
        } else if Some(weekday) == key_day {
            slots.insert(DaySlotKey::Morning, SlotRole::KeyCardio);
        } else if Some(weekday) == long_ride_day {
            slots.insert(DaySlotKey::Morning, SlotRole::LongRide);
        } else if is_strength_day {
            slots.insert(DaySlotKey::Morning, SlotRole::Strength);
        } else if avail.map(|a| a.availability == Availability::Limited).unwrap_or(false)
            && avail.map(|a| a.max_session_minutes < 45).unwrap_or(false)
        {
            slots.insert(DaySlotKey::Morning, SlotRole::Recovery);
        } else if avail.map(|a| a.availability == Availability::Unavailable).unwrap_or(true) {
            slots.insert(DaySlotKey::Morning, SlotRole::Rest);
        } else {
            slots.insert(DaySlotKey::Morning, SlotRole::EasyRide);
        }

        days.push(DaySchedule { weekday, slots });
    }

    WeeklyStructure { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::derived::{EquipmentTier, RiskFactor, Tier};
    use crate::model::profile::{
        DayAvailability, HealthFactors, Level, RaceTarget, RecentTrainingState, ScheduleConstraints, TimeSlot,
        TrainingHistory, TrainingPhaseState,
    };
    use std::collections::BTreeSet;

    fn test_profile() -> Profile {
        let mut weekly_pattern = BTreeMap::new();
        for day in Weekday::ORDER {
            let mut avail = DayAvailability::rest();
            match day {
                Weekday::Tue | Weekday::Thu => {
                    avail.availability = Availability::Available;
                    avail.is_key_day_ok = true;
                    avail.max_session_minutes = 90;
                    avail.time_slots = vec![TimeSlot::Pm];
                }
                Weekday::Sat => {
                    avail.availability = Availability::Available;
                    avail.max_session_minutes = 240;
                    avail.is_long_day = true;
                    avail.time_slots = vec![TimeSlot::Am];
                }
                Weekday::Mon | Weekday::Wed | Weekday::Fri => {
                    avail.availability = Availability::Available;
                    avail.max_session_minutes = 60;
                    avail.time_slots = vec![TimeSlot::Am];
                }
                Weekday::Sun => {}
            }
            weekly_pattern.insert(day, avail);
        }

        Profile {
            athlete_id: "test".into(),
            display_name: "Test".into(),
            email: "t@example.com".into(),
            age_years: Some(35),
            date_of_birth: None,
            body_mass_kg: 72.0,
            ftp_watts: 260,
            race_target: RaceTarget {
                name: "Test Race".into(),
                race_id: None,
                date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            },
            b_events: vec![],
            weekly_pattern,
            schedule_constraints: ScheduleConstraints::default(),
            training_history: TrainingHistory {
                years_structured: 2.0,
                highest_ever_weekly_hours: 10.0,
                current_weekly_hours: 9.0,
                strength_training_background: true,
            },
            recent_training_state: RecentTrainingState {
                current_phase: TrainingPhaseState::Base,
                days_since_last_ride: 2,
                coming_off_injury: false,
            },
            health_factors: HealthFactors { sleep_hours: 7.0, stress_level: Level::Moderate, recovery_capacity: Level::Moderate },
            injuries: vec![],
            movement_limitations: vec![],
            equipment: vec![],
            methodology_preferences: Default::default(),
        }
    }

    fn test_derived() -> DerivedClassification {
        let mut key_day_candidates = BTreeSet::new();
        key_day_candidates.insert(Weekday::Tue);
        key_day_candidates.insert(Weekday::Thu);
        let mut strength_day_candidates = BTreeSet::new();
        strength_day_candidates.insert(Weekday::Mon);
        strength_day_candidates.insert(Weekday::Wed);
        strength_day_candidates.insert(Weekday::Fri);

        DerivedClassification {
            tier: Tier::Compete,
            plan_weeks: 16,
            starting_phase: "base".into(),
            weekly_strength_sessions: 2,
            equipment_tier: EquipmentTier::Full,
            exercise_exclusions: BTreeSet::new(),
            key_day_candidates,
            strength_day_candidates,
            risk_factors: BTreeSet::new(),
        }
    }

    #[test]
    fn exactly_one_key_cardio_day_assigned() {
        let profile = test_profile();
        let derived = test_derived();
        let structure = build_weekly_structure(&profile, &derived);
        let key_days: Vec<_> = structure
            .days
            .iter()
            .filter(|d| d.slots.values().any(|r| *r == SlotRole::KeyCardio))
            .collect();
        assert_eq!(key_days.len(), 1);
    }

    #[test]
    fn every_day_has_at_least_one_role() {
        let profile = test_profile();
        let derived = test_derived();
        let structure = build_weekly_structure(&profile, &derived);
        assert_eq!(structure.days.len(), 7);
        assert!(structure.days.iter().all(|d| !d.slots.is_empty()));
    }

    #[test]
    fn strength_excludes_48h_window_before_key_day() {
        let profile = test_profile();
        let derived = test_derived();
        let structure = build_weekly_structure(&profile, &derived);
        // Thu is a key-day candidate; Tue/Wed fall within 48h before it.
        let key_day = structure
            .days
            .iter()
            .find(|d| d.slots.values().any(|r| *r == SlotRole::KeyCardio))
            .unwrap()
            .weekday;
        for day in &structure.days {
            let has_strength = day.slots.values().any(|r| *r == SlotRole::Strength);
            if has_strength && day.weekday != key_day {
                assert!(!is_within_48h_before(day.weekday, key_day));
            }
        }
    }
}
