//! Athlete profile — the pipeline's sole external input document.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Availability {
    Available,
    Limited,
    Unavailable,
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    Am,
    Pm,
}

/// One weekday's availability pattern.
///
/// `is_key_day_ok` is the sole source of truth for key-session eligibility.
/// There is deliberately no parallel `key_days` list anywhere in this model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayAvailability {
    pub availability: Availability,
    pub time_slots: Vec<TimeSlot>,
    pub max_session_minutes: u32,
    pub is_key_day_ok: bool,
    pub is_long_day: bool,
}

impl DayAvailability {
    pub fn rest() -> Self {
        Self {
            availability: Availability::Rest,
            time_slots: Vec::new(),
            max_session_minutes: 0,
            is_key_day_ok: false,
            is_long_day: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    pub const ORDER: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    pub fn abbrev(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    pub fn from_chrono(d: chrono::Weekday) -> Self {
        match d {
            chrono::Weekday::Mon => Weekday::Mon,
            chrono::Weekday::Tue => Weekday::Tue,
            chrono::Weekday::Wed => Weekday::Wed,
            chrono::Weekday::Thu => Weekday::Thu,
            chrono::Weekday::Fri => Weekday::Fri,
            chrono::Weekday::Sat => Weekday::Sat,
            chrono::Weekday::Sun => Weekday::Sun,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BEvent {
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceTarget {
    pub name: String,
    pub race_id: Option<String>,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleConstraints {
    pub preferred_long_day: Option<Weekday>,
    pub strength_only_days: Vec<Weekday>,
    pub heavy_training_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub years_structured: f32,
    pub highest_ever_weekly_hours: f32,
    pub current_weekly_hours: f32,
    pub strength_training_background: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingPhaseState {
    OffSeason,
    Base,
    Build,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentTrainingState {
    pub current_phase: TrainingPhaseState,
    pub days_since_last_ride: u32,
    pub coming_off_injury: bool,
}

/// A closed enumeration of intake free-text levels (`"high"`, `"very_high"`,
/// ...) with an explicit `Unknown` arm so scoring always has total
/// coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Moderate,
    High,
    VeryHigh,
    Unknown,
}

impl Default for Level {
    fn default() -> Self {
        Level::Unknown
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthFactors {
    pub sleep_hours: f32,
    pub stress_level: Level,
    pub recovery_capacity: Level,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Injury {
    pub area: String,
    pub severity: Level,
    pub exercises_to_avoid: Vec<String>,
    pub affects_cycling: bool,
    pub affects_strength: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodologyPreferences {
    pub past_successes: Vec<String>,
    pub past_failures: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub athlete_id: String,
    pub display_name: String,
    pub email: String,
    pub age_years: Option<u32>,
    pub date_of_birth: Option<NaiveDate>,
    pub body_mass_kg: f32,
    pub ftp_watts: u32,
    pub race_target: RaceTarget,
    pub b_events: Vec<BEvent>,
    pub weekly_pattern: std::collections::BTreeMap<Weekday, DayAvailability>,
    pub schedule_constraints: ScheduleConstraints,
    pub training_history: TrainingHistory,
    pub recent_training_state: RecentTrainingState,
    pub health_factors: HealthFactors,
    pub injuries: Vec<Injury>,
    pub movement_limitations: Vec<String>,
    pub equipment: Vec<String>,
    pub methodology_preferences: MethodologyPreferences,
}

const ATHLETE_ID_MAX_LEN: usize = 64;
pub const FTP_MIN: u32 = 50;
pub const FTP_MAX: u32 = 500;
pub const BODY_MASS_MIN_KG: f32 = 30.0;
pub const BODY_MASS_MAX_KG: f32 = 200.0;

/// Validates a profile document, accumulating every problem instead of
/// stopping at the first one.
pub fn validate_profile(profile: &Profile, today: NaiveDate) -> ValidationResult {
    let mut result = ValidationResult::new();

    if profile.athlete_id.is_empty() || profile.athlete_id.len() > ATHLETE_ID_MAX_LEN {
        result.push_error("athlete_id", "must be 1-64 characters");
    }
    if !profile
        .athlete_id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        result.push_error(
            "athlete_id",
            "must be a lowercase slug using only letters, digits, hyphen, underscore",
        );
    }

    if profile.email.is_empty() || !profile.email.contains('@') {
        result.push_error("email", "must be a valid email address");
    }

    if !(FTP_MIN..=FTP_MAX).contains(&profile.ftp_watts) {
        result.push_error(
            "ftp_watts",
            format!("must be between {FTP_MIN} and {FTP_MAX} watts"),
        );
    }

    if !(BODY_MASS_MIN_KG..=BODY_MASS_MAX_KG).contains(&profile.body_mass_kg) {
        result.push_error(
            "body_mass_kg",
            format!("must be between {BODY_MASS_MIN_KG} and {BODY_MASS_MAX_KG} kg"),
        );
    }

    let earliest_allowed = today - chrono::Duration::days(7);
    if profile.race_target.date < earliest_allowed {
        result.push_error(
            "race_target.date",
            "race date must be no more than 7 days in the past",
        );
    }

    if profile.weekly_pattern.len() != 7 {
        result.push_error(
            "weekly_pattern",
            "must specify all seven weekdays",
        );
    }

    let has_key_ok_day = profile
        .weekly_pattern
        .values()
        .any(|d| d.is_key_day_ok && d.availability != Availability::Unavailable);
    if !has_key_ok_day {
        result.push_error(
            "weekly_pattern",
            "at least one day must be flagged key-session-ok",
        );
    }

    if profile.training_history.current_weekly_hours <= 0.0 {
        result.push_warning(
            "training_history.current_weekly_hours",
            "zero or negative current weekly hours; classification will default to the lowest tier",
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn minimal_profile() -> Profile {
        let mut weekly_pattern = BTreeMap::new();
        for day in Weekday::ORDER {
            let mut avail = DayAvailability::rest();
            if day == Weekday::Sat {
                avail.availability = Availability::Available;
                avail.is_key_day_ok = true;
                avail.max_session_minutes = 120;
                avail.time_slots = vec![TimeSlot::Am];
            }
            weekly_pattern.insert(day, avail);
        }

        Profile {
            athlete_id: "jane-doe".into(),
            display_name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            age_years: Some(34),
            date_of_birth: None,
            body_mass_kg: 64.0,
            ftp_watts: 220,
            race_target: RaceTarget {
                name: "Unbound Gravel 200".into(),
                race_id: Some("unbound_gravel_200".into()),
                date: NaiveDate::from_ymd_opt(2026, 6, 28).unwrap(),
            },
            b_events: vec![],
            weekly_pattern,
            schedule_constraints: ScheduleConstraints::default(),
            training_history: TrainingHistory {
                years_structured: 2.0,
                highest_ever_weekly_hours: 10.0,
                current_weekly_hours: 6.0,
                strength_training_background: false,
            },
            recent_training_state: RecentTrainingState {
                current_phase: TrainingPhaseState::Base,
                days_since_last_ride: 2,
                coming_off_injury: false,
            },
            health_factors: HealthFactors {
                sleep_hours: 7.0,
                stress_level: Level::Moderate,
                recovery_capacity: Level::Moderate,
            },
            injuries: vec![],
            movement_limitations: vec![],
            equipment: vec!["indoor_trainer".into()],
            methodology_preferences: MethodologyPreferences::default(),
        }
    }

    #[test]
    fn valid_profile_passes() {
        let profile = minimal_profile();
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let result = validate_profile(&profile, today);
        assert!(result.is_valid(), "{:?}", result.issues);
    }

    #[test]
    fn rejects_out_of_range_ftp() {
        let mut profile = minimal_profile();
        profile.ftp_watts = 10;
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let result = validate_profile(&profile, today);
        assert!(!result.is_valid());
        assert!(result.errors().any(|i| i.field == "ftp_watts"));
    }

    #[test]
    fn rejects_profile_with_no_key_ok_day() {
        let mut profile = minimal_profile();
        for avail in profile.weekly_pattern.values_mut() {
            avail.is_key_day_ok = false;
        }
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let result = validate_profile(&profile, today);
        assert!(!result.is_valid());
        assert!(result.errors().any(|i| i.field == "weekly_pattern"));
    }
}
