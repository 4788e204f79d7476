//! Workout types and the four-tuple template shape shared by the scaler,
//! renderer and distribution validator.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    Recovery,
    Easy,
    Endurance,
    Tempo,
    SweetSpot,
    Threshold,
    Vo2Max,
    Anaerobic,
    Sprints,
    Openers,
    FtpTest,
    LongRide,
    RaceSim,
    OverUnder,
    Strength,
    Rest,
}

impl WorkoutType {
    /// File-name-safe rendering: underscores for spaces, matching the
    /// `W{ww}_{Day}_{MonDD}_{Type}.xml` naming convention.
    pub fn file_token(&self) -> &'static str {
        match self {
            WorkoutType::Recovery => "Recovery",
            WorkoutType::Easy => "Easy",
            WorkoutType::Endurance => "Endurance",
            WorkoutType::Tempo => "Tempo",
            WorkoutType::SweetSpot => "Sweet_Spot",
            WorkoutType::Threshold => "Threshold",
            WorkoutType::Vo2Max => "VO2max",
            WorkoutType::Anaerobic => "Anaerobic",
            WorkoutType::Sprints => "Sprints",
            WorkoutType::Openers => "Openers",
            WorkoutType::FtpTest => "FTP_Test",
            WorkoutType::LongRide => "Long_Ride",
            WorkoutType::RaceSim => "Race_Sim",
            WorkoutType::OverUnder => "Over_Under",
            WorkoutType::Strength => "Strength",
            WorkoutType::Rest => "Rest",
        }
    }

    /// Whether two consecutive days of this type would violate the
    /// hard/easy alternation invariant.
    pub fn is_hard(&self) -> bool {
        matches!(
            self,
            WorkoutType::Threshold
                | WorkoutType::Vo2Max
                | WorkoutType::Anaerobic
                | WorkoutType::Sprints
        )
    }

    pub fn is_interval_based(&self) -> bool {
        matches!(
            self,
            WorkoutType::Vo2Max
                | WorkoutType::Threshold
                | WorkoutType::Anaerobic
                | WorkoutType::Sprints
                | WorkoutType::OverUnder
        )
    }

    pub fn is_never_scaled(&self) -> bool {
        matches!(
            self,
            WorkoutType::FtpTest | WorkoutType::Openers | WorkoutType::Rest | WorkoutType::RaceSim
        )
    }

    /// Inverse of [`file_token`](Self::file_token); `None` for an
    /// unrecognized token rather than guessing.
    pub fn from_file_token(token: &str) -> Option<Self> {
        Some(match token {
            "Recovery" => WorkoutType::Recovery,
            "Easy" => WorkoutType::Easy,
            "Endurance" => WorkoutType::Endurance,
            "Tempo" => WorkoutType::Tempo,
            "Sweet_Spot" => WorkoutType::SweetSpot,
            "Threshold" => WorkoutType::Threshold,
            "VO2max" => WorkoutType::Vo2Max,
            "Anaerobic" => WorkoutType::Anaerobic,
            "Sprints" => WorkoutType::Sprints,
            "Openers" => WorkoutType::Openers,
            "FTP_Test" => WorkoutType::FtpTest,
            "Long_Ride" => WorkoutType::LongRide,
            "Race_Sim" => WorkoutType::RaceSim,
            "Over_Under" => WorkoutType::OverUnder,
            "Strength" => WorkoutType::Strength,
            "Rest" => WorkoutType::Rest,
            _ => return None,
        })
    }
}

/// A workout filename's parsed fields, per the
/// `W{ww:02d}_{DayAbbr}_{MonDD}_{Type}.xml` naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub week_number: u32,
    pub day_abbrev: String,
    pub workout_type: WorkoutType,
}

/// Parses a generated workout filename, tolerating an optional path prefix
/// and the `.xml` extension. Returns `None` for anything that doesn't
/// follow the convention (e.g. an unrelated file in the workouts
/// directory) rather than erroring the whole scan.
pub fn parse_workout_filename(filename: &str) -> Option<ParsedFilename> {
    let stem = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .strip_suffix(".xml")?;

    let mut parts = stem.splitn(4, '_');
    let week_token = parts.next()?;
    let day_abbrev = parts.next()?;
    let _month_day = parts.next()?;
    let type_token = parts.next()?;

    let week_number = week_token.strip_prefix('W')?.parse::<u32>().ok()?;
    let workout_type = WorkoutType::from_file_token(type_token)?;

    Some(ParsedFilename {
        week_number,
        day_abbrev: day_abbrev.to_string(),
        workout_type,
    })
}

#[cfg(test)]
mod filename_tests {
    use super::*;

    #[test]
    fn round_trips_through_file_token() {
        for wt in [
            WorkoutType::Recovery,
            WorkoutType::SweetSpot,
            WorkoutType::Vo2Max,
            WorkoutType::FtpTest,
            WorkoutType::OverUnder,
        ] {
            assert_eq!(WorkoutType::from_file_token(wt.file_token()), Some(wt));
        }
    }

    #[test]
    fn parses_a_generated_filename() {
        let parsed = parse_workout_filename("W03_Thu_Apr16_Sweet_Spot.xml").unwrap();
        assert_eq!(parsed.week_number, 3);
        assert_eq!(parsed.day_abbrev, "Thu");
        assert_eq!(parsed.workout_type, WorkoutType::SweetSpot);
    }

    #[test]
    fn rejects_unrelated_files() {
        assert!(parse_workout_filename("readme.txt").is_none());
        assert!(parse_workout_filename("W03_Thu_Apr16_Unknown_Type.xml").is_none());
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_token())
    }
}

/// A four-tuple (type, description, template-minutes, average-power-fraction
/// of FTP), the unit the duration scaler consumes and produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutTemplate {
    pub workout_type: WorkoutType,
    pub description: String,
    pub duration_minutes: u32,
    pub avg_power_fraction: f32,
}
