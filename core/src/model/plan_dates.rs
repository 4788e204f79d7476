//! Plan-dates document — output of stage 5 (calculate-plan-dates).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::profile::Weekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Base,
    Build,
    Peak,
    Maintenance,
    Taper,
    Race,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntry {
    pub weekday: Weekday,
    pub date: NaiveDate,
    pub short_label: String,
    pub filename_prefix: String,
    pub is_race_day: bool,
    pub is_b_race_day: bool,
    pub is_b_race_opener: bool,
    pub is_b_race_easy: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanWeek {
    pub week_number: u32,
    pub phase: Phase,
    pub monday: NaiveDate,
    pub sunday: NaiveDate,
    pub is_race_week: bool,
    pub b_race: Option<String>,
    pub days: Vec<DayEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanDates {
    pub weeks: Vec<PlanWeek>,
}
