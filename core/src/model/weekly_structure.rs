//! Weekly structure document — output of stage 6 (build-weekly-structure).

use serde::{Deserialize, Serialize};

use crate::model::profile::Weekday;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRole {
    KeyCardio,
    LongRide,
    EasyRide,
    Strength,
    Recovery,
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaySlot {
    Morning,
    Evening,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub weekday: Weekday,
    pub slots: std::collections::BTreeMap<DaySlotKey, SlotRole>,
}

/// `BTreeMap` keys need `Ord`; wrap `DaySlot` so the map stays deterministic
/// to serialize without leaking a dependency on enum discriminant order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DaySlotKey {
    Morning,
    Evening,
}

impl From<DaySlot> for DaySlotKey {
    fn from(s: DaySlot) -> Self {
        match s {
            DaySlot::Morning => DaySlotKey::Morning,
            DaySlot::Evening => DaySlotKey::Evening,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyStructure {
    pub days: Vec<DaySchedule>,
}
