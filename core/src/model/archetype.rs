//! Archetype catalog entry shapes.
//!
//! Represented as a tagged sum on archetype shape; each caller dispatches
//! on the `ArchetypeBody` enum's variant rather than probing fields.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeCategory {
    SweetSpotIntervals,
    ThresholdIntervals,
    Vo2MaxIntervals,
    AnaerobicCapacity,
    SprintPower,
    OverUnder,
    TempoSteady,
    EnduranceBase,
    LongRideSteady,
    Recovery,
    Openers,
    RaceSimulation,
    TiredVo2,
    CriscrossIntervals,
    MicroBursts,
    PyramidIntervals,
    CadenceWork,
    ClimbingRepeats,
    SurgeIntervals,
    BlendedZone,
    NeuromuscularPower,
    ChaosVariability,
}

impl ArchetypeCategory {
    pub const ALL: [ArchetypeCategory; 22] = [
        ArchetypeCategory::SweetSpotIntervals,
        ArchetypeCategory::ThresholdIntervals,
        ArchetypeCategory::Vo2MaxIntervals,
        ArchetypeCategory::AnaerobicCapacity,
        ArchetypeCategory::SprintPower,
        ArchetypeCategory::OverUnder,
        ArchetypeCategory::TempoSteady,
        ArchetypeCategory::EnduranceBase,
        ArchetypeCategory::LongRideSteady,
        ArchetypeCategory::Recovery,
        ArchetypeCategory::Openers,
        ArchetypeCategory::RaceSimulation,
        ArchetypeCategory::TiredVo2,
        ArchetypeCategory::CriscrossIntervals,
        ArchetypeCategory::MicroBursts,
        ArchetypeCategory::PyramidIntervals,
        ArchetypeCategory::CadenceWork,
        ArchetypeCategory::ClimbingRepeats,
        ArchetypeCategory::SurgeIntervals,
        ArchetypeCategory::BlendedZone,
        ArchetypeCategory::NeuromuscularPower,
        ArchetypeCategory::ChaosVariability,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentType {
    Steady,
    Intervals,
    FreeRide,
    Ramp,
}

/// Format B's segment shape. `power` is a single fraction for steady/
/// freeride segments and the "on" power for interval segments; ramps use
/// `power_low`/`power_high` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Segment {
    pub segment_type: SegmentType,
    pub duration_seconds: u32,
    pub power: Option<f32>,
    pub power_low: Option<f32>,
    pub power_high: Option<f32>,
    pub repeats: Option<u32>,
    pub on_duration_seconds: Option<u32>,
    pub off_duration_seconds: Option<u32>,
    pub off_power: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatA {
    pub repeats: u32,
    pub on_duration_seconds: u32,
    pub on_power: f32,
    pub off_duration_seconds: u32,
    pub off_power: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatB {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatC {
    pub duration_seconds: u32,
    pub power: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatD {
    pub base_duration_seconds: u32,
    pub base_power: f32,
    pub intervals: FormatA,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape")]
pub enum ArchetypeBody {
    Intervals(FormatA),
    Segments(FormatB),
    SingleEffort(FormatC),
    TiredVo2(FormatD),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Archetype {
    pub name: String,
    pub category: ArchetypeCategory,
    /// 1..=6, difficulty level within the category.
    pub level: u8,
    pub body: ArchetypeBody,
    pub structure: String,
    pub execution_cues: String,
    pub cadence_prescription: String,
    pub position_prescription: String,
    /// Some archetypes (the "chaos" variety) vary deterministically by a
    /// seed derived from (category, level, variation) rather than being
    /// fixed — see `crate::archetypes::chaos`.
    pub is_chaos: bool,
}
