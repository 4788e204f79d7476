//! Methodology selection document — the output of stage 3 (select-methodology).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodologyId {
    TraditionalPyramidal,
    Polarized8020,
    SweetSpotThreshold,
    HiitFocused,
    BlockPeriodization,
    ReversePeriodization,
    AutoregulatedHrv,
    MafLowHr,
    GoatComposite,
    CriticalPowerWPrime,
    InscydMetabolicProfiling,
    DoubleThresholdNorwegian,
    HvliLsdCentric,
}

impl MethodologyId {
    pub const ALL: [MethodologyId; 13] = [
        MethodologyId::TraditionalPyramidal,
        MethodologyId::Polarized8020,
        MethodologyId::SweetSpotThreshold,
        MethodologyId::HiitFocused,
        MethodologyId::BlockPeriodization,
        MethodologyId::ReversePeriodization,
        MethodologyId::AutoregulatedHrv,
        MethodologyId::MafLowHr,
        MethodologyId::GoatComposite,
        MethodologyId::CriticalPowerWPrime,
        MethodologyId::InscydMetabolicProfiling,
        MethodologyId::DoubleThresholdNorwegian,
        MethodologyId::HvliLsdCentric,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Moderate,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ZoneTargets {
    pub z1_z2: f32,
    pub z3: f32,
    pub z4_z5: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub methodology: MethodologyId,
    pub score: i32,
    pub reasons: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodologySelection {
    pub chosen: MethodologyId,
    pub score: i32,
    pub confidence: ConfidenceTier,
    pub target_zones: ZoneTargets,
    pub strength_integration: String,
    pub key_workout_categories: Vec<String>,
    pub progression_style: String,
    pub alternatives: Vec<ScoredCandidate>,
}
