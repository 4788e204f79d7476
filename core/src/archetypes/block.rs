//! Rendered block shapes — the output of archetype rendering, consumed by
//! the XML writer. Distinct from `model::archetype::ArchetypeBody`, which
//! describes the *template*; a `Block` is already duration/power-resolved
//! for one concrete workout.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Block {
    Steady {
        duration_seconds: u32,
        power: f32,
    },
    Intervals {
        repeats: u32,
        on_duration_seconds: u32,
        on_power: f32,
        off_duration_seconds: u32,
        off_power: f32,
        text_events: Vec<TextEvent>,
    },
    FreeRide {
        duration_seconds: u32,
        text_events: Vec<TextEvent>,
    },
    Ramp {
        duration_seconds: u32,
        power_low: f32,
        power_high: f32,
    },
    Warmup {
        duration_seconds: u32,
        power_low: f32,
        power_high: f32,
    },
    Cooldown {
        duration_seconds: u32,
        power_low: f32,
        power_high: f32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextEvent {
    pub timeoffset_seconds: u32,
    pub message: String,
}

impl Block {
    pub fn duration_seconds(&self) -> u32 {
        match self {
            Block::Steady { duration_seconds, .. } => *duration_seconds,
            Block::Intervals {
                repeats,
                on_duration_seconds,
                off_duration_seconds,
                ..
            } => repeats * (on_duration_seconds + off_duration_seconds),
            Block::FreeRide { duration_seconds, .. } => *duration_seconds,
            Block::Ramp { duration_seconds, .. } => *duration_seconds,
            Block::Warmup { duration_seconds, .. } => *duration_seconds,
            Block::Cooldown { duration_seconds, .. } => *duration_seconds,
        }
    }
}
