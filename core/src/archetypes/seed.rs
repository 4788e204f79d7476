//! Compact archetype fixture format used by `base`, `imported` and
//! `advanced` to describe the 95 catalog entries tersely, then expanded into
//! full `model::archetype::Archetype` values by `catalog::build_registry`.

use crate::model::archetype::{ArchetypeBody, ArchetypeCategory, FormatA, FormatB, FormatC, FormatD, Segment, SegmentType};

#[derive(Debug, Clone)]
pub enum ShapeSeed {
    Intervals {
        repeats: u32,
        on_s: u32,
        on_power: f32,
        off_s: u32,
        off_power: f32,
    },
    Segments(Vec<SegmentSeed>),
    Single {
        duration_s: u32,
        power: f32,
    },
    TiredVo2 {
        base_s: u32,
        base_power: f32,
        repeats: u32,
        on_s: u32,
        on_power: f32,
        off_s: u32,
        off_power: f32,
    },
}

#[derive(Debug, Clone)]
pub struct SegmentSeed {
    pub kind: SegmentType,
    pub duration_s: u32,
    pub power: Option<f32>,
    pub power_low: Option<f32>,
    pub power_high: Option<f32>,
}

pub struct ArchetypeSeed {
    pub name: &'static str,
    pub category: ArchetypeCategory,
    pub shape: ShapeSeed,
    pub is_chaos: bool,
}

pub fn mk(name: &'static str, category: ArchetypeCategory, shape: ShapeSeed) -> ArchetypeSeed {
    ArchetypeSeed {
        name,
        category,
        shape,
        is_chaos: false,
    }
}

pub fn mk_chaos(name: &'static str, category: ArchetypeCategory, shape: ShapeSeed) -> ArchetypeSeed {
    ArchetypeSeed {
        name,
        category,
        shape,
        is_chaos: true,
    }
}

pub fn iv(repeats: u32, on_s: u32, on_power: f32, off_s: u32, off_power: f32) -> ShapeSeed {
    ShapeSeed::Intervals {
        repeats,
        on_s,
        on_power,
        off_s,
        off_power,
    }
}

pub fn single(duration_s: u32, power: f32) -> ShapeSeed {
    ShapeSeed::Single { duration_s, power }
}

pub fn tired(base_s: u32, base_power: f32, repeats: u32, on_s: u32, on_power: f32, off_s: u32, off_power: f32) -> ShapeSeed {
    ShapeSeed::TiredVo2 {
        base_s,
        base_power,
        repeats,
        on_s,
        on_power,
        off_s,
        off_power,
    }
}

pub fn steady(duration_s: u32, power: f32) -> SegmentSeed {
    SegmentSeed {
        kind: SegmentType::Steady,
        duration_s,
        power: Some(power),
        power_low: None,
        power_high: None,
    }
}

pub fn ramp(duration_s: u32, power_low: f32, power_high: f32) -> SegmentSeed {
    SegmentSeed {
        kind: SegmentType::Ramp,
        duration_s,
        power: None,
        power_low: Some(power_low),
        power_high: Some(power_high),
    }
}

pub fn freeride(duration_s: u32) -> SegmentSeed {
    SegmentSeed {
        kind: SegmentType::FreeRide,
        duration_s,
        power: None,
        power_low: None,
        power_high: None,
    }
}

pub fn segs(segments: Vec<SegmentSeed>) -> ShapeSeed {
    ShapeSeed::Segments(segments)
}

/// Level scaling applied at selection time: level 1 is the easiest
/// expression of a template, level 6 the hardest. Power fractions scale
/// around a center at level 3.5; interval repeat counts and on/off timing
/// stay fixed — only intensity moves, so the "shape" of a workout is
/// recognizable across all six levels.
pub fn level_power_multiplier(level: u8) -> f32 {
    // level 1 => 0.85, level 6 => 1.15, linear in between
    0.85 + (level.clamp(1, 6) as f32 - 1.0) * 0.06
}

pub fn scale_body(body: &ShapeSeedBody, level: u8) -> ArchetypeBody {
    let m = level_power_multiplier(level);
    match body {
        ShapeSeedBody::Intervals { repeats, on_s, on_power, off_s, off_power } => {
            ArchetypeBody::Intervals(FormatA {
                repeats: *repeats,
                on_duration_seconds: *on_s,
                on_power: clamp_power(*on_power * m),
                off_duration_seconds: *off_s,
                off_power: clamp_power(*off_power),
            })
        }
        ShapeSeedBody::Segments(segments) => ArchetypeBody::Segments(FormatB {
            segments: segments
                .iter()
                .map(|s| Segment {
                    segment_type: s.kind,
                    duration_seconds: s.duration_s,
                    power: s.power.map(|p| clamp_power(p * m)),
                    power_low: s.power_low.map(|p| clamp_power(p * m)),
                    power_high: s.power_high.map(|p| clamp_power(p * m)),
                    repeats: None,
                    on_duration_seconds: None,
                    off_duration_seconds: None,
                    off_power: None,
                })
                .collect(),
        }),
        ShapeSeedBody::Single { duration_s, power } => ArchetypeBody::SingleEffort(FormatC {
            duration_seconds: *duration_s,
            power: clamp_power(*power * m),
        }),
        ShapeSeedBody::TiredVo2 {
            base_s,
            base_power,
            repeats,
            on_s,
            on_power,
            off_s,
            off_power,
        } => ArchetypeBody::TiredVo2(FormatD {
            base_duration_seconds: *base_s,
            base_power: clamp_power(*base_power),
            intervals: FormatA {
                repeats: *repeats,
                on_duration_seconds: *on_s,
                on_power: clamp_power(*on_power * m),
                off_duration_seconds: *off_s,
                off_power: clamp_power(*off_power),
            },
        }),
    }
}

/// `ShapeSeed` minus the `'static` borrow concerns, used after the owning
/// `ArchetypeSeed` has been consumed into the registry at build time.
pub enum ShapeSeedBody {
    Intervals {
        repeats: u32,
        on_s: u32,
        on_power: f32,
        off_s: u32,
        off_power: f32,
    },
    Segments(Vec<SegmentSeed>),
    Single {
        duration_s: u32,
        power: f32,
    },
    TiredVo2 {
        base_s: u32,
        base_power: f32,
        repeats: u32,
        on_s: u32,
        on_power: f32,
        off_s: u32,
        off_power: f32,
    },
}

impl From<ShapeSeed> for ShapeSeedBody {
    fn from(s: ShapeSeed) -> Self {
        match s {
            ShapeSeed::Intervals { repeats, on_s, on_power, off_s, off_power } => {
                ShapeSeedBody::Intervals { repeats, on_s, on_power, off_s, off_power }
            }
            ShapeSeed::Segments(v) => ShapeSeedBody::Segments(v),
            ShapeSeed::Single { duration_s, power } => ShapeSeedBody::Single { duration_s, power },
            ShapeSeed::TiredVo2 {
                base_s,
                base_power,
                repeats,
                on_s,
                on_power,
                off_s,
                off_power,
            } => ShapeSeedBody::TiredVo2 {
                base_s,
                base_power,
                repeats,
                on_s,
                on_power,
                off_s,
                off_power,
            },
        }
    }
}

fn clamp_power(p: f32) -> f32 {
    p.clamp(0.3, 2.0)
}
