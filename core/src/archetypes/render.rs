//! Block generation: `render(archetype, level, target_duration) -> Vec<Block>`.
//!
//! Always emits a warmup (10-15% of total) and a cooldown (>= 5 min). When
//! the target duration differs from the archetype's native duration for an
//! interval-shaped archetype whose prescription must stay fixed, the
//! difference is absorbed into warmup/cooldown at a 55/45 ratio rather than
//! altering the interval set itself.

use crate::archetypes::block::{Block, TextEvent};
use crate::archetypes::catalog::ArchetypeRegistry;
use crate::model::archetype::{Archetype, ArchetypeBody, SegmentType};

const MIN_COOLDOWN_SECONDS: u32 = 300;
const WARMUP_FRACTION: f32 = 0.12;

pub fn render(archetype: &Archetype, target_duration_seconds: u32) -> Vec<Block> {
    let body_blocks = render_body(archetype);
    let body_duration: u32 = body_blocks.iter().map(|b| b.duration_seconds()).sum();

    let warmup_power = 0.55;
    let cooldown_power = 0.50;

    let total_extra = target_duration_seconds.saturating_sub(body_duration);
    let mut warmup_seconds = (target_duration_seconds as f32 * WARMUP_FRACTION) as u32;
    let mut cooldown_seconds = MIN_COOLDOWN_SECONDS;

    if total_extra > warmup_seconds + cooldown_seconds {
        let remainder = total_extra - warmup_seconds - cooldown_seconds;
        warmup_seconds += (remainder as f32 * 0.55) as u32;
        cooldown_seconds += (remainder as f32 * 0.45) as u32;
    } else if total_extra < warmup_seconds + cooldown_seconds {
        // target is tight: shrink proportionally but keep cooldown at its floor.
        warmup_seconds = total_extra.saturating_sub(MIN_COOLDOWN_SECONDS).max(60);
        cooldown_seconds = MIN_COOLDOWN_SECONDS.min(total_extra.saturating_sub(warmup_seconds).max(60));
    }

    let mut blocks = Vec::with_capacity(body_blocks.len() + 2);
    blocks.push(Block::Warmup {
        duration_seconds: warmup_seconds.max(60),
        power_low: 0.45,
        power_high: warmup_power,
    });
    blocks.extend(body_blocks);
    blocks.push(Block::Cooldown {
        duration_seconds: cooldown_seconds.max(MIN_COOLDOWN_SECONDS),
        power_low: cooldown_power,
        power_high: 0.40,
    });
    blocks
}

fn render_body(archetype: &Archetype) -> Vec<Block> {
    match &archetype.body {
        ArchetypeBody::Intervals(f) => vec![Block::Intervals {
            repeats: f.repeats,
            on_duration_seconds: f.on_duration_seconds,
            on_power: f.on_power,
            off_duration_seconds: f.off_duration_seconds,
            off_power: f.off_power,
            text_events: interval_cues(archetype),
        }],
        ArchetypeBody::Segments(f) => f
            .segments
            .iter()
            .map(|s| match s.segment_type {
                SegmentType::Steady => Block::Steady {
                    duration_seconds: s.duration_seconds,
                    power: s.power.unwrap_or(0.6),
                },
                SegmentType::Ramp => Block::Ramp {
                    duration_seconds: s.duration_seconds,
                    power_low: s.power_low.unwrap_or(0.5),
                    power_high: s.power_high.unwrap_or(0.8),
                },
                SegmentType::FreeRide => Block::FreeRide {
                    duration_seconds: s.duration_seconds,
                    text_events: Vec::new(),
                },
                // Format B rarely nests a repeating interval segment inside
                // a larger segment list; treat it as a steady block at its
                // declared power rather than a second interval shape.
                SegmentType::Intervals => Block::Steady {
                    duration_seconds: s.duration_seconds,
                    power: s.power.unwrap_or(0.6),
                },
            })
            .collect(),
        ArchetypeBody::SingleEffort(f) => vec![Block::Steady {
            duration_seconds: f.duration_seconds,
            power: f.power,
        }],
        ArchetypeBody::TiredVo2(f) => vec![
            Block::Steady {
                duration_seconds: f.base_duration_seconds,
                power: f.base_power,
            },
            Block::Intervals {
                repeats: f.intervals.repeats,
                on_duration_seconds: f.intervals.on_duration_seconds,
                on_power: f.intervals.on_power,
                off_duration_seconds: f.intervals.off_duration_seconds,
                off_power: f.intervals.off_power,
                text_events: interval_cues(archetype),
            },
        ],
    }
}

fn interval_cues(archetype: &Archetype) -> Vec<TextEvent> {
    vec![TextEvent {
        timeoffset_seconds: 0,
        message: format!("{} — go!", archetype.name),
    }]
}

/// Renders a chaos archetype, mutating the steady segments' power by a
/// small deterministic perturbation drawn from the archetype's seeded rng.
pub fn render_chaos(archetype: &Archetype, variation: u32, target_duration_seconds: u32) -> Vec<Block> {
    use rand::Rng;
    let mut rng = ArchetypeRegistry::chaos_rng(archetype.category, archetype.level, variation);
    let mut blocks = render(archetype, target_duration_seconds);
    for block in blocks.iter_mut() {
        if let Block::Steady { power, .. } = block {
            let jitter: f32 = rng.gen_range(-0.05..0.05);
            *power = (*power + jitter).clamp(0.3, 2.0);
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes::catalog::REGISTRY;
    use crate::model::archetype::ArchetypeCategory;

    #[test]
    fn render_always_has_warmup_and_cooldown() {
        let arch = REGISTRY
            .select(ArchetypeCategory::SweetSpotIntervals, 3, 0, 0)
            .unwrap();
        let blocks = render(&arch, 3600);
        assert!(matches!(blocks.first(), Some(Block::Warmup { .. })));
        assert!(matches!(blocks.last(), Some(Block::Cooldown { .. })));
    }

    #[test]
    fn cooldown_is_never_below_floor() {
        let arch = REGISTRY.select(ArchetypeCategory::Recovery, 2, 0, 0).unwrap();
        let blocks = render(&arch, 1200);
        if let Some(Block::Cooldown { duration_seconds, .. }) = blocks.last() {
            assert!(*duration_seconds >= MIN_COOLDOWN_SECONDS);
        } else {
            panic!("expected cooldown");
        }
    }
}
