//! Imported archetype catalog: 34 archetypes across 12 categories — some
//! augment base categories, four are entirely new (Surge, Blended Zone,
//! Neuromuscular Power, Micro-Bursts).
//!
//! The merge builder in `catalog.rs` appends these to whatever `base`
//! already defined for the shared categories.

use super::seed::{iv, mk, segs, single, steady, ArchetypeSeed};
use crate::model::archetype::ArchetypeCategory as C;

pub fn seeds() -> Vec<ArchetypeSeed> {
    vec![
        // Sweet Spot Intervals augment (3)
        mk("Sweet Spot 3x18 Broken", C::SweetSpotIntervals, iv(3, 1080, 0.89, 240, 0.50)),
        mk("Sweet Spot Long 2x25", C::SweetSpotIntervals, iv(2, 1500, 0.88, 300, 0.50)),
        mk("Sweet Spot Short 5x8", C::SweetSpotIntervals, iv(5, 480, 0.93, 180, 0.50)),
        // Threshold Intervals augment (3)
        mk("Threshold 1x30", C::ThresholdIntervals, single(1800, 0.97)),
        mk("Threshold 5x6", C::ThresholdIntervals, iv(5, 360, 1.00, 240, 0.50)),
        mk("Threshold Broken 2x20", C::ThresholdIntervals, iv(2, 1200, 0.96, 300, 0.50)),
        // VO2max Intervals augment (3)
        mk("VO2max 8x2", C::Vo2MaxIntervals, iv(8, 120, 1.15, 120, 0.45)),
        mk("VO2max 3x6", C::Vo2MaxIntervals, iv(3, 360, 1.06, 300, 0.45)),
        mk("VO2max Broken 30/30", C::Vo2MaxIntervals, iv(12, 30, 1.18, 30, 0.50)),
        // Anaerobic Capacity augment (3)
        mk("Anaerobic 5x1min", C::AnaerobicCapacity, iv(5, 60, 1.35, 180, 0.40)),
        mk("Anaerobic 12x20s", C::AnaerobicCapacity, iv(12, 20, 1.55, 100, 0.40)),
        mk("Anaerobic Descending Rest", C::AnaerobicCapacity, iv(7, 30, 1.48, 90, 0.40)),
        // Over/Under augment (3)
        mk("Over-Under Short 6x6", C::OverUnder, iv(6, 360, 1.06, 360, 0.94)),
        mk("Over-Under Long 2x20", C::OverUnder, iv(2, 1200, 1.03, 1200, 0.97)),
        mk("Over-Under Ascending", C::OverUnder, iv(4, 600, 1.07, 480, 0.93)),
        // Tempo Steady augment (3)
        mk("Tempo Rolling 75", C::TempoSteady, single(4500, 0.76)),
        mk(
            "Tempo with Threshold Spikes",
            C::TempoSteady,
            segs(vec![steady(1200, 0.78), steady(120, 1.00), steady(1200, 0.78)]),
        ),
        mk("Tempo Progressive", C::TempoSteady, single(3000, 0.82)),
        // Climbing Repeats augment (3)
        mk("Climbing Repeats 6x4", C::ClimbingRepeats, iv(6, 240, 0.97, 180, 0.55)),
        mk("Climbing Repeats 3x10", C::ClimbingRepeats, iv(3, 600, 0.92, 300, 0.55)),
        mk(
            "Climbing Repeats Over-Geared",
            C::ClimbingRepeats,
            iv(5, 300, 0.90, 180, 0.55),
        ),
        // Cadence Work augment (2)
        mk("Cadence Drills 8x1min", C::CadenceWork, iv(8, 60, 0.72, 60, 0.60)),
        mk("Single-Leg Drills", C::CadenceWork, iv(6, 60, 0.55, 60, 0.55)),
        // Surge Intervals (new, 3)
        mk(
            "Surge Intervals 6x(4min+20s)",
            C::SurgeIntervals,
            segs(vec![
                steady(220, 0.75), steady(20, 1.30), steady(220, 0.75), steady(20, 1.30),
                steady(220, 0.75), steady(20, 1.30),
            ]),
        ),
        mk(
            "Surge Intervals Race-Style",
            C::SurgeIntervals,
            segs(vec![steady(300, 0.70), steady(30, 1.40), steady(300, 0.70), steady(30, 1.40)]),
        ),
        mk(
            "Surge Intervals Long Base",
            C::SurgeIntervals,
            segs(vec![steady(600, 0.65), steady(45, 1.25), steady(600, 0.65)]),
        ),
        // Blended Zone (new, 3)
        mk(
            "Blended Tempo-Threshold",
            C::BlendedZone,
            segs(vec![steady(900, 0.80), steady(600, 0.98), steady(900, 0.80)]),
        ),
        mk(
            "Blended Endurance-Sweet Spot",
            C::BlendedZone,
            segs(vec![steady(1800, 0.62), steady(900, 0.90), steady(1800, 0.62)]),
        ),
        mk(
            "Blended Threshold-VO2max",
            C::BlendedZone,
            segs(vec![steady(600, 0.98), steady(180, 1.10), steady(600, 0.98)]),
        ),
        // Neuromuscular Power (new, 3)
        mk("Neuromuscular 10x8s Max", C::NeuromuscularPower, iv(10, 8, 2.00, 180, 0.35)),
        mk("Neuromuscular Standing Starts 6x6s", C::NeuromuscularPower, iv(6, 6, 1.95, 210, 0.35)),
        mk("Neuromuscular Flying 8x10s", C::NeuromuscularPower, iv(8, 10, 1.90, 170, 0.35)),
        // Micro-Bursts (new, 2)
        mk("Micro-Bursts 20x15/15", C::MicroBursts, iv(20, 15, 1.30, 15, 0.50)),
        mk("Micro-Bursts 30x10/20", C::MicroBursts, iv(30, 10, 1.35, 20, 0.45)),
    ]
}
