//! Base archetype catalog: 45 archetypes across 16 categories, the
//! foundational layer that `imported`/`advanced` build onto. Power
//! fractions and on/off timing follow standard per-category prescriptions
//! (sweet spot 88-94%, threshold 95-100%, VO2max repeats in the 106-120%
//! band, anaerobic/sprint efforts at 150%+ with full recovery).

use super::seed::{iv, mk, segs, single, steady, ramp, ArchetypeSeed};
use crate::model::archetype::ArchetypeCategory as C;

pub fn seeds() -> Vec<ArchetypeSeed> {
    vec![
        // Sweet Spot Intervals (3)
        mk("Sweet Spot 2x20", C::SweetSpotIntervals, iv(2, 1200, 0.90, 300, 0.50)),
        mk("Sweet Spot 3x15", C::SweetSpotIntervals, iv(3, 900, 0.91, 300, 0.50)),
        mk("Sweet Spot 4x12", C::SweetSpotIntervals, iv(4, 720, 0.92, 240, 0.50)),
        // Threshold Intervals (3)
        mk("Threshold 2x15", C::ThresholdIntervals, iv(2, 900, 0.98, 300, 0.50)),
        mk("Threshold 3x10", C::ThresholdIntervals, iv(3, 600, 1.00, 300, 0.50)),
        mk("Threshold 4x8", C::ThresholdIntervals, iv(4, 480, 0.99, 240, 0.50)),
        // VO2max Intervals (3)
        mk("VO2max 5x4", C::Vo2MaxIntervals, iv(5, 240, 1.10, 240, 0.45)),
        mk("VO2max 6x3", C::Vo2MaxIntervals, iv(6, 180, 1.13, 180, 0.45)),
        mk("VO2max 4x5", C::Vo2MaxIntervals, iv(4, 300, 1.08, 240, 0.45)),
        // Anaerobic Capacity (3)
        mk("Anaerobic 8x30s", C::AnaerobicCapacity, iv(8, 30, 1.50, 120, 0.40)),
        mk("Anaerobic 10x30s", C::AnaerobicCapacity, iv(10, 30, 1.45, 120, 0.40)),
        mk("Anaerobic 6x45s", C::AnaerobicCapacity, iv(6, 45, 1.40, 150, 0.40)),
        // Sprint Power (3)
        mk("Sprints 8x15s", C::SprintPower, iv(8, 15, 1.70, 240, 0.35)),
        mk("Sprints 6x20s", C::SprintPower, iv(6, 20, 1.60, 240, 0.35)),
        mk("Sprints 10x10s", C::SprintPower, iv(10, 10, 1.80, 180, 0.35)),
        // Over/Under (3)
        mk("Over-Under 3x12", C::OverUnder, iv(3, 720, 1.05, 720, 0.95)),
        mk("Over-Under 4x9", C::OverUnder, iv(4, 540, 1.04, 540, 0.96)),
        mk("Over-Under 2x16", C::OverUnder, iv(2, 960, 1.06, 960, 0.94)),
        // Tempo Steady (3)
        mk("Tempo Steady 40", C::TempoSteady, single(2400, 0.80)),
        mk("Tempo Steady 60", C::TempoSteady, single(3600, 0.78)),
        mk(
            "Tempo Build Ramp",
            C::TempoSteady,
            segs(vec![steady(900, 0.70), ramp(600, 0.72, 0.82), steady(900, 0.82)]),
        ),
        // Endurance Base (3)
        mk("Endurance Steady 90", C::EnduranceBase, single(5400, 0.62)),
        mk("Endurance Steady 120", C::EnduranceBase, single(7200, 0.60)),
        mk(
            "Endurance with Surges",
            C::EnduranceBase,
            segs(vec![steady(3600, 0.60), steady(300, 0.85), steady(1500, 0.60)]),
        ),
        // Long Ride Steady (3)
        mk("Long Ride 3hr", C::LongRideSteady, single(10800, 0.58)),
        mk("Long Ride 4hr", C::LongRideSteady, single(14400, 0.56)),
        mk(
            "Long Ride Rolling",
            C::LongRideSteady,
            segs(vec![steady(3600, 0.55), ramp(1200, 0.55, 0.68), steady(3600, 0.58)]),
        ),
        // Recovery (2)
        mk("Recovery Spin 30", C::Recovery, single(1800, 0.48)),
        mk("Recovery Spin 45", C::Recovery, single(2700, 0.50)),
        // Openers (2)
        mk(
            "Openers 4x30s",
            C::Openers,
            segs(vec![steady(600, 0.60), steady(30, 1.20), steady(60, 0.55), steady(30, 1.20), steady(600, 0.60)]),
        ),
        mk(
            "Openers Pre-Race",
            C::Openers,
            segs(vec![steady(480, 0.60), steady(20, 1.25), steady(100, 0.55), steady(20, 1.25)]),
        ),
        // Race Simulation (3)
        mk(
            "Race Sim Gravel Surges",
            C::RaceSimulation,
            segs(vec![steady(1800, 0.65), steady(180, 0.95), steady(900, 0.65), steady(180, 1.05), steady(1800, 0.65)]),
        ),
        mk(
            "Race Sim Climb Finish",
            C::RaceSimulation,
            segs(vec![steady(2400, 0.62), ramp(900, 0.70, 0.95), steady(300, 1.00)]),
        ),
        mk(
            "Race Sim Start Surge",
            C::RaceSimulation,
            segs(vec![steady(300, 1.10), steady(2700, 0.64), steady(600, 0.90)]),
        ),
        // Criscross Intervals (3)
        mk(
            "Criscross 85-105 Short",
            C::CriscrossIntervals,
            iv(6, 60, 1.05, 60, 0.85),
        ),
        mk(
            "Criscross 90-110 Long",
            C::CriscrossIntervals,
            iv(5, 90, 1.10, 90, 0.90),
        ),
        mk(
            "Criscross Descending",
            C::CriscrossIntervals,
            segs(vec![steady(180, 1.08), steady(90, 0.85), steady(120, 1.05), steady(90, 0.85), steady(60, 1.02)]),
        ),
        // Pyramid Intervals (3)
        mk(
            "Pyramid 1-2-3-2-1",
            C::PyramidIntervals,
            segs(vec![
                steady(60, 1.05),
                steady(120, 1.02),
                steady(180, 1.00),
                steady(120, 1.02),
                steady(60, 1.05),
            ]),
        ),
        mk(
            "Pyramid Short-Long-Short",
            C::PyramidIntervals,
            segs(vec![steady(90, 1.10), steady(300, 0.98), steady(90, 1.10)]),
        ),
        mk(
            "Pyramid Ascending",
            C::PyramidIntervals,
            segs(vec![steady(60, 1.00), steady(120, 1.02), steady(180, 1.05), steady(240, 1.08)]),
        ),
        // Cadence Work (2)
        mk(
            "High Cadence Spin-ups",
            C::CadenceWork,
            segs(vec![steady(600, 0.60), steady(60, 0.65), steady(600, 0.60)]),
        ),
        mk(
            "Low Cadence Strength",
            C::CadenceWork,
            iv(6, 240, 0.82, 120, 0.55),
        ),
        // Climbing Repeats (3)
        mk("Climbing Repeats 5x5", C::ClimbingRepeats, iv(5, 300, 0.96, 240, 0.55)),
        mk("Climbing Repeats 4x8", C::ClimbingRepeats, iv(4, 480, 0.93, 300, 0.55)),
        mk(
            "Climbing Repeats Seated-Standing",
            C::ClimbingRepeats,
            segs(vec![steady(180, 0.95), steady(60, 1.05), steady(180, 0.95)]),
        ),
    ]
}
