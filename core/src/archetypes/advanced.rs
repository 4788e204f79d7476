//! Advanced archetype catalog: 16 archetypes across 8 categories — two
//! entirely new (Tired VO2max using Format D, Chaos Variability using the
//! deterministic seeded variation), six augmenting base/imported
//! categories.
//!
//! This is the final merge layer: Format D archetypes pair a base endurance
//! ride with intervals layered on at the end, simulating late-race VO2max
//! demand.

use super::seed::{iv, mk, mk_chaos, segs, single, steady, tired, ArchetypeSeed};
use crate::model::archetype::ArchetypeCategory as C;

pub fn seeds() -> Vec<ArchetypeSeed> {
    vec![
        // Tired VO2max (new, 2)
        mk(
            "Tired VO2max 90min+4x3",
            C::TiredVo2,
            tired(5400, 0.62, 4, 180, 1.10, 180, 0.45),
        ),
        mk(
            "Tired VO2max 2hr+5x2",
            C::TiredVo2,
            tired(7200, 0.60, 5, 120, 1.12, 150, 0.45),
        ),
        // Chaos Variability (new, 2)
        mk_chaos(
            "Chaos Gravel Mayhem",
            C::ChaosVariability,
            segs(vec![steady(600, 0.65), steady(90, 1.05), steady(300, 0.70), steady(45, 1.20)]),
        ),
        mk_chaos(
            "Chaos Race Unpredictable",
            C::ChaosVariability,
            segs(vec![steady(420, 0.68), steady(60, 1.15), steady(240, 0.72), steady(30, 1.30)]),
        ),
        // VO2max augment (2)
        mk("VO2max 5x5 Classic", C::Vo2MaxIntervals, iv(5, 300, 1.07, 300, 0.45)),
        mk("VO2max 10x1 Sprint-Finish", C::Vo2MaxIntervals, iv(10, 60, 1.16, 60, 0.48)),
        // Threshold augment (2)
        mk("Threshold 2x25 Race-Pace", C::ThresholdIntervals, iv(2, 1500, 0.96, 300, 0.50)),
        mk("Threshold Stepped 20-15-10", C::ThresholdIntervals, iv(3, 900, 0.97, 180, 0.50)),
        // Sprint Power augment (2)
        mk("Sprints Flying 6x12s", C::SprintPower, iv(6, 12, 1.75, 250, 0.35)),
        mk("Sprints Lead-Out 4x20s", C::SprintPower, iv(4, 20, 1.65, 280, 0.35)),
        // Pyramid Intervals augment (2)
        mk(
            "Pyramid Double 1-2-3-3-2-1",
            C::PyramidIntervals,
            segs(vec![
                steady(60, 1.06), steady(120, 1.02), steady(180, 1.00),
                steady(180, 1.00), steady(120, 1.02), steady(60, 1.06),
            ]),
        ),
        mk(
            "Pyramid Extended 2-4-6-4-2",
            C::PyramidIntervals,
            segs(vec![
                steady(120, 1.04), steady(240, 1.00), steady(360, 0.97),
                steady(240, 1.00), steady(120, 1.04),
            ]),
        ),
        // Race Simulation augment (2)
        mk(
            "Race Sim Full Distance Compressed",
            C::RaceSimulation,
            segs(vec![
                steady(600, 1.05), steady(2400, 0.65), steady(900, 0.95), steady(1800, 0.62), steady(300, 1.10),
            ]),
        ),
        mk(
            "Race Sim Attrition Finish",
            C::RaceSimulation,
            segs(vec![steady(3000, 0.63), steady(600, 0.88), steady(300, 1.08)]),
        ),
        // Endurance Base augment (2)
        mk("Endurance Steady 150", C::EnduranceBase, single(9000, 0.59)),
        mk(
            "Endurance Progressive Build",
            C::EnduranceBase,
            segs(vec![steady(3600, 0.58), steady(1800, 0.65), steady(900, 0.70)]),
        ),
    ]
}
