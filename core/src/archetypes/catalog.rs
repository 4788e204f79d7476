//! Merge-at-load archetype registry.
//!
//! `base`, `imported`, and `advanced` layers are combined in that order;
//! within a category, a later definition with the same name as an earlier
//! one is dropped (first definition wins); an entirely new category is
//! added whole. The result is frozen behind a `once_cell::Lazy` — read-only,
//! process-wide, loaded once.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::archetypes::{advanced, base, imported};
use crate::archetypes::seed::{level_power_multiplier, scale_body, ArchetypeSeed, ShapeSeedBody};
use crate::model::archetype::{Archetype, ArchetypeCategory};

pub const EXPECTED_ARCHETYPE_COUNT: usize = 95;
pub const EXPECTED_CATEGORY_COUNT: usize = 22;
pub const LEVELS_PER_ARCHETYPE: u8 = 6;
pub const EXPECTED_VARIATION_COUNT: usize = EXPECTED_ARCHETYPE_COUNT * LEVELS_PER_ARCHETYPE as usize;

struct Definition {
    name: String,
    category: ArchetypeCategory,
    body: ShapeSeedBody,
    is_chaos: bool,
}

pub struct ArchetypeRegistry {
    by_category: BTreeMap<ArchetypeCategory, Vec<Definition>>,
}

fn merge_layer(
    by_category: &mut BTreeMap<ArchetypeCategory, Vec<Definition>>,
    seeds: Vec<ArchetypeSeed>,
) {
    for seed in seeds {
        let entry = by_category.entry(seed.category).or_default();
        let collision = entry.iter().any(|d| d.name == seed.name);
        if collision {
            // first definition wins; later layers never override a name
            // already present in this category.
            continue;
        }
        entry.push(Definition {
            name: seed.name.to_string(),
            category: seed.category,
            body: seed.shape.into(),
            is_chaos: seed.is_chaos,
        });
    }
}

fn build_registry() -> ArchetypeRegistry {
    let mut by_category: BTreeMap<ArchetypeCategory, Vec<Definition>> = BTreeMap::new();
    merge_layer(&mut by_category, base::seeds());
    merge_layer(&mut by_category, imported::seeds());
    merge_layer(&mut by_category, advanced::seeds());
    ArchetypeRegistry { by_category }
}

pub static REGISTRY: Lazy<ArchetypeRegistry> = Lazy::new(build_registry);

impl ArchetypeRegistry {
    pub fn total_archetypes(&self) -> usize {
        self.by_category.values().map(|v| v.len()).sum()
    }

    pub fn categories(&self) -> usize {
        self.by_category.len()
    }

    pub fn total_variations(&self) -> usize {
        self.total_archetypes() * LEVELS_PER_ARCHETYPE as usize
    }

    /// Selects an archetype from `category` at `level` (1..=6). The
    /// variation index is taken modulo the category's archetype count so
    /// repeated weeks cycle through every archetype rather than repeating
    /// the first one. `methodology_offset` lets different methodologies
    /// prefer different starting points in the same category's rotation.
    pub fn select(
        &self,
        category: ArchetypeCategory,
        level: u8,
        variation_index: u32,
        methodology_offset: u32,
    ) -> Option<Archetype> {
        let defs = self.by_category.get(&category)?;
        if defs.is_empty() {
            return None;
        }
        let idx = ((variation_index + methodology_offset) as usize) % defs.len();
        let def = &defs[idx];
        Some(self.instantiate(def, level))
    }

    fn instantiate(&self, def: &Definition, level: u8) -> Archetype {
        let level = level.clamp(1, LEVELS_PER_ARCHETYPE);
        let body = scale_body(&def.body, level);
        let (structure, cues, cadence, position) = category_prescription(def.category);
        Archetype {
            name: def.name.clone(),
            category: def.category,
            level,
            body,
            structure: structure.to_string(),
            execution_cues: cues.to_string(),
            cadence_prescription: cadence.to_string(),
            position_prescription: position.to_string(),
            is_chaos: def.is_chaos,
        }
    }

    /// Every category present in the registry, for catalog reports and
    /// self-tests.
    pub fn category_list(&self) -> Vec<ArchetypeCategory> {
        self.by_category.keys().copied().collect()
    }

    /// Deterministic seed for a chaos archetype's rendering, derived from
    /// (category, level, variation) only — no wall-clock, no OS entropy —
    /// so identical inputs always produce an identical rng stream.
    pub fn chaos_rng(category: ArchetypeCategory, level: u8, variation: u32) -> StdRng {
        let mut hasher_input = format!("{:?}:{}:{}", category, level, variation);
        // Simple, stable fold into a u64 seed; deliberately not a
        // cryptographic hash, just needs to be deterministic and well
        // distributed across small input changes.
        let mut seed: u64 = 0xcbf29ce484222325;
        for byte in hasher_input.drain(..).map(|c| c as u64) {
            seed ^= byte;
            seed = seed.wrapping_mul(0x100000001b3);
        }
        StdRng::seed_from_u64(seed)
    }
}

fn category_prescription(category: ArchetypeCategory) -> (&'static str, &'static str, &'static str, &'static str) {
    use ArchetypeCategory::*;
    match category {
        SweetSpotIntervals => ("steady-state intervals just below threshold", "hold a smooth, sustainable effort; avoid surging", "85-95rpm", "seated"),
        ThresholdIntervals => ("intervals at functional threshold power", "effort should feel 'comfortably hard'; breathing controlled but labored", "85-95rpm", "seated"),
        Vo2MaxIntervals => ("short, hard intervals above threshold", "go out steady, don't blow up in the first interval", "90-100rpm", "seated, standing on last rep if needed"),
        AnaerobicCapacity => ("very short maximal efforts with long recovery", "full recovery between reps; quality over fatigue", "fast, 100+rpm", "seated or standing"),
        SprintPower => ("maximal sprint efforts from a rolling start", "explosive out of the gate, settle into max sustainable cadence", "build rapidly to 110+rpm", "standing start, seated finish"),
        OverUnder => ("alternating above/below threshold power", "the 'over' should feel hard but controlled; resist easing off early", "85-95rpm", "seated"),
        TempoSteady => ("sustained moderate-intensity steady effort", "conversational-to-moderate effort, should be repeatable daily", "80-90rpm", "seated"),
        EnduranceBase => ("long steady aerobic effort", "nose-breathing pace; fuel and hydrate on a schedule", "80-90rpm", "seated"),
        LongRideSteady => ("extended steady-state aerobic ride", "practice race-day fueling and pacing", "75-90rpm", "seated, mix in standing for comfort"),
        Recovery => ("very easy spin", "power is a ceiling, not a target; skip if legs are still heavy", "85-95rpm", "seated"),
        Openers => ("short efforts to prime the legs before a key event", "crisp, not exhausting; stop well short of fatigue", "95-105rpm", "seated"),
        RaceSimulation => ("variable-intensity ride mimicking race demands", "practice surging out of the saddle and settling back down", "variable", "mixed"),
        TiredVo2 => ("long base ride followed by VO2max intervals on tired legs", "the point is doing quality work while fatigued, like late in a race", "90-100rpm on intervals", "seated"),
        CriscrossIntervals => ("rapidly alternating high/moderate power", "anticipate each transition; don't coast into the 'on' segment", "90-100rpm", "seated"),
        MicroBursts => ("very short, frequent high-power bursts", "stay relaxed on the 'off' segments; this is about repeatability", "100+rpm on bursts", "seated"),
        PyramidIntervals => ("durations that build then taper across an interval set", "pace evenly; the middle interval is the hardest by design", "90-100rpm", "seated"),
        CadenceWork => ("power held constant while cadence is prescribed", "focus on smooth pedal stroke, not raw power", "prescribed per segment", "seated"),
        ClimbingRepeats => ("sustained climbing-style efforts", "find a cadence you could hold for 20 more minutes", "70-85rpm", "seated and standing blend"),
        SurgeIntervals => ("steady effort punctuated by short surges", "the surge should spike hard then return to base smoothly", "100+rpm on surges", "seated"),
        BlendedZone => ("effort that moves across two adjacent intensity zones", "treat each segment as its own workout; don't let the easier segment bleed into the harder one", "85-95rpm", "seated"),
        NeuromuscularPower => ("maximal very-short efforts for peak power", "full recovery is mandatory; this is not a conditioning workout", "as fast as possible", "standing"),
        ChaosVariability => ("deterministically randomized segment pattern simulating unpredictable terrain/pack dynamics", "react to what the workout throws at you; no two executions look identical, but a given plan always renders the same one", "variable", "mixed"),
    }
}

pub fn verify_registry_shape() -> Result<(), String> {
    let reg = &REGISTRY;
    if reg.total_archetypes() != EXPECTED_ARCHETYPE_COUNT {
        return Err(format!(
            "expected {} archetypes, found {}",
            EXPECTED_ARCHETYPE_COUNT,
            reg.total_archetypes()
        ));
    }
    if reg.categories() != EXPECTED_CATEGORY_COUNT {
        return Err(format!(
            "expected {} categories, found {}",
            EXPECTED_CATEGORY_COUNT,
            reg.categories()
        ));
    }
    if reg.total_variations() != EXPECTED_VARIATION_COUNT {
        return Err(format!(
            "expected {} variations, found {}",
            EXPECTED_VARIATION_COUNT,
            reg.total_variations()
        ));
    }
    let all_categories: HashSet<_> = ArchetypeCategory::ALL.iter().copied().collect();
    let reg_categories: HashSet<_> = reg.category_list().into_iter().collect();
    if all_categories != reg_categories {
        return Err("registry categories do not match ArchetypeCategory::ALL".to_string());
    }
    let _ = level_power_multiplier(1);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_has_exactly_95_archetypes_22_categories_570_variations() {
        verify_registry_shape().expect("registry shape self-test");
    }

    #[test]
    fn select_cycles_through_category_via_modulo() {
        let a = REGISTRY
            .select(ArchetypeCategory::SweetSpotIntervals, 3, 0, 0)
            .unwrap();
        let b = REGISTRY
            .select(ArchetypeCategory::SweetSpotIntervals, 3, 6, 0)
            .unwrap();
        // six sweet-spot archetypes total (3 base + 3 imported) so index 6
        // wraps back to the same entry as index 0.
        assert_eq!(a.name, b.name);
    }

    #[test]
    fn merge_dedup_first_definition_wins() {
        let mut by_category: BTreeMap<ArchetypeCategory, Vec<Definition>> = BTreeMap::new();
        merge_layer(
            &mut by_category,
            vec![super::super::seed::mk(
                "Dup",
                ArchetypeCategory::Recovery,
                super::super::seed::single(100, 0.5),
            )],
        );
        merge_layer(
            &mut by_category,
            vec![super::super::seed::mk(
                "Dup",
                ArchetypeCategory::Recovery,
                super::super::seed::single(999, 0.9),
            )],
        );
        let defs = &by_category[&ArchetypeCategory::Recovery];
        assert_eq!(defs.len(), 1);
        match &defs[0].body {
            ShapeSeedBody::Single { duration_s, .. } => assert_eq!(*duration_s, 100),
            _ => panic!("expected single effort"),
        }
    }

    #[test]
    fn chaos_seed_is_deterministic() {
        let mut a = ArchetypeRegistry::chaos_rng(ArchetypeCategory::ChaosVariability, 3, 5);
        let mut b = ArchetypeRegistry::chaos_rng(ArchetypeCategory::ChaosVariability, 3, 5);
        use rand::Rng;
        let x: u32 = a.gen();
        let y: u32 = b.gen();
        assert_eq!(x, y);
    }

    #[test]
    fn power_fractions_within_bounds_for_all_archetypes_and_levels() {
        for category in ArchetypeCategory::ALL {
            let count = REGISTRY.by_category.get(&category).map(|v| v.len()).unwrap_or(0);
            for idx in 0..count as u32 {
                for level in 1..=LEVELS_PER_ARCHETYPE {
                    let arch = REGISTRY.select(category, level, idx, 0).unwrap();
                    assert_powers_in_bounds(&arch);
                }
            }
        }
    }

    fn assert_powers_in_bounds(arch: &Archetype) {
        use crate::model::archetype::ArchetypeBody::*;
        match &arch.body {
            Intervals(f) => {
                assert!((0.3..=2.0).contains(&f.on_power), "{} on_power {}", arch.name, f.on_power);
                assert!((0.3..=2.0).contains(&f.off_power), "{} off_power {}", arch.name, f.off_power);
            }
            Segments(f) => {
                for s in &f.segments {
                    if let Some(p) = s.power {
                        assert!((0.3..=2.0).contains(&p), "{} segment power {}", arch.name, p);
                    }
                    if let Some(p) = s.power_low {
                        assert!((0.3..=2.0).contains(&p), "{} ramp low {}", arch.name, p);
                    }
                    if let Some(p) = s.power_high {
                        assert!((0.3..=2.0).contains(&p), "{} ramp high {}", arch.name, p);
                    }
                }
            }
            SingleEffort(f) => {
                assert!((0.3..=2.0).contains(&f.power), "{} power {}", arch.name, f.power);
            }
            TiredVo2(f) => {
                assert!((0.3..=2.0).contains(&f.base_power));
                assert!((0.3..=2.0).contains(&f.intervals.on_power));
            }
        }
    }
}
