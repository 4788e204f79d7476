//! Static known-race table and alias lookup: a fixed registry of races plus
//! a fuzzy alias table for casually typed names ("dk200", "bwr",
//! "steamboat", ...). Process-wide read-only, loaded once.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct KnownRace {
    pub race_id: &'static str,
    pub canonical_name: &'static str,
    pub date: NaiveDate,
    pub distance_miles: u32,
    pub elevation_ft: u32,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid static date")
}

static RACES: Lazy<Vec<KnownRace>> = Lazy::new(|| {
    vec![
        KnownRace { race_id: "unbound_gravel_200", canonical_name: "Unbound Gravel 200", date: date(2026, 5, 30), distance_miles: 200, elevation_ft: 11000 },
        KnownRace { race_id: "unbound_gravel_100", canonical_name: "Unbound Gravel 100", date: date(2026, 5, 30), distance_miles: 100, elevation_ft: 6000 },
        KnownRace { race_id: "unbound_gravel_50", canonical_name: "Unbound Gravel 50", date: date(2026, 5, 30), distance_miles: 50, elevation_ft: 3000 },
        KnownRace { race_id: "unbound_xl", canonical_name: "Unbound XL", date: date(2026, 5, 29), distance_miles: 350, elevation_ft: 18000 },
        KnownRace { race_id: "sbt_grvl", canonical_name: "SBT GRVL", date: date(2026, 6, 28), distance_miles: 142, elevation_ft: 9500 },
        KnownRace { race_id: "sbt_grvl_75", canonical_name: "SBT GRVL 75", date: date(2026, 6, 28), distance_miles: 75, elevation_ft: 5500 },
        KnownRace { race_id: "sbt_grvl_37", canonical_name: "SBT GRVL 37", date: date(2026, 6, 28), distance_miles: 37, elevation_ft: 3200 },
        KnownRace { race_id: "leadville_100", canonical_name: "Leadville Trail 100 MTB", date: date(2026, 8, 15), distance_miles: 100, elevation_ft: 12500 },
        KnownRace { race_id: "belgian_waffle_ride", canonical_name: "Belgian Waffle Ride", date: date(2026, 5, 17), distance_miles: 133, elevation_ft: 11000 },
        KnownRace { race_id: "gravel_worlds", canonical_name: "Gravel Worlds", date: date(2026, 8, 22), distance_miles: 150, elevation_ft: 7500 },
        KnownRace { race_id: "mid_south", canonical_name: "Mid South", date: date(2026, 3, 14), distance_miles: 100, elevation_ft: 3000 },
        KnownRace { race_id: "big_sugar", canonical_name: "Big Sugar Gravel", date: date(2026, 10, 17), distance_miles: 100, elevation_ft: 6500 },
    ]
});

static ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("unbound 200", "unbound_gravel_200"),
        ("unbound gravel 200", "unbound_gravel_200"),
        ("unbound200", "unbound_gravel_200"),
        ("dk200", "unbound_gravel_200"),
        ("dirty kanza", "unbound_gravel_200"),
        ("dirty kanza 200", "unbound_gravel_200"),
        ("unbound 100", "unbound_gravel_100"),
        ("unbound gravel 100", "unbound_gravel_100"),
        ("unbound 50", "unbound_gravel_50"),
        ("unbound gravel 50", "unbound_gravel_50"),
        ("unbound xl", "unbound_xl"),
        ("unbound 350", "unbound_xl"),
        ("sbt grvl", "sbt_grvl"),
        ("sbt gravel", "sbt_grvl"),
        ("steamboat", "sbt_grvl"),
        ("sbt grvl 75", "sbt_grvl_75"),
        ("sbt 75", "sbt_grvl_75"),
        ("sbt grvl 37", "sbt_grvl_37"),
        ("sbt 37", "sbt_grvl_37"),
        ("leadville", "leadville_100"),
        ("leadville 100", "leadville_100"),
        ("belgian waffle ride", "belgian_waffle_ride"),
        ("bwr", "belgian_waffle_ride"),
        ("gravel worlds", "gravel_worlds"),
        ("mid south", "mid_south"),
        ("big sugar", "big_sugar"),
        ("big sugar gravel", "big_sugar"),
    ])
});

fn normalize(input: &str) -> String {
    input
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == ' ' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Looks up a race by its canonical id, a known alias, or a
/// punctuation/case-normalized casual spelling.
pub fn find_race(query: &str) -> Option<&'static KnownRace> {
    let normalized = normalize(query);
    let race_id = if RACES.iter().any(|r| r.race_id == normalized.replace(' ', "_")) {
        normalized.replace(' ', "_")
    } else if let Some(id) = ALIASES.get(normalized.as_str()) {
        id.to_string()
    } else {
        return None;
    };
    RACES.iter().find(|r| r.race_id == race_id)
}

pub fn all_races() -> &'static [KnownRace] {
    &RACES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_race_by_canonical_id() {
        assert!(find_race("unbound_gravel_200").is_some());
    }

    #[test]
    fn finds_race_by_alias() {
        let race = find_race("DK200").expect("alias should resolve");
        assert_eq!(race.race_id, "unbound_gravel_200");
    }

    #[test]
    fn finds_race_by_casual_spelling() {
        let race = find_race("Dirty Kanza").expect("alias should resolve");
        assert_eq!(race.race_id, "unbound_gravel_200");
    }

    #[test]
    fn unknown_race_returns_none() {
        assert!(find_race("made up race").is_none());
    }
}
