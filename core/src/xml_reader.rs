//! Reads back a workout document written by [`crate::xml_writer`], just far
//! enough to recover its total duration. This is the counterpart the CLI's
//! `validate-distribution` command needs when it re-runs the distribution
//! check against artifacts already on disk (no in-memory `WorkoutTemplate`
//! survives a CLI invocation — only the files do).
//!
//! Deliberately not a general XML parser: the writer's output has a small,
//! fixed set of self-closing or simply-nested block tags, so this scans for
//! `Duration=`/`OnDuration=`/`OffDuration=`/`Repeat=` attribute values
//! directly rather than pulling in an XML dependency for five attributes.

fn attr_value<'a>(tag: &'a str, attr: &str) -> Option<&'a str> {
    let needle = format!("{attr}=\"");
    let start = tag.find(&needle)? + needle.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// Sums the duration, in seconds, of every block in a written workout XML
/// document. `IntervalsT` contributes `Repeat * (OnDuration + OffDuration)`;
/// every other block contributes its own `Duration` attribute once.
pub fn total_duration_seconds(xml: &str) -> u32 {
    let mut total = 0u32;
    let mut rest = xml;
    while let Some(tag_start) = rest.find('<') {
        let after = &rest[tag_start + 1..];
        let Some(tag_end) = after.find(|c: char| c == '>' || c == '/') else {
            break;
        };
        let tag_name_end = after.find(|c: char| c.is_whitespace() || c == '>' || c == '/').unwrap_or(tag_end);
        let tag_name = &after[..tag_name_end];
        let tag_body = &after[..tag_end.max(tag_name_end)];

        match tag_name {
            "IntervalsT" => {
                let repeats: u32 = attr_value(tag_body, "Repeat").and_then(|v| v.parse().ok()).unwrap_or(0);
                let on: u32 = attr_value(tag_body, "OnDuration").and_then(|v| v.parse().ok()).unwrap_or(0);
                let off: u32 = attr_value(tag_body, "OffDuration").and_then(|v| v.parse().ok()).unwrap_or(0);
                total += repeats * (on + off);
            }
            "SteadyState" | "Warmup" | "Cooldown" | "Ramp" | "FreeRide" => {
                total += attr_value(tag_body, "Duration").and_then(|v| v.parse().ok()).unwrap_or(0);
            }
            _ => {}
        }

        rest = &rest[tag_start + 1 + tag_end..];
    }
    total
}

/// Rounds seconds to the nearest whole minute, matching the scaler's own
/// minute-granularity rounding.
pub fn total_duration_minutes(xml: &str) -> u32 {
    (total_duration_seconds(xml) as f32 / 60.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes::block::Block;
    use crate::xml_writer::write_workout_xml;

    #[test]
    fn sums_steady_warmup_cooldown() {
        let blocks = vec![
            Block::Warmup { duration_seconds: 600, power_low: 0.5, power_high: 0.75 },
            Block::Steady { duration_seconds: 1800, power: 0.65 },
            Block::Cooldown { duration_seconds: 300, power_low: 0.5, power_high: 0.3 },
        ];
        let xml = write_workout_xml("Test", "desc", "planforge", "bike", &blocks);
        assert_eq!(total_duration_seconds(&xml), 600 + 1800 + 300);
    }

    #[test]
    fn sums_interval_repeats() {
        let blocks = vec![Block::Intervals {
            repeats: 8,
            on_duration_seconds: 30,
            on_power: 1.5,
            off_duration_seconds: 120,
            off_power: 0.5,
            text_events: vec![],
        }];
        let xml = write_workout_xml("Test", "desc", "planforge", "bike", &blocks);
        assert_eq!(total_duration_seconds(&xml), 8 * (30 + 120));
    }

    #[test]
    fn minutes_rounds_to_nearest_whole_minute() {
        let blocks = vec![Block::Steady { duration_seconds: 1830, power: 0.7 }];
        let xml = write_workout_xml("Test", "desc", "planforge", "bike", &blocks);
        assert_eq!(total_duration_minutes(&xml), 31);
    }
}
