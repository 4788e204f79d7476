//! ZWO-format workout XML writer.
//!
//! Hand-written rather than built on a generic XML crate: the output format
//! has a small, fixed set of tags and a byte-exact layout convention
//! (single-quoted XML declaration, 2-space indent for `<author>`/`<name>`/
//! etc., 4-space indent for every block element inside `<workout>`, never
//! 6 or 8) that a generic serializer would not reproduce without per-field
//! overrides anyway.

use std::fmt::Write as _;

use crate::archetypes::block::{Block, TextEvent};

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn fmt_power(power: f32) -> String {
    let rounded = (power * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        let s = format!("{:.3}", rounded);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn write_text_events(out: &mut String, events: &[TextEvent], indent: &str) {
    for event in events {
        let _ = writeln!(
            out,
            "{indent}<textevent timeoffset=\"{}\" message=\"{}\"/>",
            event.timeoffset_seconds,
            escape_xml(&event.message)
        );
    }
}

fn write_block(out: &mut String, block: &Block) {
    const INDENT: &str = "    ";
    match block {
        Block::Warmup { duration_seconds, power_low, power_high } => {
            let _ = writeln!(
                out,
                "{INDENT}<Warmup Duration=\"{duration_seconds}\" PowerLow=\"{}\" PowerHigh=\"{}\"/>",
                fmt_power(*power_low),
                fmt_power(*power_high)
            );
        }
        Block::Cooldown { duration_seconds, power_low, power_high } => {
            let _ = writeln!(
                out,
                "{INDENT}<Cooldown Duration=\"{duration_seconds}\" PowerLow=\"{}\" PowerHigh=\"{}\"/>",
                fmt_power(*power_low),
                fmt_power(*power_high)
            );
        }
        Block::Ramp { duration_seconds, power_low, power_high } => {
            let _ = writeln!(
                out,
                "{INDENT}<Ramp Duration=\"{duration_seconds}\" PowerLow=\"{}\" PowerHigh=\"{}\"/>",
                fmt_power(*power_low),
                fmt_power(*power_high)
            );
        }
        Block::Steady { duration_seconds, power } => {
            let _ = writeln!(
                out,
                "{INDENT}<SteadyState Duration=\"{duration_seconds}\" Power=\"{}\"/>",
                fmt_power(*power)
            );
        }
        Block::Intervals {
            repeats,
            on_duration_seconds,
            on_power,
            off_duration_seconds,
            off_power,
            text_events,
        } => {
            if text_events.is_empty() {
                let _ = writeln!(
                    out,
                    "{INDENT}<IntervalsT Repeat=\"{repeats}\" OnDuration=\"{on_duration_seconds}\" OffDuration=\"{off_duration_seconds}\" OnPower=\"{}\" OffPower=\"{}\"/>",
                    fmt_power(*on_power),
                    fmt_power(*off_power)
                );
            } else {
                let _ = writeln!(
                    out,
                    "{INDENT}<IntervalsT Repeat=\"{repeats}\" OnDuration=\"{on_duration_seconds}\" OffDuration=\"{off_duration_seconds}\" OnPower=\"{}\" OffPower=\"{}\">",
                    fmt_power(*on_power),
                    fmt_power(*off_power)
                );
                write_text_events(out, text_events, "        ");
                out.push_str(&format!("{INDENT}</IntervalsT>\n"));
            }
        }
        Block::FreeRide { duration_seconds, text_events } => {
            if text_events.is_empty() {
                let _ = writeln!(out, "{INDENT}<FreeRide Duration=\"{duration_seconds}\"/>");
            } else {
                let _ = writeln!(out, "{INDENT}<FreeRide Duration=\"{duration_seconds}\">");
                write_text_events(out, text_events, "        ");
                out.push_str(&format!("{INDENT}</FreeRide>\n"));
            }
        }
    }
}

/// Renders a full ZWO document for one workout.
pub fn write_workout_xml(
    name: &str,
    description: &str,
    author: &str,
    sport_type: &str,
    blocks: &[Block],
) -> String {
    let mut out = String::new();
    out.push_str("<?xml version='1.0' encoding='UTF-8'?>\n");
    out.push_str("<workout_file>\n");
    let _ = writeln!(out, "  <author>{}</author>", escape_xml(author));
    let _ = writeln!(out, "  <name>{}</name>", escape_xml(name));
    let _ = writeln!(out, "  <description>{}</description>", escape_xml(description));
    out.push_str("  <sportType>");
    out.push_str(sport_type);
    out.push_str("</sportType>\n");
    out.push_str("  <workout>\n");
    for block in blocks {
        write_block(&mut out, block);
    }
    out.push_str("  </workout>\n");
    out.push_str("</workout_file>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_uses_single_quotes() {
        let xml = write_workout_xml("Test", "desc", "planforge", "bike", &[]);
        assert!(xml.starts_with("<?xml version='1.0' encoding='UTF-8'?>\n"));
    }

    #[test]
    fn block_elements_are_indented_four_spaces() {
        let blocks = vec![Block::Steady { duration_seconds: 600, power: 0.65 }];
        let xml = write_workout_xml("Test", "desc", "planforge", "bike", &blocks);
        assert!(xml.contains("\n    <SteadyState"));
        assert!(!xml.contains("\n      <SteadyState"));
        assert!(!xml.contains("\n        <SteadyState"));
    }

    #[test]
    fn intervals_without_text_events_self_close() {
        let blocks = vec![Block::Intervals {
            repeats: 5,
            on_duration_seconds: 180,
            on_power: 1.1,
            off_duration_seconds: 120,
            off_power: 0.5,
            text_events: vec![],
        }];
        let xml = write_workout_xml("Test", "desc", "planforge", "bike", &blocks);
        assert!(xml.contains("<IntervalsT") && xml.contains("/>"));
        assert!(!xml.contains("</IntervalsT>"));
    }

    #[test]
    fn intervals_with_text_events_carry_textevent_children() {
        let blocks = vec![Block::Intervals {
            repeats: 5,
            on_duration_seconds: 180,
            on_power: 1.1,
            off_duration_seconds: 120,
            off_power: 0.5,
            text_events: vec![TextEvent { timeoffset_seconds: 0, message: "Go hard".to_string() }],
        }];
        let xml = write_workout_xml("Test", "desc", "planforge", "bike", &blocks);
        assert!(xml.contains("<textevent"));
        assert!(xml.contains("</IntervalsT>"));
    }

    #[test]
    fn steady_state_and_warmup_never_carry_textevent() {
        let blocks = vec![
            Block::Warmup { duration_seconds: 300, power_low: 0.4, power_high: 0.6 },
            Block::Steady { duration_seconds: 600, power: 0.65 },
        ];
        let xml = write_workout_xml("Test", "desc", "planforge", "bike", &blocks);
        assert!(!xml.contains("textevent"));
    }

    #[test]
    fn power_formatting_drops_trailing_zeros() {
        assert_eq!(fmt_power(0.65), "0.65");
        assert_eq!(fmt_power(1.0), "1");
        assert_eq!(fmt_power(0.900), "0.9");
    }

    #[test]
    fn xml_special_characters_are_escaped() {
        let xml = write_workout_xml("Tom & Jerry's \"Big\" Day", "desc", "planforge", "bike", &[]);
        assert!(xml.contains("&amp;"));
        assert!(xml.contains("&apos;"));
        assert!(xml.contains("&quot;"));
    }
}
