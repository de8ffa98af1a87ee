//! User-segment grammar.
//!
//! Unlike the theme grammars this is a block structure: the reply splits
//! on the literal `User Segment` marker, and each chunk yields a segment
//! name, an optional persona block (captured up to an exclusive
//! `Key Scenarios` marker), and marker-stripped scenario lines.

use super::{case_insensitive_starts_with, collect_marker_lines, strip_marker};
use crate::ideas::{Persona, UserSegment};

const SEGMENT_MARKER: &str = "User Segment";

const TIER1_SEGMENT: &str = "Primary Users";

fn placeholder() -> UserSegment {
    UserSegment {
        name: "General Users".to_string(),
        persona: Some(Persona {
            name: "Alex".to_string(),
            description: "A representative user encountering this challenge in daily life."
                .to_string(),
        }),
        scenarios: vec![
            "Encounters the problem for the first time and looks for guidance.".to_string(),
            "Returns regularly and wants the experience to be faster.".to_string(),
            "Hits an edge case and needs a clear way to recover.".to_string(),
        ],
    }
}

/// Parses a user-context reply into segments. Never returns an empty
/// list.
pub fn parse_user_segments(reply: &str) -> Vec<UserSegment> {
    let mut parts = reply.split(SEGMENT_MARKER);
    // Text before the first marker is preamble, not a segment.
    let _preamble = parts.next();

    let mut segments: Vec<UserSegment> = Vec::new();
    for chunk in parts {
        if let Some(segment) = parse_chunk(chunk, segments.len() + 1) {
            segments.push(segment);
        }
    }
    if !segments.is_empty() {
        return segments;
    }

    let scenarios = collect_marker_lines(reply);
    if !scenarios.is_empty() {
        return vec![UserSegment {
            name: TIER1_SEGMENT.to_string(),
            persona: None,
            scenarios,
        }];
    }

    vec![placeholder()]
}

/// Which block of a segment chunk a line belongs to.
enum Block {
    Lead,
    Persona,
    Scenarios,
}

fn parse_chunk(chunk: &str, ordinal: usize) -> Option<UserSegment> {
    let mut lines = chunk.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines.next()?;
    let name = match header.split_once(':') {
        Some((_, after)) => after.trim(),
        None => header,
    };
    let name = if name.is_empty() {
        format!("User Segment {ordinal}")
    } else {
        name.to_string()
    };

    let mut block = Block::Lead;
    let mut persona_text = String::new();
    let mut scenarios: Vec<String> = Vec::new();
    let mut lead_markers: Vec<String> = Vec::new();

    for line in lines {
        if case_insensitive_starts_with(line, "key scenarios") {
            block = Block::Scenarios;
            continue;
        }
        if matches!(block, Block::Lead) && case_insensitive_starts_with(line, "persona") {
            block = Block::Persona;
            persona_text.push_str(line);
            continue;
        }
        match block {
            Block::Lead => {
                if let Some(item) = strip_marker(line) {
                    lead_markers.push(item.to_string());
                }
            }
            Block::Persona => {
                if !persona_text.is_empty() {
                    persona_text.push(' ');
                }
                persona_text.push_str(line);
            }
            Block::Scenarios => {
                if let Some(item) = strip_marker(line) {
                    scenarios.push(item.to_string());
                }
            }
        }
    }

    // Without an explicit Key Scenarios block, marker lines outside the
    // persona block stand in for scenarios.
    if scenarios.is_empty() {
        scenarios = lead_markers;
    }

    Some(UserSegment {
        name,
        persona: parse_persona(&persona_text),
        scenarios,
    })
}

/// Persona name is the text before the first colon or period of the
/// block; the remainder is the description.
fn parse_persona(text: &str) -> Option<Persona> {
    let text = text.trim();
    let text = if case_insensitive_starts_with(text, "persona") {
        let rest = text["persona".len()..].trim_start();
        rest.strip_prefix(':').map_or(rest, str::trim_start)
    } else {
        text
    };
    if text.is_empty() {
        return None;
    }

    let split_at = match (text.find(':'), text.find('.')) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    };
    let (name, description) = match split_at {
        Some(i) => (text[..i].trim(), text[i + 1..].trim()),
        None => (text, ""),
    };
    if name.is_empty() {
        return None;
    }
    Some(Persona {
        name: name.to_string(),
        description: description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = "Here are the segments.\n\nUser Segment 1: Daily Commuters\nPersona: Maya. A 34-year-old nurse who rides the 6am bus in all weather.\nKey Scenarios:\n1. Checks arrival times before leaving home\n2. Waits outside in freezing rain\n\nUser Segment 2: Occasional Riders\nPersona: Tom. Rides only when his car is in the shop.\nKey Scenarios:\n- Struggles to find the right stop\n";

    #[test]
    fn segments_parse_with_personas_and_scenarios() {
        let segments = parse_user_segments(REPLY);
        assert_eq!(segments.len(), 2);

        assert_eq!(segments[0].name, "Daily Commuters");
        let persona = segments[0].persona.as_ref().unwrap();
        assert_eq!(persona.name, "Maya");
        assert!(persona.description.starts_with("A 34-year-old nurse"));
        assert_eq!(
            segments[0].scenarios,
            vec![
                "Checks arrival times before leaving home",
                "Waits outside in freezing rain"
            ]
        );

        assert_eq!(segments[1].name, "Occasional Riders");
        assert_eq!(segments[1].scenarios.len(), 1);
    }

    #[test]
    fn preamble_text_is_not_a_segment() {
        let segments = parse_user_segments(REPLY);
        assert!(segments.iter().all(|s| s.name != "Here are the segments."));
    }

    #[test]
    fn persona_name_splits_on_first_colon_or_period() {
        let persona = parse_persona("Persona: Sam: an analyst. Works remotely.").unwrap();
        assert_eq!(persona.name, "Sam");
        let persona = parse_persona("Persona: Riley. Designs for fun.").unwrap();
        assert_eq!(persona.name, "Riley");
        assert_eq!(persona.description, "Designs for fun.");
    }

    #[test]
    fn marker_lines_without_structure_become_primary_users() {
        let segments = parse_user_segments("1. parents\n2. students\n");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].name, "Primary Users");
        assert!(segments[0].persona.is_none());
        assert_eq!(segments[0].scenarios, vec!["parents", "students"]);
    }

    #[test]
    fn empty_reply_yields_placeholder_segment() {
        let segments = parse_user_segments("");
        assert_eq!(segments.len(), 1);
        assert!(segments[0].persona.is_some());
        assert_eq!(segments[0].scenarios.len(), 3);
    }

    #[test]
    fn missing_key_scenarios_header_still_collects_markers() {
        let reply = "User Segment 1: Students\n1. cram sessions before exams\n2. group study coordination";
        let segments = parse_user_segments(reply);
        assert_eq!(
            segments[0].scenarios,
            vec!["cram sessions before exams", "group study coordination"]
        );
    }
}
