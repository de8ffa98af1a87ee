//! "How might we" reframe grammar.
//!
//! Records are single statements, normalized to begin with the canonical
//! phrase. Tier 1 re-scans for bare list items and `HMW`/`How` lines;
//! tier 2 emits three generic reframes under one theme.

use super::{
    LineClass, ThemeAccum, bucket_into_themes, case_insensitive_starts_with, classify_line,
    strip_marker,
};
use crate::ideas::Theme;

const CANONICAL_PREFIX: &str = "How might we";
const TIER1_LABELS: [&str; 3] = ["Reframing", "Exploration", "Innovation"];
const TIER1_CHUNK: usize = 4;

const PLACEHOLDER_THEME: &str = "Design Exploration";
const PLACEHOLDERS: [&str; 3] = [
    "How might we approach this challenge from a user-centered perspective?",
    "How might we leverage technology to solve this problem?",
    "How might we create sustainable solutions for this challenge?",
];

/// Parses a reframe reply into themed statements. Never returns an empty
/// structure.
pub fn parse_reframes(reply: &str) -> Vec<Theme<String>> {
    let mut accum: ThemeAccum<String> = ThemeAccum::new();
    let mut open: Option<String> = None;

    for line in reply.lines() {
        match classify_line(line, accum.theme_open()) {
            LineClass::ThemeHeader(name) | LineClass::AdHocHeader(name) => {
                flush(&mut accum, &mut open);
                accum.open(name);
            }
            LineClass::ListItem(text) => {
                flush(&mut accum, &mut open);
                if accum.theme_open() && !text.is_empty() {
                    open = Some(normalize_hmw(text));
                }
            }
            LineClass::Continuation(text) => match open.as_mut() {
                Some(statement) => {
                    statement.push(' ');
                    statement.push_str(text);
                }
                // A bare line under a theme starts a statement of its own.
                None if accum.theme_open() => open = Some(normalize_hmw(text)),
                None => {}
            },
            LineClass::Blank => flush(&mut accum, &mut open),
        }
    }
    flush(&mut accum, &mut open);

    let themes = accum.finish();
    if !themes.is_empty() {
        return themes;
    }

    let flat = rescan_flat(reply);
    if !flat.is_empty() {
        return bucket_into_themes(flat, TIER1_LABELS, TIER1_CHUNK);
    }

    vec![Theme::new(PLACEHOLDER_THEME).with_items(PLACEHOLDERS.map(String::from))]
}

fn flush(accum: &mut ThemeAccum<String>, open: &mut Option<String>) {
    if let Some(statement) = open.take() {
        accum.push_item(statement);
    }
}

/// Tier 1: flat scan for marker lines and `HMW`/`How` lines anywhere in
/// the reply, each normalized to a canonical statement.
fn rescan_flat(reply: &str) -> Vec<String> {
    reply
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if let Some(stripped) = strip_marker(line) {
                Some(stripped)
            } else if case_insensitive_starts_with(line, "hmw")
                || case_insensitive_starts_with(line, "how")
            {
                Some(line)
            } else {
                None
            }
        })
        .map(strip_hmw_shorthand)
        .filter(|text| !text.is_empty())
        .map(normalize_hmw)
        .collect()
}

/// Drops a leading `HMW` shorthand (and a following colon) so the
/// statement re-normalizes cleanly.
fn strip_hmw_shorthand(text: &str) -> &str {
    // Not "how...": normalize_hmw already recognizes the full phrase.
    if case_insensitive_starts_with(text, "hmw") && !case_insensitive_starts_with(text, "how") {
        let rest = text[3..].trim_start();
        rest.strip_prefix(':').map_or(rest, str::trim_start)
    } else {
        text
    }
}

/// Canonicalizes a statement to begin with `How might we`, lower-casing
/// the first letter of the remainder when prefixing. Idempotent: an
/// already-canonical statement passes through unchanged.
#[must_use]
pub fn normalize_hmw(text: &str) -> String {
    let text = text.trim();
    if case_insensitive_starts_with(text, CANONICAL_PREFIX) {
        return text.to_string();
    }
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => format!(
            "{CANONICAL_PREFIX} {}{}",
            first.to_lowercase(),
            chars.as_str()
        ),
        None => CANONICAL_PREFIX.to_string(),
    }
}
