//! Feature-idea grammar.
//!
//! A record splits on an em-dash or a spaced hyphen into feature and
//! rationale; with no separator the whole line is the feature. Rationale
//! continuation lines join space-separated.

use super::{LineClass, ThemeAccum, bucket_into_themes, classify_line, collect_marker_lines};
use crate::ideas::{FeatureIdea, Theme};

const TIER1_LABELS: [&str; 3] = ["Core Features", "Enhancements", "Differentiators"];
const TIER1_CHUNK: usize = 4;

const PLACEHOLDER_THEME: &str = "Feature Ideas";

fn placeholders() -> Vec<FeatureIdea> {
    vec![
        FeatureIdea::new(
            "Guided onboarding",
            "Helps first-time users reach value quickly.",
        ),
        FeatureIdea::new(
            "Contextual feedback",
            "Surfaces relevant information at the moment of need.",
        ),
        FeatureIdea::new(
            "Progress tracking",
            "Lets users see how far they have come and what is next.",
        ),
    ]
}

/// Parses a feature-idea reply into themed feature/rationale records.
/// Never returns an empty structure.
pub fn parse_features(reply: &str) -> Vec<Theme<FeatureIdea>> {
    let mut accum: ThemeAccum<FeatureIdea> = ThemeAccum::new();
    let mut open: Option<FeatureIdea> = None;

    for line in reply.lines() {
        match classify_line(line, accum.theme_open()) {
            LineClass::ThemeHeader(name) | LineClass::AdHocHeader(name) => {
                flush(&mut accum, &mut open);
                accum.open(name);
            }
            LineClass::ListItem(text) => {
                flush(&mut accum, &mut open);
                if accum.theme_open() && !text.is_empty() {
                    open = Some(split_feature(text));
                }
            }
            LineClass::Continuation(text) => match open.as_mut() {
                // Later lines extend the rationale, never the feature label.
                Some(idea) => {
                    if !idea.rationale.is_empty() {
                        idea.rationale.push(' ');
                    }
                    idea.rationale.push_str(text);
                }
                None if accum.theme_open() => open = Some(split_feature(text)),
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

    let flat: Vec<FeatureIdea> = collect_marker_lines(reply)
        .iter()
        .map(|line| split_feature(line))
        .collect();
    if !flat.is_empty() {
        return bucket_into_themes(flat, TIER1_LABELS, TIER1_CHUNK);
    }

    vec![Theme::new(PLACEHOLDER_THEME).with_items(placeholders())]
}

fn flush(accum: &mut ThemeAccum<FeatureIdea>, open: &mut Option<FeatureIdea>) {
    if let Some(idea) = open.take() {
        accum.push_item(idea);
    }
}

/// Splits record text on an em-dash or `" - "` into feature and
/// rationale; the rationale is empty when no separator is present.
fn split_feature(text: &str) -> FeatureIdea {
    let split = text
        .split_once('—')
        .or_else(|| text.split_once(" - "));
    match split {
        Some((feature, rationale)) => FeatureIdea::new(feature.trim(), rationale.trim()),
        None => FeatureIdea::new(text.trim(), ""),
    }
}
