//! Layout-suggestion grammar.
//!
//! The first line of a record is the title; continuation lines accumulate
//! space-joined into the description. Tier 1 segments the reply on blank
//! lines into title/description pairs; tier 2 emits a placeholder triad.

use super::{LineClass, ThemeAccum, bucket_into_themes, classify_line, strip_marker};
use crate::ideas::{LayoutIdea, Theme};

const TIER1_LABELS: [&str; 3] = [
    "Information Architecture",
    "Interaction Patterns",
    "Content Strategy",
];
const TIER1_CHUNK: usize = 3;

const PLACEHOLDER_THEME: &str = "Layout Directions";

fn placeholders() -> Vec<LayoutIdea> {
    vec![
        LayoutIdea::new(
            "Single-column focus",
            "One primary action per screen with generous whitespace.",
        ),
        LayoutIdea::new(
            "Dashboard overview",
            "Key status at a glance with drill-down panels.",
        ),
        LayoutIdea::new(
            "Guided flow",
            "Step-by-step progression with a visible path to completion.",
        ),
    ]
}

/// Parses a layout reply into themed title/description records. Never
/// returns an empty structure.
pub fn parse_layouts(reply: &str) -> Vec<Theme<LayoutIdea>> {
    let mut accum: ThemeAccum<LayoutIdea> = ThemeAccum::new();
    let mut open: Option<LayoutIdea> = None;

    for line in reply.lines() {
        match classify_line(line, accum.theme_open()) {
            LineClass::ThemeHeader(name) | LineClass::AdHocHeader(name) => {
                flush(&mut accum, &mut open);
                accum.open(name);
            }
            LineClass::ListItem(text) => {
                flush(&mut accum, &mut open);
                if accum.theme_open() && !text.is_empty() {
                    open = Some(LayoutIdea::new(text, ""));
                }
            }
            LineClass::Continuation(text) => match open.as_mut() {
                // Continuations only ever grow the description; the title
                // is fixed by the line that opened the record.
                Some(layout) => {
                    if !layout.description.is_empty() {
                        layout.description.push(' ');
                    }
                    layout.description.push_str(text);
                }
                // An unmarked line under a theme starts a record as its title.
                None if accum.theme_open() => open = Some(LayoutIdea::new(text, "")),
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

    let flat = rescan_sections(reply);
    if !flat.is_empty() {
        return bucket_into_themes(flat, TIER1_LABELS, TIER1_CHUNK);
    }

    vec![Theme::new(PLACEHOLDER_THEME).with_items(placeholders())]
}

fn flush(accum: &mut ThemeAccum<LayoutIdea>, open: &mut Option<LayoutIdea>) {
    if let Some(layout) = open.take() {
        accum.push_item(layout);
    }
}

/// Tier 1: blank-line-separated sections become records. The first line
/// is the title (marker stripped), the rest the description.
fn rescan_sections(reply: &str) -> Vec<LayoutIdea> {
    reply
        .split("\n\n")
        .filter_map(|section| {
            let mut lines = section.lines().map(str::trim).filter(|l| !l.is_empty());
            let first = lines.next()?;
            let title = strip_marker(first).unwrap_or(first);
            if title.is_empty() {
                return None;
            }
            let description = lines.collect::<Vec<_>>().join(" ");
            Some(LayoutIdea::new(title, description))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn continuations_join_into_one_description() {
        let reply = "Theme 1: Structure\n1. Card grid\nDense overview of options.\nScales to small screens.\n\n2. Timeline\nChronological reading order.";
        let themes = parse_layouts(reply);
        assert_eq!(themes.len(), 1);
        let items = &themes[0].items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Card grid");
        assert_eq!(
            items[0].description,
            "Dense overview of options. Scales to small screens."
        );
        assert_eq!(items[1].title, "Timeline");
    }

    #[test]
    fn unthemed_sections_fall_back_to_synthetic_themes() {
        let reply = "1. Split view\nContext beside detail.\n\n2. Full-bleed map\nSpatial first.\n\n3. List first\nFast scanning.\n\n4. Wizard\nOne step at a time.";
        let themes = parse_layouts(reply);
        assert_eq!(themes[0].name, "Information Architecture");
        assert_eq!(themes[0].items.len(), 3);
        assert_eq!(themes[1].name, "Interaction Patterns");
        assert_eq!(themes[1].items.len(), 1);
        assert_eq!(themes[1].items[0].title, "Wizard");
    }

    #[test]
    fn empty_reply_yields_placeholder_triad() {
        let themes = parse_layouts("");
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].name, "Layout Directions");
        assert_eq!(themes[0].items.len(), 3);
    }

    #[test]
    fn ad_hoc_header_opens_first_theme() {
        let reply = "Navigation ideas:\n1. Tab bar\nAlways-visible sections.";
        let themes = parse_layouts(reply);
        assert_eq!(themes[0].name, "Navigation ideas");
        assert_eq!(themes[0].items[0].title, "Tab bar");
    }
}
