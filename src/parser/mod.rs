//! Line-oriented parsing engine for loosely-formatted generation replies.
//!
//! All four grammars share one discipline: a single pass over the reply's
//! lines, classifying each line with [`classify_line`] and feeding the
//! result through a small explicit state machine (no theme open, theme
//! open, record open). The classifier applies its rules in strict
//! precedence order, so the precedence is auditable and testable in
//! isolation from any network call:
//!
//! 1. Theme header: `Theme` (case-insensitive) followed by a colon.
//! 2. Ad-hoc header, only while no explicit theme is open: a colon line
//!    whose prefix has no digit and is under 50 characters.
//! 3. List item: `1.`-style numeric marker, `•`, or `-`; the marker and
//!    a following colon are stripped.
//! 4. Continuation: any other non-blank line; grammars append it to the
//!    open record's free-text field.
//! 5. Blank, which flushes the open record into the current theme.
//!
//! Replies that match no grammar at all are handled by per-grammar
//! fallback tiers, never by surfacing an error: tier 1 re-scans for bare
//! list items and buckets them into synthetic themes, tier 2 emits a
//! canonical placeholder set. Every parser therefore returns at least one
//! theme (or segment) with at least one item, unconditionally.

use crate::ideas::Theme;

pub mod features;
pub mod layouts;
pub mod reframes;
pub mod segments;

/// Classification of one reply line, in rule-precedence order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// Explicit `Theme ...:` header; carries the trimmed theme name.
    ThemeHeader(&'a str),
    /// Colon-prefixed line treated as a theme name when none is open yet.
    AdHocHeader(&'a str),
    /// List-item line with its marker (and following colon) stripped.
    ListItem(&'a str),
    /// Non-blank line that matched no earlier rule.
    Continuation(&'a str),
    /// Blank line; closes the open record.
    Blank,
}

/// Classifies a single line. `theme_open` gates the ad-hoc header rule:
/// once an explicit theme exists, colon lines are ordinary content.
pub fn classify_line<'a>(line: &'a str, theme_open: bool) -> LineClass<'a> {
    let line = line.trim();
    if line.is_empty() {
        return LineClass::Blank;
    }

    if let Some(name) = theme_header_name(line) {
        return LineClass::ThemeHeader(name);
    }

    if !theme_open {
        if let Some(name) = ad_hoc_header_name(line) {
            return LineClass::AdHocHeader(name);
        }
    }

    if let Some(text) = strip_marker(line) {
        return LineClass::ListItem(text);
    }

    LineClass::Continuation(line)
}

/// `Theme ...: Name` → `Name`. Case-insensitive on the marker.
fn theme_header_name(line: &str) -> Option<&str> {
    let rest = strip_prefix_ignore_case(line, "theme")?;
    let (_, name) = rest.split_once(':')?;
    Some(name.trim())
}

/// A colon line whose prefix is digit-free and under 50 characters.
fn ad_hoc_header_name(line: &str) -> Option<&str> {
    let (before, _) = line.split_once(':')?;
    if before.chars().any(|c| c.is_ascii_digit()) || before.len() >= 50 {
        return None;
    }
    Some(before.trim())
}

/// Strips a list-item marker (`1.`–`5.`, `•`, `-`) and a directly
/// following colon. Returns `None` for non-marker lines.
pub fn strip_marker(line: &str) -> Option<&str> {
    let line = line.trim_start();
    let rest = if let Some(r) = line.strip_prefix('•') {
        r
    } else if let Some(r) = line.strip_prefix('-') {
        r
    } else {
        let mut chars = line.char_indices();
        match (chars.next(), chars.next()) {
            (Some((_, d)), Some((i, '.'))) if d.is_ascii_digit() => &line[i + 1..],
            _ => return None,
        }
    };
    let rest = rest.trim_start();
    Some(rest.strip_prefix(':').map_or(rest, str::trim_start))
}

pub(crate) fn case_insensitive_starts_with(line: &str, prefix: &str) -> bool {
    // get() keeps multi-byte leading chars from splitting a boundary.
    line.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn strip_prefix_ignore_case<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    case_insensitive_starts_with(line, prefix).then(|| &line[prefix.len()..])
}

/// Insertion-order theme accumulator shared by the theme grammars.
///
/// Re-opening a name that already exists switches the current theme back
/// to it instead of duplicating the entry, so item order within a theme
/// follows source order even when headers repeat.
#[derive(Debug, Default)]
pub(crate) struct ThemeAccum<T> {
    themes: Vec<Theme<T>>,
    current: Option<usize>,
}

impl<T> ThemeAccum<T> {
    pub(crate) fn new() -> Self {
        Self {
            themes: Vec::new(),
            current: None,
        }
    }

    /// Opens (or re-opens) the named theme and makes it current.
    pub(crate) fn open(&mut self, name: &str) {
        if let Some(pos) = self.themes.iter().position(|t| t.name == name) {
            self.current = Some(pos);
        } else {
            self.themes.push(Theme::new(name));
            self.current = Some(self.themes.len() - 1);
        }
    }

    pub(crate) fn theme_open(&self) -> bool {
        self.current.is_some()
    }

    /// Appends an item to the current theme. Items arriving before any
    /// header are dropped; the fallback tiers recover them if the whole
    /// pass yields nothing.
    pub(crate) fn push_item(&mut self, item: T) {
        if let Some(pos) = self.current {
            self.themes[pos].items.push(item);
        }
    }

    /// Finishes the pass, discarding empty themes.
    pub(crate) fn finish(self) -> Vec<Theme<T>> {
        self.themes
            .into_iter()
            .filter(|t| !t.items.is_empty())
            .collect()
    }
}

/// Collects marker lines only, stripped of their markers. Used by the
/// visual-prompt reader and the tier-1 fallback re-scans.
pub(crate) fn collect_marker_lines(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| strip_marker(line.trim()))
        .filter(|stripped| !stripped.is_empty())
        .map(str::to_string)
        .collect()
}

/// Generic list-block segmentation: a marker line starts a block, other
/// non-blank lines join the open block space-separated, blank lines close
/// it. A leading non-marker line also opens a block, so prose-style
/// replies still segment. This is the shared classification minus theme
/// handling, reused by the concept deriver.
pub(crate) fn split_list_blocks(text: &str) -> Vec<String> {
    let mut blocks: Vec<String> = Vec::new();
    let mut open: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if let Some(block) = open.take() {
                blocks.push(block);
            }
            continue;
        }
        match strip_marker(line) {
            Some(item) => {
                if let Some(block) = open.take() {
                    blocks.push(block);
                }
                open = Some(item.to_string());
            }
            None => match open.as_mut() {
                Some(block) => {
                    block.push(' ');
                    block.push_str(line);
                }
                None => open = Some(line.to_string()),
            },
        }
    }
    if let Some(block) = open {
        blocks.push(block);
    }
    blocks.retain(|b| !b.is_empty());
    blocks
}

/// Tier-1 bucketing: a flat item list becomes up to three synthetic
/// themes named from a fixed label set. The first two labels take
/// `chunk` items each; the last label takes the remainder.
pub(crate) fn bucket_into_themes<T>(items: Vec<T>, labels: [&str; 3], chunk: usize) -> Vec<Theme<T>> {
    let mut themes: Vec<Theme<T>> = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        let label_idx = (i / chunk).min(labels.len() - 1);
        if themes.len() <= label_idx {
            themes.push(Theme::new(labels[label_idx]));
        }
        themes[label_idx].items.push(item);
    }
    themes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_header_takes_precedence_over_ad_hoc() {
        assert_eq!(
            classify_line("Theme 1: Safety", false),
            LineClass::ThemeHeader("Safety")
        );
        // Still a theme header once a theme is open.
        assert_eq!(
            classify_line("theme 2: Comfort", true),
            LineClass::ThemeHeader("Comfort")
        );
    }

    #[test]
    fn ad_hoc_header_requires_no_open_theme() {
        assert_eq!(
            classify_line("Accessibility: ramps and rails", false),
            LineClass::AdHocHeader("Accessibility")
        );
        assert_eq!(
            classify_line("Accessibility: ramps and rails", true),
            LineClass::Continuation("Accessibility: ramps and rails")
        );
    }

    #[test]
    fn ad_hoc_header_rejects_digits_and_long_prefixes() {
        assert_eq!(
            classify_line("Step 2: do the thing", false),
            LineClass::Continuation("Step 2: do the thing")
        );
        let long = format!("{}: value", "x".repeat(60));
        assert!(matches!(
            classify_line(&long, false),
            LineClass::Continuation(_)
        ));
    }

    #[test]
    fn markers_strip_with_optional_colon() {
        assert_eq!(strip_marker("1. improve lighting"), Some("improve lighting"));
        assert_eq!(strip_marker("3.: add seating"), Some("add seating"));
        assert_eq!(strip_marker("• bullet"), Some("bullet"));
        assert_eq!(strip_marker("- dash"), Some("dash"));
        assert_eq!(strip_marker("plain text"), None);
        assert_eq!(strip_marker("2024 was a year"), None);
    }

    #[test]
    fn any_single_digit_marker_strips_but_multi_digit_does_not() {
        for digit in 1..=9 {
            let line = format!("{digit}. item text");
            assert_eq!(strip_marker(&line), Some("item text"));
        }
        // Two-digit numbering is left embedded in the line.
        assert_eq!(strip_marker("10. item text"), None);
    }

    #[test]
    fn list_item_beats_continuation_even_with_colon_prefix_digits() {
        // "1. Foo: bar" has a digit before the colon, so the ad-hoc rule
        // passes and the marker rule claims the line.
        assert_eq!(
            classify_line("1. Foo: bar", false),
            LineClass::ListItem("Foo: bar")
        );
    }

    #[test]
    fn accum_reopens_existing_theme_by_name() {
        let mut accum: ThemeAccum<String> = ThemeAccum::new();
        accum.open("A");
        accum.push_item("one".into());
        accum.open("B");
        accum.push_item("two".into());
        accum.open("A");
        accum.push_item("three".into());
        let themes = accum.finish();
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].items, vec!["one", "three"]);
        assert_eq!(themes[1].items, vec!["two"]);
    }

    #[test]
    fn split_list_blocks_joins_continuations() {
        let text = "1. First block\nmore detail\n\n2. Second block";
        assert_eq!(
            split_list_blocks(text),
            vec!["First block more detail", "Second block"]
        );
    }

    #[test]
    fn split_list_blocks_accepts_leading_prose() {
        let text = "An unnumbered explanation\nthat continues\n\n2. A numbered one";
        assert_eq!(
            split_list_blocks(text),
            vec!["An unnumbered explanation that continues", "A numbered one"]
        );
    }

    #[test]
    fn bucketing_caps_at_three_labels() {
        let items: Vec<String> = (0..11).map(|i| i.to_string()).collect();
        let themes = bucket_into_themes(items, ["A", "B", "C"], 4);
        assert_eq!(themes.len(), 3);
        assert_eq!(themes[0].items.len(), 4);
        assert_eq!(themes[1].items.len(), 4);
        // Remainder all lands in the last label.
        assert_eq!(themes[2].items.len(), 3);
    }
}
