//! Property coverage for the parsing engine: invariants that must hold
//! for arbitrary reply text, not just curated examples.

use ideaforge::parser::features::parse_features;
use ideaforge::parser::layouts::parse_layouts;
use ideaforge::parser::reframes::{normalize_hmw, parse_reframes};
use ideaforge::parser::segments::parse_user_segments;
use ideaforge::parser::strip_marker;
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalization_always_yields_the_canonical_prefix(text in ".{0,200}") {
        let normalized = normalize_hmw(&text);
        prop_assert!(normalized
            .get(.."How might we".len())
            .is_some_and(|head| head.eq_ignore_ascii_case("How might we")));
    }

    #[test]
    fn normalization_is_idempotent(text in ".{0,200}") {
        let once = normalize_hmw(&text);
        prop_assert_eq!(normalize_hmw(&once), once);
    }

    #[test]
    fn stripping_a_marker_never_grows_the_line(line in ".{0,200}") {
        if let Some(stripped) = strip_marker(&line) {
            prop_assert!(stripped.len() <= line.len());
        }
    }

    #[test]
    fn every_grammar_is_total_and_never_empty(reply in "(?s).{0,500}") {
        let reframes = parse_reframes(&reply);
        prop_assert!(!reframes.is_empty());
        prop_assert!(reframes.iter().all(|t| !t.items.is_empty()));

        let features = parse_features(&reply);
        prop_assert!(!features.is_empty());
        prop_assert!(features.iter().all(|t| !t.items.is_empty()));

        prop_assert!(!parse_layouts(&reply).is_empty());
        prop_assert!(!parse_user_segments(&reply).is_empty());
    }
}
